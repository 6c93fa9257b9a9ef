//! Directory records returned by the bulk lookup endpoints.

use crate::core::ids::{EntityKind, Resolved, is_zero};
use serde::{Deserialize, Serialize};

/// A person (account member) as returned by `/person/infos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonInfo {
    pub person_id: i64,
    pub person_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub avatar: String,
    /// Role tag of the person (`as` on the wire)
    #[serde(rename = "as", skip_serializing_if = "String::is_empty")]
    pub role: String,
}

impl PersonInfo {
    pub fn new(person_id: i64, person_name: impl Into<String>) -> Self {
        Self {
            person_id,
            person_name: person_name.into(),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

impl Resolved for PersonInfo {
    const KIND: EntityKind = EntityKind::Person;

    fn key(&self) -> i64 {
        self.person_id
    }
}

/// A collaboration space (channel).
///
/// `team_name` and `creator_name` are display fields filled in by channel
/// enrichment; the lookup endpoint only returns the ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelInfo {
    pub channel_id: i64,
    pub channel_name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub team_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub team_name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub creator_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub creator_name: String,
}

impl ChannelInfo {
    pub fn new(channel_id: i64, channel_name: impl Into<String>) -> Self {
        Self {
            channel_id,
            channel_name: channel_name.into(),
            ..Default::default()
        }
    }

    pub fn with_team(mut self, team_id: i64) -> Self {
        self.team_id = team_id;
        self
    }

    pub fn with_creator(mut self, creator_id: i64) -> Self {
        self.creator_id = creator_id;
        self
    }
}

impl Resolved for ChannelInfo {
    const KIND: EntityKind = EntityKind::Channel;

    fn key(&self) -> i64 {
        self.channel_id
    }
}

/// A member entry embedded in a team record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub person_id: i64,
    pub person_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
}

/// A team, optionally with its member list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamInfo {
    pub team_id: i64,
    pub team_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<TeamMember>,
}

impl TeamInfo {
    pub fn new(team_id: i64, team_name: impl Into<String>) -> Self {
        Self {
            team_id,
            team_name: team_name.into(),
            members: Vec::new(),
        }
    }
}

impl Resolved for TeamInfo {
    const KIND: EntityKind = EntityKind::Team;

    fn key(&self) -> i64 {
        self.team_id
    }
}

/// An on-call schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleInfo {
    pub schedule_id: i64,
    pub schedule_name: String,
}

impl ScheduleInfo {
    pub fn new(schedule_id: i64, schedule_name: impl Into<String>) -> Self {
        Self {
            schedule_id,
            schedule_name: schedule_name.into(),
        }
    }
}

impl Resolved for ScheduleInfo {
    const KIND: EntityKind = EntityKind::Schedule;

    fn key(&self) -> i64 {
        self.schedule_id
    }
}
