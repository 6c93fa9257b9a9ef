//! Resolved mappings for every entity kind of one enrichment call.

use super::entities::{ChannelInfo, PersonInfo, ScheduleInfo, TeamInfo};
use crate::core::ids::{EntityKind, ResolvedMap};

/// The output of a fan-out: one [`ResolvedMap`] per entity kind.
///
/// Kinds that were not requested, or whose best-effort lookup failed, are
/// left empty.
#[derive(Debug, Clone, Default)]
pub struct Resolutions {
    pub persons: ResolvedMap<PersonInfo>,
    pub channels: ResolvedMap<ChannelInfo>,
    pub teams: ResolvedMap<TeamInfo>,
    pub schedules: ResolvedMap<ScheduleInfo>,
}

impl Resolutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resolved records for `kind`.
    pub fn resolved_count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Person => self.persons.len(),
            EntityKind::Channel => self.channels.len(),
            EntityKind::Team => self.teams.len(),
            EntityKind::Schedule => self.schedules.len(),
        }
    }

    pub fn person_name(&self, id: i64) -> Option<&str> {
        self.persons.get(&id).map(|p| p.person_name.as_str())
    }

    pub fn channel_name(&self, id: i64) -> Option<&str> {
        self.channels.get(&id).map(|c| c.channel_name.as_str())
    }

    pub fn team_name(&self, id: i64) -> Option<&str> {
        self.teams.get(&id).map(|t| t.team_name.as_str())
    }

    pub fn schedule_name(&self, id: i64) -> Option<&str> {
        self.schedules.get(&id).map(|s| s.schedule_name.as_str())
    }
}
