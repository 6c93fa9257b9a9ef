//! Account members and paged directory listings (`/member/list`, `/team/list`).

use super::entities::{PersonInfo, TeamInfo};
use crate::core::ids::is_zero;
use serde::{Deserialize, Serialize};

/// An account member as listed by `/member/list`.
///
/// A member found through the person lookup only carries id, name and
/// email; the account fields stay unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberInfo {
    pub member_id: i64,
    pub member_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub email_verified: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub phone_verified: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub account_role_ids: Vec<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub time_zone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub locale: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub created_at: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub updated_at: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ref_id: String,
}

impl MemberInfo {
    pub fn new(member_id: i64, member_name: impl Into<String>) -> Self {
        Self {
            member_id,
            member_name: member_name.into(),
            ..Default::default()
        }
    }
}

impl From<PersonInfo> for MemberInfo {
    fn from(person: PersonInfo) -> Self {
        Self {
            email: person.email,
            ..Self::new(person.person_id, person.person_name)
        }
    }
}

/// One page of members plus the server-side total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPage {
    pub items: Vec<MemberInfo>,
    pub total: usize,
}

/// One page of teams (with their members) plus the server-side total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPage {
    pub items: Vec<TeamInfo>,
    pub total: usize,
}
