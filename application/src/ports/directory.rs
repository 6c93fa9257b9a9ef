//! Directory listing port
//!
//! Paged listings of account members and teams. Lookups by id go through
//! [`LookupPort`](super::lookup::LookupPort) instead.

use super::api_error::ApiError;
use async_trait::async_trait;
use duty_domain::{MemberPage, TeamPage};

/// Server-side filter for `/member/list`
///
/// Empty strings mean "not set".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFilter {
    /// Fuzzy match on the member name
    pub name: String,
    pub email: String,
    pub limit: usize,
}

impl Default for MemberFilter {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            limit: 20,
        }
    }
}

/// Server-side filter for `/team/list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamFilter {
    pub name: String,
    pub limit: usize,
}

impl Default for TeamFilter {
    fn default() -> Self {
        Self {
            name: String::new(),
            limit: 20,
        }
    }
}

#[async_trait]
pub trait DirectoryPort: Send + Sync {
    /// First page of members matching `filter`
    async fn list_members(&self, filter: &MemberFilter) -> Result<MemberPage, ApiError>;

    /// First page of teams matching `filter`, each with its members
    async fn list_teams(&self, filter: &TeamFilter) -> Result<TeamPage, ApiError>;
}
