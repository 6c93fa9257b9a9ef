//! Directory lookup port
//!
//! Bulk resolution of person, channel, team and schedule identifiers.

use super::api_error::ApiError;
use async_trait::async_trait;
use duty_domain::{ChannelInfo, PersonInfo, ScheduleInfo, TeamInfo};

/// Bulk "fetch by ids" lookups against the directory
///
/// Each call receives the full id list for one entity kind and returns the
/// records the server knows about. Unknown ids are simply absent from the
/// result; callers must not rely on ordering.
#[async_trait]
pub trait LookupPort: Send + Sync {
    async fn fetch_persons(&self, ids: &[i64]) -> Result<Vec<PersonInfo>, ApiError>;

    async fn fetch_channels(&self, ids: &[i64]) -> Result<Vec<ChannelInfo>, ApiError>;

    async fn fetch_teams(&self, ids: &[i64]) -> Result<Vec<TeamInfo>, ApiError>;

    async fn fetch_schedules(&self, ids: &[i64]) -> Result<Vec<ScheduleInfo>, ApiError>;
}
