//! Directory lookups (`/person/infos`, `/channel/infos`, `/team/infos`,
//! `/schedule/infos`).

use super::client::DutyClient;
use super::wire::Items;
use async_trait::async_trait;
use duty_application::{ApiError, LookupPort};
use duty_domain::{ChannelInfo, PersonInfo, ScheduleInfo, TeamInfo};
use serde_json::json;

#[async_trait]
impl LookupPort for DutyClient {
    async fn fetch_persons(&self, ids: &[i64]) -> Result<Vec<PersonInfo>, ApiError> {
        let data: Items<PersonInfo> = self.post("/person/infos", &json!({ "person_ids": ids })).await?;
        Ok(data.into_items())
    }

    async fn fetch_channels(&self, ids: &[i64]) -> Result<Vec<ChannelInfo>, ApiError> {
        let data: Items<ChannelInfo> =
            self.post("/channel/infos", &json!({ "channel_ids": ids })).await?;
        Ok(data.into_items())
    }

    async fn fetch_teams(&self, ids: &[i64]) -> Result<Vec<TeamInfo>, ApiError> {
        let data: Items<TeamInfo> = self.post("/team/infos", &json!({ "team_ids": ids })).await?;
        Ok(data.into_items())
    }

    async fn fetch_schedules(&self, ids: &[i64]) -> Result<Vec<ScheduleInfo>, ApiError> {
        let data: Items<ScheduleInfo> =
            self.post("/schedule/infos", &json!({ "schedule_ids": ids })).await?;
        Ok(data.into_items())
    }
}
