//! Directory listings (`/member/list`, `/team/list`).

use super::client::DutyClient;
use super::wire::Page;
use async_trait::async_trait;
use duty_application::{ApiError, DirectoryPort, MemberFilter, TeamFilter};
use duty_domain::{MemberInfo, MemberPage, TeamInfo, TeamPage};
use serde_json::{Map, Value, json};

fn member_filter_body(filter: &MemberFilter) -> Value {
    let mut body = Map::new();
    body.insert("p".into(), json!(1));
    body.insert("limit".into(), json!(filter.limit));
    if !filter.name.is_empty() {
        body.insert("member_name".into(), json!(filter.name));
    }
    if !filter.email.is_empty() {
        body.insert("email".into(), json!(filter.email));
    }
    Value::Object(body)
}

fn team_filter_body(filter: &TeamFilter) -> Value {
    let mut body = Map::new();
    body.insert("p".into(), json!(1));
    body.insert("limit".into(), json!(filter.limit));
    if !filter.name.is_empty() {
        body.insert("team_name".into(), json!(filter.name));
    }
    Value::Object(body)
}

#[async_trait]
impl DirectoryPort for DutyClient {
    async fn list_members(&self, filter: &MemberFilter) -> Result<MemberPage, ApiError> {
        let data: Page<MemberInfo> = self.post("/member/list", &member_filter_body(filter)).await?;
        let (items, total) = data.into_parts();
        Ok(MemberPage { items, total })
    }

    async fn list_teams(&self, filter: &TeamFilter) -> Result<TeamPage, ApiError> {
        let data: Page<TeamInfo> = self.post("/team/list", &team_filter_body(filter)).await?;
        let (items, total) = data.into_parts();
        Ok(TeamPage { items, total })
    }
}
