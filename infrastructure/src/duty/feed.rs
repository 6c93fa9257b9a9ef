//! Raw record endpoints: incidents, similar incidents, timelines, alerts,
//! escalation rules, channels and changes.

use super::client::DutyClient;
use super::wire::{Items, Page};
use async_trait::async_trait;
use duty_application::{ApiError, ChangeFilter, IncidentFeedPort, IncidentFilter};
use duty_domain::{
    AlertPage, AlertPreview, ChangePage, ChannelInfo, IncidentPage, RawChange, RawEscalationRule,
    RawIncident, RawTimelineItem,
};
use serde_json::{Map, Value, json};

fn incident_filter_body(filter: &IncidentFilter) -> Value {
    let mut body = Map::new();
    body.insert("p".into(), json!(1));
    body.insert("limit".into(), json!(filter.limit));
    body.insert("start_time".into(), json!(filter.start_time));
    body.insert("end_time".into(), json!(filter.end_time));
    if !filter.progress.is_empty() {
        body.insert("progress".into(), json!(filter.progress));
    }
    if !filter.severity.is_empty() {
        body.insert("incident_severity".into(), json!(filter.severity));
    }
    if filter.channel_id > 0 {
        body.insert("channel_id".into(), json!(filter.channel_id));
    }
    if !filter.title.is_empty() {
        body.insert("title".into(), json!(filter.title));
    }
    Value::Object(body)
}

fn change_filter_body(filter: &ChangeFilter) -> Value {
    let mut body = Map::new();
    body.insert("p".into(), json!(1));
    body.insert("limit".into(), json!(filter.limit));
    if !filter.change_ids.is_empty() {
        body.insert("change_ids".into(), json!(filter.change_ids));
    }
    if filter.channel_id > 0 {
        body.insert("channel_id".into(), json!(filter.channel_id));
    }
    if filter.start_time > 0 {
        body.insert("start_time".into(), json!(filter.start_time));
    }
    if filter.end_time > 0 {
        body.insert("end_time".into(), json!(filter.end_time));
    }
    if !filter.change_type.is_empty() {
        body.insert("type".into(), json!(filter.change_type));
    }
    Value::Object(body)
}

#[async_trait]
impl IncidentFeedPort for DutyClient {
    async fn fetch_incidents_by_ids(&self, ids: &[String]) -> Result<Vec<RawIncident>, ApiError> {
        let data: Items<RawIncident> = self
            .post("/incident/list-by-ids", &json!({ "incident_ids": ids }))
            .await?;
        Ok(data.into_items())
    }

    async fn fetch_incidents(&self, filter: &IncidentFilter) -> Result<Vec<RawIncident>, ApiError> {
        let data: Items<RawIncident> = self.post("/incident/list", &incident_filter_body(filter)).await?;
        Ok(data.into_items())
    }

    async fn fetch_similar_incidents(
        &self,
        incident_id: &str,
        limit: usize,
    ) -> Result<IncidentPage, ApiError> {
        let body = json!({
            "incident_id": incident_id,
            "p": 1,
            "limit": limit,
        });
        let data: Page<RawIncident> = self.post("/incident/past/list", &body).await?;
        let (items, total) = data.into_parts();
        Ok(IncidentPage { items, total })
    }

    async fn fetch_timeline(&self, incident_id: &str) -> Result<Vec<RawTimelineItem>, ApiError> {
        let body = json!({
            "incident_id": incident_id,
            "limit": self.timeline_limit,
            "asc": true,
        });
        let data: Items<RawTimelineItem> = self.post("/incident/feed", &body).await?;
        Ok(data.into_items())
    }

    async fn fetch_alerts(&self, incident_id: &str, limit: usize) -> Result<AlertPage, ApiError> {
        let body = json!({
            "incident_id": incident_id,
            "p": 1,
            "limit": limit,
        });
        let data: Page<AlertPreview> = self.post("/incident/alert/list", &body).await?;
        let (alerts, total) = data.into_parts();
        Ok(AlertPage { alerts, total })
    }

    async fn fetch_escalation_rules(
        &self,
        channel_id: i64,
    ) -> Result<Vec<RawEscalationRule>, ApiError> {
        let data: Items<RawEscalationRule> = self
            .post("/channel/escalate/rule/list", &json!({ "channel_id": channel_id }))
            .await?;
        Ok(data.into_items())
    }

    async fn list_channels(&self) -> Result<Vec<ChannelInfo>, ApiError> {
        let data: Items<ChannelInfo> = self.post("/channel/list", &json!({})).await?;
        Ok(data.into_items())
    }

    async fn fetch_changes(&self, filter: &ChangeFilter) -> Result<ChangePage, ApiError> {
        let data: Page<RawChange> = self.post("/change/list", &change_filter_body(filter)).await?;
        let (items, total) = data.into_parts();
        Ok(ChangePage { items, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duty::client::DutyClientConfig;
    use crate::duty::test_server::{StubResponse, StubServer};
    use pretty_assertions::assert_eq;

    async fn client_with(response: StubResponse) -> (StubServer, DutyClient) {
        let server = StubServer::start(vec![response]).await;
        let client = DutyClient::new(
            DutyClientConfig::new("k")
                .with_base_url(server.base_url())
                .with_timeline_limit(50),
        )
        .unwrap();
        (server, client)
    }

    #[test]
    fn test_incident_filter_body_omits_unset_fields() {
        let body = incident_filter_body(&IncidentFilter::default().with_time_range(100, 200));
        assert_eq!(
            body,
            json!({"p": 1, "limit": 20, "start_time": 100, "end_time": 200})
        );

        let body = incident_filter_body(&IncidentFilter {
            severity: "Critical".to_string(),
            ..IncidentFilter::default().with_progress("Triggered").with_channel(3)
        });
        assert_eq!(body["incident_severity"], json!("Critical"));
        assert_eq!(body["progress"], json!("Triggered"));
        assert_eq!(body["channel_id"], json!(3));
        assert!(body.get("title").is_none());
    }

    #[test]
    fn test_change_filter_body() {
        let body = change_filter_body(&ChangeFilter {
            change_ids: vec!["c-1".to_string()],
            change_type: "deploy".to_string(),
            ..Default::default()
        });
        assert_eq!(
            body,
            json!({"p": 1, "limit": 20, "change_ids": ["c-1"], "type": "deploy"})
        );
    }

    #[tokio::test]
    async fn test_fetch_timeline_request_shape() {
        let (server, client) = client_with(StubResponse::ok(json!({
            "data": {"items": [
                {"type": "i_notify", "created_at": 10, "person_id": 0, "detail": {"to": [5]}}
            ]}
        })))
        .await;

        let items = client.fetch_timeline("inc-1").await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].event_type, "i_notify");
        assert_eq!(items[0].detail, Some(json!({"to": [5]})));
        let request = &server.requests()[0];
        assert_eq!(request.path(), "/incident/feed");
        assert_eq!(
            request.json(),
            json!({"incident_id": "inc-1", "limit": 50, "asc": true})
        );
    }

    #[tokio::test]
    async fn test_fetch_alerts_maps_trigger_time() {
        let (server, client) = client_with(StubResponse::ok(json!({
            "data": {
                "total": 12,
                "items": [{"alert_id": "a-1", "title": "disk", "severity": "Warning",
                           "status": "Critical", "trigger_time": 1700000000}]
            }
        })))
        .await;

        let page = client.fetch_alerts("inc-1", 5).await.unwrap();

        assert_eq!(page.total, 12);
        assert_eq!(page.alerts[0].start_time, 1700000000);
        assert_eq!(
            server.requests()[0].json(),
            json!({"incident_id": "inc-1", "p": 1, "limit": 5})
        );
    }

    #[tokio::test]
    async fn test_fetch_incidents_by_ids() {
        let (server, client) = client_with(StubResponse::ok(json!({
            "data": {"items": [{"incident_id": "inc-1", "title": "Disk full",
                                "incident_severity": "Critical", "creator_id": 7}]}
        })))
        .await;

        let incidents = client
            .fetch_incidents_by_ids(&["inc-1".to_string()])
            .await
            .unwrap();

        assert_eq!(incidents[0].severity, "Critical");
        assert_eq!(incidents[0].creator_id, 7);
        assert_eq!(server.requests()[0].path(), "/incident/list-by-ids");
    }

    #[tokio::test]
    async fn test_fetch_similar_incidents() {
        let (server, client) = client_with(StubResponse::ok(json!({
            "data": {"total": 9, "items": [{"incident_id": "inc-1", "title": "Disk full", "creator_id": 7}]}
        })))
        .await;

        let page = client.fetch_similar_incidents("inc-9", 5).await.unwrap();

        assert_eq!(page.total, 9);
        assert_eq!(page.items[0].incident_id, "inc-1");
        let request = &server.requests()[0];
        assert_eq!(request.path(), "/incident/past/list");
        assert_eq!(
            request.json(),
            json!({"incident_id": "inc-9", "p": 1, "limit": 5})
        );
    }

    #[tokio::test]
    async fn test_missing_data_is_empty() {
        let (_server, client) = client_with(StubResponse::ok(json!({}))).await;

        assert!(client.list_channels().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_changes_total() {
        let (server, client) = client_with(StubResponse::ok(json!({
            "data": {"total": 3, "items": [{"change_id": "c-1", "title": "deploy", "type": "deploy"}]}
        })))
        .await;

        let page = client
            .fetch_changes(&ChangeFilter {
                channel_id: 3,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.items[0].change_type, "deploy");
        assert_eq!(server.requests()[0].json(), json!({"p": 1, "limit": 20, "channel_id": 3}));
    }

    #[tokio::test]
    async fn test_fetch_escalation_rules_path() {
        let (server, client) = client_with(StubResponse::ok(json!({
            "data": {"items": [{"rule_id": "r-1", "rule_name": "Default", "channel_id": 3}]}
        })))
        .await;

        let rules = client.fetch_escalation_rules(3).await.unwrap();

        assert_eq!(rules[0].rule_name, "Default");
        assert_eq!(server.requests()[0].path(), "/channel/escalate/rule/list");
        assert_eq!(server.requests()[0].json(), json!({"channel_id": 3}));
    }
}
