//! Escalation rules as returned by `/channel/escalate/rule/list`.

use super::entities::{AlertFilters, NotifyBy, TimeFilter};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawWebhook {
    #[serde(rename = "type")]
    pub webhook_type: String,
    pub settings: Map<String, Value>,
}

/// Who a layer notifies. Every list is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEscalationTarget {
    pub person_ids: Vec<i64>,
    pub team_ids: Vec<i64>,
    /// Schedule id to the on-call role ids notified on that schedule
    pub schedule_to_role_ids: BTreeMap<i64, Vec<i64>>,
    pub by: Option<NotifyBy>,
    pub webhooks: Vec<RawWebhook>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEscalationLayer {
    pub max_times: i64,
    pub notify_step: f64,
    pub escalate_window: i64,
    pub force_escalate: bool,
    pub target: Option<RawEscalationTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEscalationRule {
    pub rule_id: String,
    pub rule_name: String,
    pub description: String,
    pub channel_id: i64,
    pub status: String,
    pub priority: i64,
    pub aggr_window: i64,
    pub layers: Vec<RawEscalationLayer>,
    pub time_filters: Vec<TimeFilter>,
    pub filters: AlertFilters,
}
