//! Enriched escalation rule view.
//!
//! Time filters and alert filters are transported verbatim; nothing here
//! evaluates them.

use crate::core::ids::is_zero;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A time window during which the rule applies (or, with `is_off`, does not).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeFilter {
    pub start: String,
    pub end: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repeat: Vec<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cal_id: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_off: bool,
}

/// A single alert match condition (`key oper vals`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertCondition {
    pub key: String,
    pub oper: String,
    pub vals: Vec<String>,
}

/// Conditions that must all match.
pub type AlertFilterGroup = Vec<AlertCondition>;

/// Groups of which at least one must match.
pub type AlertFilters = Vec<AlertFilterGroup>;

/// Direct-notification preferences of a layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyBy {
    pub follow_preference: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub critical: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warning: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub info: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonTarget {
    pub person_id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub person_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTarget {
    pub team_id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub team_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTarget {
    pub schedule_id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub schedule_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(rename = "type")]
    pub webhook_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alias: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub settings: Map<String, Value>,
}

/// Notification targets of one layer, partitioned by target kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationTarget {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub persons: Vec<PersonTarget>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<TeamTarget>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schedules: Vec<ScheduleTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_by: Option<NotifyBy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub webhooks: Vec<WebhookConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationLayer {
    pub layer_idx: usize,
    /// Minutes before escalating to the next layer
    pub timeout: i64,
    #[serde(skip_serializing_if = "is_zero_f64")]
    pub notify_interval: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_times: i64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_escalate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<EscalationTarget>,
}

fn is_zero_f64(v: &f64) -> bool {
    *v == 0.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationRule {
    pub rule_id: String,
    pub rule_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub channel_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    pub priority: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub aggr_window: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<EscalationLayer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time_filters: Vec<TimeFilter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: AlertFilters,
}
