//! Incident records: raw (as fetched) and enriched (as returned to callers).

use crate::core::ids::is_zero;
use crate::timeline::TimelineEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A responder entry on a raw incident.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawResponder {
    pub person_id: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub assigned_at: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub acknowledged_at: i64,
}

impl RawResponder {
    pub fn new(person_id: i64) -> Self {
        Self {
            person_id,
            ..Default::default()
        }
    }
}

/// An incident as returned by the incident list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawIncident {
    pub incident_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "incident_severity")]
    pub severity: String,
    pub progress: String,
    pub start_time: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub ack_time: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub close_time: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub channel_id: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub creator_id: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub closer_id: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responders: Vec<RawResponder>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Value>,
}

impl RawIncident {
    pub fn new(incident_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            incident_id: incident_id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_channel(mut self, channel_id: i64) -> Self {
        self.channel_id = channel_id;
        self
    }

    pub fn with_creator(mut self, creator_id: i64) -> Self {
        self.creator_id = creator_id;
        self
    }

    pub fn with_closer(mut self, closer_id: i64) -> Self {
        self.closer_id = closer_id;
        self
    }

    pub fn with_responder(mut self, responder: RawResponder) -> Self {
        self.responders.push(responder);
        self
    }
}

/// Responder with resolved display fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedResponder {
    pub person_id: i64,
    pub person_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub assigned_at: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub acknowledged_at: i64,
}

/// Preview of an alert grouped into an incident.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertPreview {
    pub alert_id: String,
    pub title: String,
    pub severity: String,
    pub status: String,
    /// `trigger_time` on the wire
    #[serde(alias = "trigger_time")]
    pub start_time: i64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Incidents of one page of a listing, with the server-side total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentPage {
    pub items: Vec<RawIncident>,
    pub total: usize,
}

/// One page of alerts for an incident, with the total count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPage {
    pub alerts: Vec<AlertPreview>,
    pub total: usize,
}

/// Alerts of one incident, as returned by the alerts query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentAlerts {
    pub incident_id: String,
    pub alerts: Vec<AlertPreview>,
    pub total: usize,
}

/// Full incident view with resolved names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichedIncident {
    pub incident_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub severity: String,
    pub progress: String,

    pub start_time: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub ack_time: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub close_time: i64,

    #[serde(skip_serializing_if = "is_zero")]
    pub channel_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel_name: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub creator_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub creator_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub creator_email: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub closer_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub closer_name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responders: Vec<EnrichedResponder>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub timeline: Vec<TimelineEvent>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alerts_preview: Vec<AlertPreview>,
    pub alerts_total: usize,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, Value>,
}
