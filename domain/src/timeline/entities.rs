//! Timeline records.

use super::event_kind::EventKind;
use crate::core::ids::is_zero;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A timeline item as returned by `/incident/feed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTimelineItem {
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: i64,
    /// Operator who caused the event (`0` for system events)
    #[serde(skip_serializing_if = "is_zero")]
    pub person_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl RawTimelineItem {
    pub fn new(event_type: impl Into<String>, created_at: i64) -> Self {
        Self {
            event_type: event_type.into(),
            created_at,
            ..Default::default()
        }
    }

    pub fn with_operator(mut self, person_id: i64) -> Self {
        self.person_id = person_id;
        self
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn kind(&self) -> EventKind {
        EventKind::parse(&self.event_type)
    }
}

/// An enriched timeline entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub operator_id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operator_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

/// The enriched timeline of one incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentTimeline {
    pub incident_id: String,
    pub timeline: Vec<TimelineEvent>,
    pub total: usize,
}

impl IncidentTimeline {
    pub fn new(incident_id: impl Into<String>, timeline: Vec<TimelineEvent>) -> Self {
        let total = timeline.len();
        Self {
            incident_id: incident_id.into(),
            timeline,
            total,
        }
    }
}
