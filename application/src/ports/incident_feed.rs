//! Incident feed port
//!
//! Raw fetch primitives for incidents, similar incidents, timelines, alerts,
//! escalation rules, channels and changes. Records come back unenriched.

use super::api_error::ApiError;
use async_trait::async_trait;
use duty_domain::{
    AlertPage, ChangePage, ChannelInfo, IncidentPage, RawEscalationRule, RawIncident,
    RawTimelineItem,
};
use serde::{Deserialize, Serialize};

/// Server-side filter for `/incident/list`
///
/// Empty strings and zero values mean "not set" and are left out of the
/// request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentFilter {
    pub progress: String,
    pub severity: String,
    pub channel_id: i64,
    pub title: String,
    pub start_time: i64,
    pub end_time: i64,
    pub limit: usize,
}

impl Default for IncidentFilter {
    fn default() -> Self {
        Self {
            progress: String::new(),
            severity: String::new(),
            channel_id: 0,
            title: String::new(),
            start_time: 0,
            end_time: 0,
            limit: 20,
        }
    }
}

impl IncidentFilter {
    pub fn with_progress(mut self, progress: impl Into<String>) -> Self {
        self.progress = progress.into();
        self
    }

    pub fn with_channel(mut self, channel_id: i64) -> Self {
        self.channel_id = channel_id;
        self
    }

    pub fn with_time_range(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }
}

/// Server-side filter for `/change/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeFilter {
    pub change_ids: Vec<String>,
    pub channel_id: i64,
    pub change_type: String,
    pub start_time: i64,
    pub end_time: i64,
    pub limit: usize,
}

impl Default for ChangeFilter {
    fn default() -> Self {
        Self {
            change_ids: Vec::new(),
            channel_id: 0,
            change_type: String::new(),
            start_time: 0,
            end_time: 0,
            limit: 20,
        }
    }
}

/// Feed of raw incident-management records
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait IncidentFeedPort: Send + Sync {
    async fn fetch_incidents_by_ids(&self, ids: &[String]) -> Result<Vec<RawIncident>, ApiError>;

    async fn fetch_incidents(&self, filter: &IncidentFilter) -> Result<Vec<RawIncident>, ApiError>;

    /// Past incidents the server considers similar to `incident_id`, with
    /// the total number of matches
    async fn fetch_similar_incidents(
        &self,
        incident_id: &str,
        limit: usize,
    ) -> Result<IncidentPage, ApiError>;

    /// Raw timeline of one incident, oldest first
    async fn fetch_timeline(&self, incident_id: &str) -> Result<Vec<RawTimelineItem>, ApiError>;

    /// First page of alerts for one incident plus the server-side total
    async fn fetch_alerts(&self, incident_id: &str, limit: usize) -> Result<AlertPage, ApiError>;

    async fn fetch_escalation_rules(
        &self,
        channel_id: i64,
    ) -> Result<Vec<RawEscalationRule>, ApiError>;

    async fn list_channels(&self) -> Result<Vec<ChannelInfo>, ApiError>;

    async fn fetch_changes(&self, filter: &ChangeFilter) -> Result<ChangePage, ApiError>;
}
