//! In-memory port implementations shared by the use case tests.

use crate::ports::api_error::ApiError;
use crate::ports::directory::{DirectoryPort, MemberFilter, TeamFilter};
use crate::ports::incident_feed::{ChangeFilter, IncidentFeedPort, IncidentFilter};
use crate::ports::lookup::LookupPort;
use async_trait::async_trait;
use duty_domain::{
    AlertPage, ChangePage, ChannelInfo, EntityKind, IncidentPage, MemberPage, PersonInfo,
    RawEscalationRule, RawIncident, RawTimelineItem, Resolved, ScheduleInfo, TeamInfo, TeamPage,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ==================== MockLookup ====================

#[derive(Default)]
pub(crate) struct MockLookup {
    persons: Vec<PersonInfo>,
    channels: Vec<ChannelInfo>,
    teams: Vec<TeamInfo>,
    schedules: Vec<ScheduleInfo>,
    failures: HashMap<EntityKind, ApiError>,
    gates: HashMap<EntityKind, Arc<Notify>>,
    entered: Arc<Notify>,
    calls: Mutex<Vec<(EntityKind, Vec<i64>)>>,
}

impl MockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persons(mut self, persons: Vec<PersonInfo>) -> Self {
        self.persons = persons;
        self
    }

    pub fn with_channels(mut self, channels: Vec<ChannelInfo>) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_teams(mut self, teams: Vec<TeamInfo>) -> Self {
        self.teams = teams;
        self
    }

    pub fn with_schedules(mut self, schedules: Vec<ScheduleInfo>) -> Self {
        self.schedules = schedules;
        self
    }

    pub fn failing(mut self, kind: EntityKind, err: ApiError) -> Self {
        self.failures.insert(kind, err);
        self
    }

    /// Make lookups of `kind` park until the returned gate is notified.
    pub fn gated(mut self, kind: EntityKind) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gates.insert(kind, Arc::clone(&gate));
        (self, gate)
    }

    /// Notified each time a gated lookup starts waiting.
    pub fn entered(&self) -> Arc<Notify> {
        Arc::clone(&self.entered)
    }

    pub fn calls(&self) -> Vec<(EntityKind, Vec<i64>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, kind: EntityKind) -> Vec<Vec<i64>> {
        self.calls()
            .into_iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, ids)| ids)
            .collect()
    }

    async fn answer<R: Resolved>(&self, ids: &[i64], records: &[R]) -> Result<Vec<R>, ApiError> {
        self.calls.lock().unwrap().push((R::KIND, ids.to_vec()));
        if let Some(gate) = self.gates.get(&R::KIND) {
            self.entered.notify_one();
            gate.notified().await;
        }
        if let Some(err) = self.failures.get(&R::KIND) {
            return Err(err.clone());
        }
        Ok(records
            .iter()
            .filter(|r| ids.contains(&r.key()))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LookupPort for MockLookup {
    async fn fetch_persons(&self, ids: &[i64]) -> Result<Vec<PersonInfo>, ApiError> {
        self.answer(ids, &self.persons).await
    }

    async fn fetch_channels(&self, ids: &[i64]) -> Result<Vec<ChannelInfo>, ApiError> {
        self.answer(ids, &self.channels).await
    }

    async fn fetch_teams(&self, ids: &[i64]) -> Result<Vec<TeamInfo>, ApiError> {
        self.answer(ids, &self.teams).await
    }

    async fn fetch_schedules(&self, ids: &[i64]) -> Result<Vec<ScheduleInfo>, ApiError> {
        self.answer(ids, &self.schedules).await
    }
}

// ==================== MockFeed ====================

#[derive(Default)]
pub(crate) struct MockFeed {
    pub incidents: Vec<RawIncident>,
    pub similar: HashMap<String, IncidentPage>,
    pub timelines: HashMap<String, Vec<RawTimelineItem>>,
    pub alerts: HashMap<String, AlertPage>,
    pub rules: HashMap<i64, Vec<RawEscalationRule>>,
    pub channels: Vec<ChannelInfo>,
    pub changes: ChangePage,
    pub failures: HashMap<&'static str, ApiError>,
    calls: Mutex<Vec<String>>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, operation: &'static str, err: ApiError) -> Self {
        self.failures.insert(operation, err);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, arg: impl std::fmt::Display) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(format!("{operation}:{arg}"));
        match self.failures.get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IncidentFeedPort for MockFeed {
    async fn fetch_incidents_by_ids(&self, ids: &[String]) -> Result<Vec<RawIncident>, ApiError> {
        self.record("incidents_by_ids", ids.join(","))?;
        Ok(self
            .incidents
            .iter()
            .filter(|i| ids.contains(&i.incident_id))
            .cloned()
            .collect())
    }

    async fn fetch_incidents(&self, filter: &IncidentFilter) -> Result<Vec<RawIncident>, ApiError> {
        self.record("incidents", filter.limit)?;
        Ok(self.incidents.iter().take(filter.limit).cloned().collect())
    }

    async fn fetch_similar_incidents(
        &self,
        incident_id: &str,
        limit: usize,
    ) -> Result<IncidentPage, ApiError> {
        self.record("similar", incident_id)?;
        let mut page = self.similar.get(incident_id).cloned().unwrap_or_default();
        page.items.truncate(limit);
        Ok(page)
    }

    async fn fetch_timeline(&self, incident_id: &str) -> Result<Vec<RawTimelineItem>, ApiError> {
        self.record("timeline", incident_id)?;
        Ok(self.timelines.get(incident_id).cloned().unwrap_or_default())
    }

    async fn fetch_alerts(&self, incident_id: &str, limit: usize) -> Result<AlertPage, ApiError> {
        self.record("alerts", incident_id)?;
        let mut page = self.alerts.get(incident_id).cloned().unwrap_or_default();
        page.alerts.truncate(limit);
        Ok(page)
    }

    async fn fetch_escalation_rules(
        &self,
        channel_id: i64,
    ) -> Result<Vec<RawEscalationRule>, ApiError> {
        self.record("escalation_rules", channel_id)?;
        Ok(self.rules.get(&channel_id).cloned().unwrap_or_default())
    }

    async fn list_channels(&self) -> Result<Vec<ChannelInfo>, ApiError> {
        self.record("list_channels", "")?;
        Ok(self.channels.clone())
    }

    async fn fetch_changes(&self, filter: &ChangeFilter) -> Result<ChangePage, ApiError> {
        self.record("changes", filter.channel_id)?;
        Ok(self.changes.clone())
    }
}

// ==================== MockDirectory ====================

#[derive(Default)]
pub(crate) struct MockDirectory {
    pub members: MemberPage,
    pub teams: TeamPage,
    pub failures: HashMap<&'static str, ApiError>,
    calls: Mutex<Vec<String>>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, operation: &'static str, err: ApiError) -> Self {
        self.failures.insert(operation, err);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, arg: impl std::fmt::Display) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(format!("{operation}:{arg}"));
        match self.failures.get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DirectoryPort for MockDirectory {
    async fn list_members(&self, filter: &MemberFilter) -> Result<MemberPage, ApiError> {
        self.record("members", &filter.name)?;
        let mut page = self.members.clone();
        page.items.truncate(filter.limit);
        Ok(page)
    }

    async fn list_teams(&self, filter: &TeamFilter) -> Result<TeamPage, ApiError> {
        self.record("teams", &filter.name)?;
        let mut page = self.teams.clone();
        page.items.truncate(filter.limit);
        Ok(page)
    }
}
