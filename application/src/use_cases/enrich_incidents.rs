//! Enrich incidents use case
//!
//! Resolves creator, closer, responder and channel names for a batch of raw
//! incidents. Optionally attaches an enriched timeline and a preview of the
//! first alerts to every incident.

use crate::enrichment::error::check_cancelled;
use crate::enrichment::{BranchPolicy, EnrichError, FanOut, FanOutPlan};
use crate::ports::incident_feed::IncidentFeedPort;
use crate::ports::lookup::LookupPort;
use crate::use_cases::shared::fetch_each;
use duty_domain::{
    AlertPage, EnrichedIncident, EntityKind, RawIncident, RawTimelineItem,
    collect_incident_ids, collect_timeline_person_ids, enrich_incidents, enrich_timeline,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// What to attach to each enriched incident besides resolved names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichIncidentsOptions {
    pub include_timeline: bool,
    pub include_alerts: bool,
    /// Alerts previewed per incident (1..=100)
    pub alerts_limit: usize,
}

impl Default for EnrichIncidentsOptions {
    fn default() -> Self {
        Self {
            include_timeline: false,
            include_alerts: false,
            alerts_limit: 20,
        }
    }
}

impl EnrichIncidentsOptions {
    pub fn with_timeline(mut self) -> Self {
        self.include_timeline = true;
        self
    }

    pub fn with_alerts(mut self, limit: usize) -> Self {
        self.include_alerts = true;
        self.alerts_limit = limit;
        self
    }
}

/// Use case for enriching raw incidents
///
/// Person and channel lookups are both required: an incident list with
/// blank owners is worse than an error.
pub struct EnrichIncidentsUseCase<L: LookupPort + 'static, F: IncidentFeedPort + 'static> {
    fan_out: FanOut<L>,
    feed: Arc<F>,
}

impl<L: LookupPort + 'static, F: IncidentFeedPort + 'static> EnrichIncidentsUseCase<L, F> {
    pub fn new(lookup: Arc<L>, feed: Arc<F>) -> Self {
        Self {
            fan_out: FanOut::new(lookup),
            feed,
        }
    }

    pub async fn execute(
        &self,
        incidents: &[RawIncident],
        options: EnrichIncidentsOptions,
        token: &CancellationToken,
    ) -> Result<Vec<EnrichedIncident>, EnrichError> {
        check_cancelled(token)?;
        if incidents.is_empty() {
            return Ok(Vec::new());
        }

        info!(
            incidents = incidents.len(),
            timeline = options.include_timeline,
            alerts = options.include_alerts,
            "Enriching incidents"
        );

        let incident_ids: Vec<String> = incidents.iter().map(|i| i.incident_id.clone()).collect();

        // Timeline operators and assignees join the person lookup, so the
        // timelines have to be fetched before the fan-out starts.
        let timelines = if options.include_timeline {
            self.fetch_timelines(&incident_ids, token).await?
        } else {
            Vec::new()
        };

        let mut ids = collect_incident_ids(incidents);
        for items in &timelines {
            ids.persons.extend_ids(collect_timeline_person_ids(items).iter());
        }

        let plan = FanOutPlan::new()
            .with(EntityKind::Person, ids.persons, BranchPolicy::Required)
            .with(EntityKind::Channel, ids.channels, BranchPolicy::Required);

        let (resolutions, alert_pages) = tokio::try_join!(
            self.fan_out.run(plan, token),
            self.fetch_alert_pages(&incident_ids, options, token),
        )?;

        let mut enriched = enrich_incidents(incidents, &resolutions.persons, &resolutions.channels);

        for (incident, items) in enriched.iter_mut().zip(&timelines) {
            incident.timeline = enrich_timeline(items, &resolutions.persons);
        }
        for (incident, page) in enriched.iter_mut().zip(alert_pages) {
            incident.alerts_preview = page.alerts;
            incident.alerts_total = page.total;
        }

        Ok(enriched)
    }

    async fn fetch_timelines(
        &self,
        incident_ids: &[String],
        token: &CancellationToken,
    ) -> Result<Vec<Vec<RawTimelineItem>>, EnrichError> {
        let feed = Arc::clone(&self.feed);
        fetch_each(incident_ids, token, move |incident_id| {
            let feed = Arc::clone(&feed);
            async move { feed.fetch_timeline(&incident_id).await }
        })
        .await
    }

    async fn fetch_alert_pages(
        &self,
        incident_ids: &[String],
        options: EnrichIncidentsOptions,
        token: &CancellationToken,
    ) -> Result<Vec<AlertPage>, EnrichError> {
        if !options.include_alerts {
            return Ok(Vec::new());
        }
        let feed = Arc::clone(&self.feed);
        let limit = options.alerts_limit;
        fetch_each(incident_ids, token, move |incident_id| {
            let feed = Arc::clone(&feed);
            async move { feed.fetch_alerts(&incident_id, limit).await }
        })
        .await
    }
}
