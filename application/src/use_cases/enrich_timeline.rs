//! Enrich timeline use case
//!
//! Fetches the timelines of several incidents concurrently and resolves every
//! person they mention with a single lookup.

use crate::enrichment::error::check_cancelled;
use crate::enrichment::{BranchPolicy, EnrichError, FanOut, FanOutPlan};
use crate::ports::incident_feed::IncidentFeedPort;
use crate::ports::lookup::LookupPort;
use crate::use_cases::shared::fetch_each;
use duty_domain::{
    EntityKind, IdSet, IncidentTimeline, RawTimelineItem, collect_timeline_person_ids,
    enrich_timeline, has_well_formed_person_fields,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub struct EnrichTimelineUseCase<L: LookupPort + 'static, F: IncidentFeedPort + 'static> {
    fan_out: FanOut<L>,
    feed: Arc<F>,
}

impl<L: LookupPort + 'static, F: IncidentFeedPort + 'static> EnrichTimelineUseCase<L, F> {
    pub fn new(lookup: Arc<L>, feed: Arc<F>) -> Self {
        Self {
            fan_out: FanOut::new(lookup),
            feed,
        }
    }

    pub async fn execute(
        &self,
        incident_ids: &[String],
        token: &CancellationToken,
    ) -> Result<Vec<IncidentTimeline>, EnrichError> {
        check_cancelled(token)?;
        if incident_ids.is_empty() {
            return Ok(Vec::new());
        }
        info!(incidents = incident_ids.len(), "Fetching incident timelines");

        let feed = Arc::clone(&self.feed);
        let timelines: Vec<Vec<RawTimelineItem>> = fetch_each(incident_ids, token, move |incident_id| {
            let feed = Arc::clone(&feed);
            async move { feed.fetch_timeline(&incident_id).await }
        })
        .await?;

        let mut persons = IdSet::new();
        for (incident_id, items) in incident_ids.iter().zip(&timelines) {
            persons.extend_ids(collect_timeline_person_ids(items).iter());
            for item in items.iter().filter(|i| !has_well_formed_person_fields(i)) {
                warn!(
                    incident_id = %incident_id,
                    event_type = %item.event_type,
                    "Timeline detail has malformed person fields, leaving them as is"
                );
            }
        }

        let plan = FanOutPlan::new().with(EntityKind::Person, persons, BranchPolicy::Required);
        let resolutions = self.fan_out.run(plan, token).await?;

        Ok(incident_ids
            .iter()
            .zip(timelines)
            .map(|(incident_id, items)| {
                IncidentTimeline::new(incident_id.clone(), enrich_timeline(&items, &resolutions.persons))
            })
            .collect())
    }
}
