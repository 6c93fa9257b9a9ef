//! Query incidents use case
//!
//! Fetches raw incidents either by id or by server-side filter, then hands
//! them to [`EnrichIncidentsUseCase`].

use crate::enrichment::EnrichError;
use crate::enrichment::error::check_cancelled;
use crate::ports::incident_feed::{IncidentFeedPort, IncidentFilter};
use crate::ports::lookup::LookupPort;
use crate::use_cases::enrich_incidents::{EnrichIncidentsOptions, EnrichIncidentsUseCase};
use crate::use_cases::shared::fetch_cancellable;
use duty_domain::EnrichedIncident;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Which incidents to fetch and what to attach to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentQuery {
    /// Explicit incident ids; when non-empty the filter is ignored
    pub ids: Vec<String>,
    pub filter: IncidentFilter,
    pub options: EnrichIncidentsOptions,
}

pub struct QueryIncidentsUseCase<L: LookupPort + 'static, F: IncidentFeedPort + 'static> {
    feed: Arc<F>,
    enrich: EnrichIncidentsUseCase<L, F>,
}

impl<L: LookupPort + 'static, F: IncidentFeedPort + 'static> QueryIncidentsUseCase<L, F> {
    pub fn new(lookup: Arc<L>, feed: Arc<F>) -> Self {
        Self {
            enrich: EnrichIncidentsUseCase::new(lookup, Arc::clone(&feed)),
            feed,
        }
    }

    pub async fn execute(
        &self,
        query: &IncidentQuery,
        token: &CancellationToken,
    ) -> Result<Vec<EnrichedIncident>, EnrichError> {
        check_cancelled(token)?;

        let raw = if query.ids.is_empty() {
            fetch_cancellable(token, self.feed.fetch_incidents(&query.filter)).await?
        } else {
            fetch_cancellable(token, self.feed.fetch_incidents_by_ids(&query.ids)).await?
        };
        debug!(incidents = raw.len(), "Fetched raw incidents");

        self.enrich.execute(&raw, query.options, token).await
    }
}
