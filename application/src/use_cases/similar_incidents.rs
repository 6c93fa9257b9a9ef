//! Similar incidents use case
//!
//! Asks the server for past incidents resembling a reference incident and
//! enriches them like any other incident list.

use crate::enrichment::EnrichError;
use crate::enrichment::error::check_cancelled;
use crate::ports::incident_feed::IncidentFeedPort;
use crate::ports::lookup::LookupPort;
use crate::use_cases::enrich_incidents::{EnrichIncidentsOptions, EnrichIncidentsUseCase};
use crate::use_cases::shared::fetch_cancellable;
use duty_domain::EnrichedIncident;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Enriched similar incidents plus the server-side number of matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimilarIncidents {
    pub incidents: Vec<EnrichedIncident>,
    pub total: usize,
}

pub struct SimilarIncidentsUseCase<L: LookupPort + 'static, F: IncidentFeedPort + 'static> {
    feed: Arc<F>,
    enrich: EnrichIncidentsUseCase<L, F>,
}

impl<L: LookupPort + 'static, F: IncidentFeedPort + 'static> SimilarIncidentsUseCase<L, F> {
    pub fn new(lookup: Arc<L>, feed: Arc<F>) -> Self {
        Self {
            enrich: EnrichIncidentsUseCase::new(lookup, Arc::clone(&feed)),
            feed,
        }
    }

    /// Persons and channels are both required, as for any incident list.
    pub async fn execute(
        &self,
        incident_id: &str,
        limit: usize,
        token: &CancellationToken,
    ) -> Result<SimilarIncidents, EnrichError> {
        check_cancelled(token)?;

        let page = fetch_cancellable(token, self.feed.fetch_similar_incidents(incident_id, limit))
            .await?;
        info!(
            incident_id,
            found = page.items.len(),
            total = page.total,
            "Fetched similar incidents"
        );
        if page.items.is_empty() {
            return Ok(SimilarIncidents::default());
        }

        let incidents = self
            .enrich
            .execute(&page.items, EnrichIncidentsOptions::default(), token)
            .await?;
        Ok(SimilarIncidents {
            incidents,
            total: page.total,
        })
    }
}
