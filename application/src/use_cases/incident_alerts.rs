//! Incident alerts use case
//!
//! Lists the alerts grouped into each incident, one concurrent fetch per
//! incident.

use crate::enrichment::EnrichError;
use crate::enrichment::error::check_cancelled;
use crate::ports::api_error::ApiError;
use crate::ports::incident_feed::IncidentFeedPort;
use crate::use_cases::shared::fetch_each;
use duty_domain::IncidentAlerts;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct IncidentAlertsUseCase<F: IncidentFeedPort + 'static> {
    feed: Arc<F>,
}

impl<F: IncidentFeedPort + 'static> IncidentAlertsUseCase<F> {
    pub fn new(feed: Arc<F>) -> Self {
        Self { feed }
    }

    pub async fn execute(
        &self,
        incident_ids: &[String],
        limit: usize,
        token: &CancellationToken,
    ) -> Result<Vec<IncidentAlerts>, EnrichError> {
        check_cancelled(token)?;
        if incident_ids.is_empty() {
            return Ok(Vec::new());
        }
        info!(incidents = incident_ids.len(), limit, "Fetching incident alerts");

        let feed = Arc::clone(&self.feed);
        fetch_each(incident_ids, token, move |incident_id| {
            let feed = Arc::clone(&feed);
            async move {
                let page = feed.fetch_alerts(&incident_id, limit).await?;
                Ok::<_, ApiError>(IncidentAlerts {
                    incident_id,
                    alerts: page.alerts,
                    total: page.total,
                })
            }
        })
        .await
    }
}
