//! Enrich changes use case

use crate::enrichment::error::check_cancelled;
use crate::enrichment::{BranchPolicy, EnrichError, FanOut, FanOutPlan};
use crate::ports::incident_feed::{ChangeFilter, IncidentFeedPort};
use crate::ports::lookup::LookupPort;
use crate::use_cases::shared::fetch_cancellable;
use duty_domain::{Change, collect_change_ids, enrich_changes};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Enriched changes plus the server-side total of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    pub changes: Vec<Change>,
    pub total: usize,
}

/// Use case for listing changes with channel and creator names
///
/// Both lookups are best-effort.
pub struct EnrichChangesUseCase<L: LookupPort + 'static, F: IncidentFeedPort + 'static> {
    fan_out: FanOut<L>,
    feed: Arc<F>,
}

impl<L: LookupPort + 'static, F: IncidentFeedPort + 'static> EnrichChangesUseCase<L, F> {
    pub fn new(lookup: Arc<L>, feed: Arc<F>) -> Self {
        Self {
            fan_out: FanOut::new(lookup),
            feed,
        }
    }

    pub async fn execute(
        &self,
        filter: &ChangeFilter,
        token: &CancellationToken,
    ) -> Result<ChangeReport, EnrichError> {
        check_cancelled(token)?;

        let page = fetch_cancellable(token, self.feed.fetch_changes(filter)).await?;
        info!(changes = page.items.len(), total = page.total, "Enriching changes");
        if page.items.is_empty() {
            return Ok(ChangeReport::default());
        }

        let plan = FanOutPlan::from_collected(collect_change_ids(&page.items), BranchPolicy::BestEffort);
        let resolutions = self.fan_out.run(plan, token).await?;

        Ok(ChangeReport {
            changes: enrich_changes(&page.items, &resolutions),
            total: page.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::api_error::ApiError;
    use crate::testing::{MockFeed, MockLookup};
    use duty_domain::{ChangePage, ChannelInfo, EntityKind, PersonInfo, RawChange};

    fn feed() -> MockFeed {
        let mut feed = MockFeed::new();
        feed.changes = ChangePage {
            items: vec![
                RawChange {
                    change_id: "c-1".to_string(),
                    title: "deploy api".to_string(),
                    channel_id: 3,
                    creator_id: 7,
                    ..Default::default()
                },
                RawChange {
                    change_id: "c-2".to_string(),
                    title: "bump config".to_string(),
                    channel_id: 4,
                    ..Default::default()
                },
            ],
            total: 42,
        };
        feed
    }

    #[tokio::test]
    async fn test_changes_enriched_with_total() {
        let lookup = Arc::new(
            MockLookup::new()
                .with_persons(vec![PersonInfo::new(7, "Alice")])
                .with_channels(vec![ChannelInfo::new(3, "Ops")]),
        );
        let use_case = EnrichChangesUseCase::new(Arc::clone(&lookup), Arc::new(feed()));

        let report = use_case
            .execute(&ChangeFilter::default(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.total, 42);
        assert_eq!(report.changes[0].channel_name, "Ops");
        assert_eq!(report.changes[0].creator_name, "Alice");
        assert_eq!(report.changes[1].channel_name, "");
        assert_eq!(lookup.calls_for(EntityKind::Channel), vec![vec![3, 4]]);
    }

    #[tokio::test]
    async fn test_channel_failure_degrades_persons_survive() {
        let lookup = Arc::new(
            MockLookup::new()
                .with_persons(vec![PersonInfo::new(7, "Alice")])
                .failing(EntityKind::Channel, ApiError::Transport("refused".to_string())),
        );
        let use_case = EnrichChangesUseCase::new(lookup, Arc::new(feed()));

        let report = use_case
            .execute(&ChangeFilter::default(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.changes[0].channel_id, 3);
        assert_eq!(report.changes[0].channel_name, "");
        assert_eq!(report.changes[0].creator_name, "Alice");
    }

    #[tokio::test]
    async fn test_empty_page_makes_no_lookups() {
        let lookup = Arc::new(MockLookup::new());
        let use_case = EnrichChangesUseCase::new(Arc::clone(&lookup), Arc::new(MockFeed::new()));

        let report = use_case
            .execute(&ChangeFilter::default(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report, ChangeReport::default());
        assert!(lookup.calls().is_empty());
    }
}
