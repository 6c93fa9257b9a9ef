//! Enrich channels use case
//!
//! Fills in team and creator names for collaboration channels. Both lookups
//! are best-effort: a channel list without team names is still useful.

use crate::enrichment::error::check_cancelled;
use crate::enrichment::{BatchResolver, BranchPolicy, EnrichError, FanOut, FanOutPlan};
use crate::ports::incident_feed::IncidentFeedPort;
use crate::ports::lookup::LookupPort;
use crate::use_cases::shared::fetch_cancellable;
use duty_domain::{ChannelInfo, IdSet, collect_channel_ids, enrich_channels};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Which channels to list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelQuery {
    /// Explicit channel ids; when empty all channels are listed
    pub ids: Vec<i64>,
    /// Case-insensitive substring filter on the channel name
    pub name: Option<String>,
}

pub struct EnrichChannelsUseCase<L: LookupPort + 'static, F: IncidentFeedPort + 'static> {
    resolver: BatchResolver<L>,
    feed: Arc<F>,
    fan_out: FanOut<L>,
}

impl<L: LookupPort + 'static, F: IncidentFeedPort + 'static> EnrichChannelsUseCase<L, F> {
    pub fn new(lookup: Arc<L>, feed: Arc<F>) -> Self {
        Self {
            resolver: BatchResolver::new(Arc::clone(&lookup)),
            fan_out: FanOut::new(lookup),
            feed,
        }
    }

    /// Fetch the channels selected by `query`, then enrich them.
    pub async fn query(
        &self,
        query: &ChannelQuery,
        token: &CancellationToken,
    ) -> Result<Vec<ChannelInfo>, EnrichError> {
        let channels = if query.ids.is_empty() {
            fetch_cancellable(token, self.feed.list_channels()).await?
        } else {
            self.fetch_by_ids(&query.ids, token).await?
        };

        let channels = match query.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                let needle = name.to_lowercase();
                channels
                    .into_iter()
                    .filter(|c| c.channel_name.to_lowercase().contains(&needle))
                    .collect()
            }
            _ => channels,
        };
        debug!(channels = channels.len(), "Channels selected");

        self.execute(&channels, token).await
    }

    /// One bulk lookup for the distinct non-zero ids, answered in the order
    /// the ids were first requested.
    async fn fetch_by_ids(
        &self,
        ids: &[i64],
        token: &CancellationToken,
    ) -> Result<Vec<ChannelInfo>, EnrichError> {
        let wanted: IdSet = ids.iter().copied().collect();
        let mut found = self.resolver.resolve_channels(&wanted, token).await?;
        Ok(ids.iter().filter_map(|id| found.remove(id)).collect())
    }

    pub async fn execute(
        &self,
        channels: &[ChannelInfo],
        token: &CancellationToken,
    ) -> Result<Vec<ChannelInfo>, EnrichError> {
        check_cancelled(token)?;
        if channels.is_empty() {
            return Ok(Vec::new());
        }
        info!(channels = channels.len(), "Enriching channels");

        let plan = FanOutPlan::from_collected(collect_channel_ids(channels), BranchPolicy::BestEffort);
        let resolutions = self.fan_out.run(plan, token).await?;

        Ok(enrich_channels(
            channels,
            &resolutions.teams,
            &resolutions.persons,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::api_error::ApiError;
    use crate::testing::{MockFeed, MockLookup};
    use duty_domain::{EntityKind, PersonInfo, TeamInfo};

    fn channels() -> Vec<ChannelInfo> {
        vec![
            ChannelInfo::new(3, "Ops").with_team(10).with_creator(7),
            ChannelInfo::new(4, "Payments").with_team(11).with_creator(7),
            ChannelInfo::new(5, "ops-staging"),
        ]
    }

    fn lookup() -> MockLookup {
        MockLookup::new()
            .with_persons(vec![PersonInfo::new(7, "Alice")])
            .with_teams(vec![TeamInfo::new(10, "SRE")])
            .with_channels(channels())
    }

    #[tokio::test]
    async fn test_team_and_creator_names() {
        let lookup = Arc::new(lookup());
        let use_case = EnrichChannelsUseCase::new(Arc::clone(&lookup), Arc::new(MockFeed::new()));

        let enriched = use_case
            .execute(&channels(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(lookup.calls_for(EntityKind::Team), vec![vec![10, 11]]);
        assert_eq!(lookup.calls_for(EntityKind::Person), vec![vec![7]]);
        assert_eq!(enriched[0].team_name, "SRE");
        assert_eq!(enriched[0].creator_name, "Alice");
        assert_eq!(enriched[1].team_id, 11);
        assert_eq!(enriched[1].team_name, "");
        assert_eq!(enriched[1].creator_name, "Alice");
    }

    #[tokio::test]
    async fn test_team_failure_degrades() {
        let lookup = Arc::new(lookup().failing(EntityKind::Team, ApiError::Decode("eof".to_string())));
        let use_case = EnrichChannelsUseCase::new(lookup, Arc::new(MockFeed::new()));

        let enriched = use_case
            .execute(&channels(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(enriched[0].team_name, "");
        assert_eq!(enriched[0].creator_name, "Alice");
    }

    #[tokio::test]
    async fn test_query_lists_and_filters_by_name() {
        let mut feed = MockFeed::new();
        feed.channels = channels();
        let feed = Arc::new(feed);
        let use_case = EnrichChannelsUseCase::new(Arc::new(lookup()), Arc::clone(&feed));

        let query = ChannelQuery {
            ids: Vec::new(),
            name: Some("OPS".to_string()),
        };
        let enriched = use_case.query(&query, &CancellationToken::new()).await.unwrap();

        let names: Vec<&str> = enriched.iter().map(|c| c.channel_name.as_str()).collect();
        assert_eq!(names, vec!["Ops", "ops-staging"]);
        assert_eq!(feed.calls(), vec!["list_channels:".to_string()]);
    }

    #[tokio::test]
    async fn test_query_by_ids_keeps_requested_order() {
        let lookup = Arc::new(lookup());
        let feed = Arc::new(MockFeed::new());
        let use_case = EnrichChannelsUseCase::new(Arc::clone(&lookup), Arc::clone(&feed));

        let query = ChannelQuery {
            ids: vec![4, 3],
            name: None,
        };
        let enriched = use_case.query(&query, &CancellationToken::new()).await.unwrap();

        let ids: Vec<i64> = enriched.iter().map(|c| c.channel_id).collect();
        assert_eq!(ids, vec![4, 3]);
        assert_eq!(lookup.calls_for(EntityKind::Channel), vec![vec![3, 4]]);
        assert!(feed.calls().is_empty());
    }

    #[tokio::test]
    async fn test_query_by_ids_deduplicates_request() {
        let lookup = Arc::new(lookup());
        let use_case = EnrichChannelsUseCase::new(Arc::clone(&lookup), Arc::new(MockFeed::new()));

        let query = ChannelQuery {
            ids: vec![4, 3, 4, 0, 3],
            name: None,
        };
        let enriched = use_case.query(&query, &CancellationToken::new()).await.unwrap();

        assert_eq!(lookup.calls_for(EntityKind::Channel), vec![vec![3, 4]]);
        let ids: Vec<i64> = enriched.iter().map(|c| c.channel_id).collect();
        assert_eq!(ids, vec![4, 3]);
    }

    #[tokio::test]
    async fn test_query_by_zero_ids_makes_no_lookup() {
        let lookup = Arc::new(lookup());
        let use_case = EnrichChannelsUseCase::new(Arc::clone(&lookup), Arc::new(MockFeed::new()));

        let query = ChannelQuery {
            ids: vec![0, 0],
            name: None,
        };
        let enriched = use_case.query(&query, &CancellationToken::new()).await.unwrap();

        assert!(enriched.is_empty());
        assert!(lookup.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_channels_make_no_calls() {
        let lookup = Arc::new(lookup());
        let use_case = EnrichChannelsUseCase::new(Arc::clone(&lookup), Arc::new(MockFeed::new()));

        let enriched = use_case.execute(&[], &CancellationToken::new()).await.unwrap();

        assert!(enriched.is_empty());
        assert!(lookup.calls().is_empty());
    }
}
