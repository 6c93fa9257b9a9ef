//! Enrich escalation rules use case
//!
//! Every reference in an escalation rule is display sugar, so all four
//! lookups are best-effort.

use crate::enrichment::error::check_cancelled;
use crate::enrichment::{BranchPolicy, EnrichError, FanOut, FanOutPlan};
use crate::ports::incident_feed::IncidentFeedPort;
use crate::ports::lookup::LookupPort;
use crate::use_cases::shared::fetch_cancellable;
use duty_domain::{EscalationRule, collect_escalation_ids, enrich_escalation_rules};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct EnrichEscalationRulesUseCase<L: LookupPort + 'static, F: IncidentFeedPort + 'static> {
    fan_out: FanOut<L>,
    feed: Arc<F>,
}

impl<L: LookupPort + 'static, F: IncidentFeedPort + 'static> EnrichEscalationRulesUseCase<L, F> {
    pub fn new(lookup: Arc<L>, feed: Arc<F>) -> Self {
        Self {
            fan_out: FanOut::new(lookup),
            feed,
        }
    }

    pub async fn execute(
        &self,
        channel_id: i64,
        token: &CancellationToken,
    ) -> Result<Vec<EscalationRule>, EnrichError> {
        check_cancelled(token)?;

        let rules = fetch_cancellable(token, self.feed.fetch_escalation_rules(channel_id)).await?;
        info!(channel_id, rules = rules.len(), "Enriching escalation rules");
        if rules.is_empty() {
            return Ok(Vec::new());
        }

        let plan = FanOutPlan::from_collected(collect_escalation_ids(&rules), BranchPolicy::BestEffort);
        let resolutions = self.fan_out.run(plan, token).await?;

        Ok(enrich_escalation_rules(&rules, &resolutions))
    }
}
