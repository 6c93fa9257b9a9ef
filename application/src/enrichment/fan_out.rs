//! Fan-out coordinator
//!
//! Runs one batched lookup per entity kind concurrently and merges the
//! results into a single [`Resolutions`]. Each branch carries a
//! [`BranchPolicy`] deciding whether its failure aborts the whole join or
//! merely leaves the names of that kind blank.

use super::error::{EnrichError, check_cancelled};
use super::resolver::BatchResolver;
use crate::ports::api_error::ApiError;
use crate::ports::lookup::LookupPort;
use duty_domain::{
    ChannelInfo, CollectedIds, EntityKind, IdSet, PersonInfo, Resolutions, ResolvedMap,
    ScheduleInfo, TeamInfo,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// What a failing lookup branch does to the join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchPolicy {
    /// Failure aborts the join and is reported to the caller
    Required,
    /// Failure is logged and the kind resolves to an empty map
    BestEffort,
}

#[derive(Debug, Clone)]
struct Branch {
    kind: EntityKind,
    ids: IdSet,
    policy: BranchPolicy,
}

/// The set of lookups one enrichment call needs.
#[derive(Debug, Clone, Default)]
pub struct FanOutPlan {
    branches: Vec<Branch>,
}

impl FanOutPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan a lookup of `ids` for `kind`. Planning a kind twice merges the
    /// id sets and keeps the stricter policy.
    pub fn with(mut self, kind: EntityKind, ids: IdSet, policy: BranchPolicy) -> Self {
        if let Some(branch) = self.branches.iter_mut().find(|b| b.kind == kind) {
            branch.ids.extend_ids(ids.iter());
            if policy == BranchPolicy::Required {
                branch.policy = BranchPolicy::Required;
            }
        } else {
            self.branches.push(Branch { kind, ids, policy });
        }
        self
    }

    /// Plan every non-empty kind of `ids` under the same policy.
    pub fn from_collected(ids: CollectedIds, policy: BranchPolicy) -> Self {
        let CollectedIds {
            persons,
            channels,
            teams,
            schedules,
        } = ids;
        [
            (EntityKind::Person, persons),
            (EntityKind::Channel, channels),
            (EntityKind::Team, teams),
            (EntityKind::Schedule, schedules),
        ]
        .into_iter()
        .filter(|(_, set)| !set.is_empty())
        .fold(Self::new(), |plan, (kind, set)| plan.with(kind, set, policy))
    }

    pub fn policy(&self, kind: EntityKind) -> Option<BranchPolicy> {
        self.branches
            .iter()
            .find(|b| b.kind == kind)
            .map(|b| b.policy)
    }

    pub fn ids(&self, kind: EntityKind) -> Option<&IdSet> {
        self.branches.iter().find(|b| b.kind == kind).map(|b| &b.ids)
    }

    /// True when no branch has any id to look up.
    pub fn is_empty(&self) -> bool {
        self.branches.iter().all(|b| b.ids.is_empty())
    }
}

enum BranchOutput {
    Persons(ResolvedMap<PersonInfo>),
    Channels(ResolvedMap<ChannelInfo>),
    Teams(ResolvedMap<TeamInfo>),
    Schedules(ResolvedMap<ScheduleInfo>),
}

impl BranchOutput {
    fn merge_into(self, resolutions: &mut Resolutions) {
        match self {
            BranchOutput::Persons(map) => resolutions.persons = map,
            BranchOutput::Channels(map) => resolutions.channels = map,
            BranchOutput::Teams(map) => resolutions.teams = map,
            BranchOutput::Schedules(map) => resolutions.schedules = map,
        }
    }
}

/// Concurrent resolution of a [`FanOutPlan`].
///
/// Every branch runs in its own task on a [`JoinSet`] and observes a child
/// of the caller's token, so aborting the join stops the siblings without
/// cancelling the caller.
pub struct FanOut<L: LookupPort + 'static> {
    resolver: BatchResolver<L>,
}

impl<L: LookupPort + 'static> Clone for FanOut<L> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
        }
    }
}

impl<L: LookupPort + 'static> FanOut<L> {
    pub fn new(lookup: Arc<L>) -> Self {
        Self {
            resolver: BatchResolver::new(lookup),
        }
    }

    pub async fn run(
        &self,
        plan: FanOutPlan,
        token: &CancellationToken,
    ) -> Result<Resolutions, EnrichError> {
        check_cancelled(token)?;

        let mut resolutions = Resolutions::new();
        if plan.is_empty() {
            return Ok(resolutions);
        }

        let branch_token = token.child_token();
        let mut join_set = JoinSet::new();

        for branch in plan.branches.into_iter().filter(|b| !b.ids.is_empty()) {
            let resolver = self.resolver.clone();
            let branch_token = branch_token.clone();
            join_set.spawn(async move {
                let result = resolve_branch(&resolver, branch.kind, &branch.ids, &branch_token).await;
                (branch.kind, branch.policy, result)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            let (kind, policy, result) = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    branch_token.cancel();
                    join_set.abort_all();
                    if token.is_cancelled() {
                        return Err(EnrichError::Cancelled);
                    }
                    return Err(EnrichError::TaskFailed(e.to_string()));
                }
            };

            match result {
                Ok(resolved) => resolved.merge_into(&mut resolutions),
                Err(source) if source.is_cancelled() || token.is_cancelled() => {
                    branch_token.cancel();
                    join_set.abort_all();
                    return Err(EnrichError::Cancelled);
                }
                Err(source) => match policy {
                    BranchPolicy::Required => {
                        branch_token.cancel();
                        join_set.abort_all();
                        return Err(EnrichError::Resolve { kind, source });
                    }
                    BranchPolicy::BestEffort => {
                        warn!(kind = %kind, error = %source, "Lookup failed, continuing without names");
                    }
                },
            }
        }

        debug!(
            persons = resolutions.persons.len(),
            channels = resolutions.channels.len(),
            teams = resolutions.teams.len(),
            schedules = resolutions.schedules.len(),
            "Fan-out complete"
        );
        Ok(resolutions)
    }
}

async fn resolve_branch<L: LookupPort + 'static>(
    resolver: &BatchResolver<L>,
    kind: EntityKind,
    ids: &IdSet,
    token: &CancellationToken,
) -> Result<BranchOutput, ApiError> {
    Ok(match kind {
        EntityKind::Person => BranchOutput::Persons(resolver.resolve_persons(ids, token).await?),
        EntityKind::Channel => BranchOutput::Channels(resolver.resolve_channels(ids, token).await?),
        EntityKind::Team => BranchOutput::Teams(resolver.resolve_teams(ids, token).await?),
        EntityKind::Schedule => {
            BranchOutput::Schedules(resolver.resolve_schedules(ids, token).await?)
        }
    })
}
