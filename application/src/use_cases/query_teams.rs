//! Query teams use case

use crate::enrichment::error::check_cancelled;
use crate::enrichment::{BatchResolver, EnrichError};
use crate::ports::directory::{DirectoryPort, TeamFilter};
use crate::ports::lookup::LookupPort;
use crate::use_cases::shared::fetch_cancellable;
use duty_domain::{IdSet, TeamInfo};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Which teams to return.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamQuery {
    /// Team ids; when non-empty the filter is ignored
    pub ids: Vec<i64>,
    pub filter: TeamFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamReport {
    pub teams: Vec<TeamInfo>,
    pub total: usize,
}

/// Teams by id go through the bulk team lookup, otherwise `/team/list`.
pub struct QueryTeamsUseCase<L: LookupPort + 'static, D: DirectoryPort + 'static> {
    resolver: BatchResolver<L>,
    directory: Arc<D>,
}

impl<L: LookupPort + 'static, D: DirectoryPort + 'static> QueryTeamsUseCase<L, D> {
    pub fn new(lookup: Arc<L>, directory: Arc<D>) -> Self {
        Self {
            resolver: BatchResolver::new(lookup),
            directory,
        }
    }

    pub async fn execute(
        &self,
        query: &TeamQuery,
        token: &CancellationToken,
    ) -> Result<TeamReport, EnrichError> {
        check_cancelled(token)?;

        if query.ids.is_empty() {
            let page = fetch_cancellable(token, self.directory.list_teams(&query.filter)).await?;
            info!(teams = page.items.len(), total = page.total, "Listed teams");
            return Ok(TeamReport {
                teams: page.items,
                total: page.total,
            });
        }

        let wanted: IdSet = query.ids.iter().copied().collect();
        let mut found = self.resolver.resolve_teams(&wanted, token).await?;
        let teams: Vec<TeamInfo> = query.ids.iter().filter_map(|id| found.remove(id)).collect();
        info!(requested = wanted.len(), found = teams.len(), "Looked up teams");

        Ok(TeamReport {
            total: teams.len(),
            teams,
        })
    }
}
