//! Query members use case
//!
//! Members are either looked up by person id through the bulk person lookup
//! or listed page-wise with name and email filters.

use crate::enrichment::error::check_cancelled;
use crate::enrichment::{BatchResolver, EnrichError};
use crate::ports::directory::{DirectoryPort, MemberFilter};
use crate::ports::lookup::LookupPort;
use crate::use_cases::shared::fetch_cancellable;
use duty_domain::{IdSet, MemberInfo};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Which members to return.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberQuery {
    /// Person ids; when non-empty the filter is ignored
    pub ids: Vec<i64>,
    pub filter: MemberFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberReport {
    pub members: Vec<MemberInfo>,
    /// Server-side total when listing, number of hits when looking up ids
    pub total: usize,
}

pub struct QueryMembersUseCase<L: LookupPort + 'static, D: DirectoryPort + 'static> {
    resolver: BatchResolver<L>,
    directory: Arc<D>,
}

impl<L: LookupPort + 'static, D: DirectoryPort + 'static> QueryMembersUseCase<L, D> {
    pub fn new(lookup: Arc<L>, directory: Arc<D>) -> Self {
        Self {
            resolver: BatchResolver::new(lookup),
            directory,
        }
    }

    pub async fn execute(
        &self,
        query: &MemberQuery,
        token: &CancellationToken,
    ) -> Result<MemberReport, EnrichError> {
        check_cancelled(token)?;

        if query.ids.is_empty() {
            let page = fetch_cancellable(token, self.directory.list_members(&query.filter)).await?;
            info!(members = page.items.len(), total = page.total, "Listed members");
            return Ok(MemberReport {
                members: page.items,
                total: page.total,
            });
        }

        let wanted: IdSet = query.ids.iter().copied().collect();
        let mut found = self.resolver.resolve_persons(&wanted, token).await?;
        let members: Vec<MemberInfo> = query
            .ids
            .iter()
            .filter_map(|id| found.remove(id))
            .map(MemberInfo::from)
            .collect();
        info!(requested = wanted.len(), found = members.len(), "Looked up members");

        Ok(MemberReport {
            total: members.len(),
            members,
        })
    }
}
