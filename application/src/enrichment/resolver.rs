//! Batch resolver: one bulk lookup per entity kind.

use crate::ports::api_error::ApiError;
use crate::ports::lookup::LookupPort;
use duty_domain::{
    ChannelInfo, IdSet, PersonInfo, Resolved, ResolvedMap, ScheduleInfo, TeamInfo, index_by_key,
};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Resolves an [`IdSet`] into a [`ResolvedMap`] with a single port call.
///
/// An empty set never reaches the port. The port call is raced against the
/// cancellation token so a fired token abandons the in-flight request.
pub struct BatchResolver<L: LookupPort + 'static> {
    lookup: Arc<L>,
}

impl<L: LookupPort + 'static> Clone for BatchResolver<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
        }
    }
}

impl<L: LookupPort + 'static> BatchResolver<L> {
    pub fn new(lookup: Arc<L>) -> Self {
        Self { lookup }
    }

    pub async fn resolve_persons(
        &self,
        ids: &IdSet,
        token: &CancellationToken,
    ) -> Result<ResolvedMap<PersonInfo>, ApiError> {
        if ids.is_empty() {
            return Ok(ResolvedMap::new());
        }
        let ids = ids.to_vec();
        race(&ids, token, self.lookup.fetch_persons(&ids)).await
    }

    pub async fn resolve_channels(
        &self,
        ids: &IdSet,
        token: &CancellationToken,
    ) -> Result<ResolvedMap<ChannelInfo>, ApiError> {
        if ids.is_empty() {
            return Ok(ResolvedMap::new());
        }
        let ids = ids.to_vec();
        race(&ids, token, self.lookup.fetch_channels(&ids)).await
    }

    pub async fn resolve_teams(
        &self,
        ids: &IdSet,
        token: &CancellationToken,
    ) -> Result<ResolvedMap<TeamInfo>, ApiError> {
        if ids.is_empty() {
            return Ok(ResolvedMap::new());
        }
        let ids = ids.to_vec();
        race(&ids, token, self.lookup.fetch_teams(&ids)).await
    }

    pub async fn resolve_schedules(
        &self,
        ids: &IdSet,
        token: &CancellationToken,
    ) -> Result<ResolvedMap<ScheduleInfo>, ApiError> {
        if ids.is_empty() {
            return Ok(ResolvedMap::new());
        }
        let ids = ids.to_vec();
        race(&ids, token, self.lookup.fetch_schedules(&ids)).await
    }
}

async fn race<R: Resolved>(
    ids: &[i64],
    token: &CancellationToken,
    fetch: impl Future<Output = Result<Vec<R>, ApiError>>,
) -> Result<ResolvedMap<R>, ApiError> {
    if token.is_cancelled() {
        return Err(ApiError::Cancelled);
    }

    let records = tokio::select! {
        biased;
        _ = token.cancelled() => return Err(ApiError::Cancelled),
        result = fetch => result?,
    };

    debug!(
        kind = %R::KIND,
        requested = ids.len(),
        resolved = records.len(),
        "Batch lookup complete"
    );
    Ok(index_by_key(records))
}
