//! Shared utilities for use cases.
//!
//! Cancellable single fetches and concurrent per-incident fetches.

use crate::enrichment::EnrichError;
use crate::enrichment::error::check_cancelled;
use crate::ports::api_error::ApiError;
use std::future::Future;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Await a port call unless the token fires first.
pub(crate) async fn fetch_cancellable<T>(
    token: &CancellationToken,
    fetch: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, EnrichError> {
    check_cancelled(token)?;
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(EnrichError::Cancelled),
        result = fetch => result.map_err(EnrichError::from),
    }
}

/// Run `fetch` once per incident id concurrently.
///
/// Results come back in the order of `incident_ids`. The first failure
/// aborts the remaining fetches.
pub(crate) async fn fetch_each<T, Fut>(
    incident_ids: &[String],
    token: &CancellationToken,
    fetch: impl Fn(String) -> Fut,
) -> Result<Vec<T>, EnrichError>
where
    T: Send + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    check_cancelled(token)?;

    let fetch_token = token.child_token();
    let mut join_set = JoinSet::new();
    for (index, incident_id) in incident_ids.iter().enumerate() {
        let request = fetch(incident_id.clone());
        let fetch_token = fetch_token.clone();
        join_set.spawn(async move {
            let result = tokio::select! {
                biased;
                _ = fetch_token.cancelled() => Err(ApiError::Cancelled),
                result = request => result,
            };
            (index, result)
        });
    }

    let mut slots: Vec<Option<T>> = incident_ids.iter().map(|_| None).collect();
    while let Some(joined) = join_set.join_next().await {
        let failure = match joined {
            Ok((index, Ok(value))) => {
                slots[index] = Some(value);
                continue;
            }
            Ok((_, Err(_))) if token.is_cancelled() => EnrichError::Cancelled,
            Ok((_, Err(e))) => EnrichError::from(e),
            Err(e) => EnrichError::TaskFailed(e.to_string()),
        };
        fetch_token.cancel();
        join_set.abort_all();
        return Err(failure);
    }

    Ok(slots.into_iter().flatten().collect())
}
