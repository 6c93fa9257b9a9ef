//! Enrichment errors.

use crate::ports::api_error::ApiError;
use duty_domain::EntityKind;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that can occur while enriching records
#[derive(Error, Debug)]
pub enum EnrichError {
    /// A required lookup branch failed
    #[error("Failed to resolve {kind} names: {source}")]
    Resolve {
        kind: EntityKind,
        #[source]
        source: ApiError,
    },

    /// Fetching the raw records themselves failed
    #[error("Fetch failed: {0}")]
    Fetch(ApiError),

    /// A spawned branch panicked or was aborted unexpectedly
    #[error("Task failed: {0}")]
    TaskFailed(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl EnrichError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EnrichError::Cancelled)
    }
}

impl From<ApiError> for EnrichError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Cancelled => EnrichError::Cancelled,
            other => EnrichError::Fetch(other),
        }
    }
}

/// Return `Err(EnrichError::Cancelled)` once the token has fired.
pub(crate) fn check_cancelled(token: &CancellationToken) -> Result<(), EnrichError> {
    if token.is_cancelled() {
        return Err(EnrichError::Cancelled);
    }
    Ok(())
}
