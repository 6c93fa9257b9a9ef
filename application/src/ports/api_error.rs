//! Errors surfaced by the remote incident-management API adapters.

use thiserror::Error;

/// Errors that can occur while talking to the remote API
///
/// Adapters in the infrastructure layer map their transport failures onto
/// these variants so the application layer never sees HTTP client types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status} (request id: {request_id}): {body}")]
    Http {
        status: u16,
        request_id: String,
        body: String,
    },

    #[error("API error: {code} - {message}")]
    Api { code: String, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}
