//! Flashduty open API adapter
//!
//! [`DutyClient`] implements the application's lookup, feed and directory
//! ports over HTTP.

mod client;
mod directory;
mod feed;
mod lookup;
mod wire;

#[cfg(test)]
mod test_server;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_TIMELINE_LIMIT, DEFAULT_TIMEOUT, DutyClient, DutyClientConfig,
    DutyClientError, MAX_RESPONSE_BODY_SIZE, REQUEST_ID_HEADER, default_user_agent, sanitize_error,
    sanitize_url,
};
