//! Flashduty HTTP client
//!
//! Every endpoint is a `POST` with a JSON body, authenticated by an
//! `app_key` query parameter, answering with the envelope
//! `{"error": {"code", "message"}, "data": {...}}`.

use duty_application::ApiError;
use duty_domain::truncate_body_default;
use reqwest::{Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.flashcat.cloud";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Responses larger than this are rejected (10 MiB)
pub const MAX_RESPONSE_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Page size used when fetching an incident timeline
pub const DEFAULT_TIMELINE_LIMIT: usize = 100;

/// Response header carrying the server-side request id
pub const REQUEST_ID_HEADER: &str = "Flashcat-Request-Id";

const REDACTED: &str = "[REDACTED]";

/// Errors that can occur while constructing a [`DutyClient`]
#[derive(Error, Debug)]
pub enum DutyClientError {
    #[error("APP key is required")]
    MissingAppKey,

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

/// Connection settings for a [`DutyClient`]
#[derive(Debug, Clone)]
pub struct DutyClientConfig {
    pub base_url: String,
    pub app_key: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub timeline_limit: usize,
}

impl DutyClientConfig {
    pub fn new(app_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_key: app_key.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
            timeline_limit: DEFAULT_TIMELINE_LIMIT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeline_limit(mut self, limit: usize) -> Self {
        self.timeline_limit = limit;
        self
    }
}

pub fn default_user_agent() -> String {
    format!("duty-enrich/{}", env!("CARGO_PKG_VERSION"))
}

/// Client for the Flashduty open API
///
/// Built once at start-up and shared behind an `Arc`; it implements both
/// [`LookupPort`](duty_application::LookupPort) and
/// [`IncidentFeedPort`](duty_application::IncidentFeedPort).
pub struct DutyClient {
    http: reqwest::Client,
    base_url: Url,
    app_key: String,
    pub(crate) timeline_limit: usize,
}

impl std::fmt::Debug for DutyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DutyClient")
            .field("base_url", &self.base_url.as_str())
            .field("app_key", &REDACTED)
            .finish()
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    error: Option<DutyErrorBody>,
    data: Option<T>,
}

#[derive(Deserialize)]
struct DutyErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl DutyClient {
    pub fn new(config: DutyClientConfig) -> Result<Self, DutyClientError> {
        if config.app_key.trim().is_empty() {
            return Err(DutyClientError::MissingAppKey);
        }

        let base = if config.base_url.trim().is_empty() {
            DEFAULT_BASE_URL
        } else {
            config.base_url.trim()
        };
        let mut base_url = Url::parse(base).map_err(|e| DutyClientError::InvalidBaseUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DutyClientError::InvalidBaseUrl {
                url: base.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }
        // Relative joins replace the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if !config.user_agent.is_empty() {
            builder = builder.user_agent(config.user_agent);
        }
        let http = builder
            .build()
            .map_err(|e| DutyClientError::Build(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            app_key: config.app_key,
            timeline_limit: config.timeline_limit,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Transport(format!("failed to build URL for {path}: {e}")))?;
        url.query_pairs_mut().append_pair("app_key", &self.app_key);
        Ok(url)
    }

    /// POST `body` to `path` and decode the `data` member of the envelope.
    ///
    /// A missing `data` member decodes as `T::default()`.
    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let url = self.endpoint(path)?;
        let safe_url = sanitize_url(&url);
        let payload = serde_json::to_vec(body)
            .map_err(|e| ApiError::Decode(format!("invalid request body: {e}")))?;

        info!(
            method = "POST",
            url = %safe_url,
            body = %truncate_body_default(&String::from_utf8_lossy(&payload)),
            "duty request"
        );

        let response = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                ApiError::Transport(format!(
                    "request to POST {safe_url} failed: {}",
                    sanitize_error(&e.without_url().to_string())
                ))
            })?;

        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = read_limited(response, MAX_RESPONSE_BODY_SIZE).await?;
        let text = String::from_utf8_lossy(&bytes);
        let logged = truncate_body_default(&text);

        if status.is_server_error() {
            error!(status = status.as_u16(), request_id = %request_id, body = %logged, "duty response");
        } else if !status.is_success() {
            warn!(status = status.as_u16(), request_id = %request_id, body = %logged, "duty response");
        } else {
            info!(status = status.as_u16(), request_id = %request_id, body = %logged, "duty response");
        }

        if status != StatusCode::OK {
            return Err(ApiError::Http {
                status: status.as_u16(),
                request_id,
                body: logged,
            });
        }

        decode_envelope(&bytes, &request_id)
    }
}

fn decode_envelope<T>(bytes: &[u8], request_id: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    let envelope: Envelope<T> = serde_json::from_slice(bytes).map_err(|e| {
        ApiError::Decode(format!(
            "failed to parse JSON (response size: {} bytes, request_id: {}): {}",
            bytes.len(),
            request_id,
            e
        ))
    })?;

    if let Some(err) = envelope.error {
        return Err(ApiError::Api {
            code: err.code,
            message: err.message,
        });
    }
    Ok(envelope.data.unwrap_or_default())
}

async fn read_limited(mut response: Response, limit: usize) -> Result<Vec<u8>, ApiError> {
    if let Some(length) = response.content_length()
        && length > limit as u64
    {
        return Err(ApiError::Decode(format!(
            "response too large: {length} bytes (max: {limit} bytes)"
        )));
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|e| {
        ApiError::Transport(format!(
            "failed to read response body: {}",
            sanitize_error(&e.without_url().to_string())
        ))
    })? {
        if body.len() + chunk.len() > limit {
            return Err(ApiError::Decode(format!(
                "response too large: more than {limit} bytes"
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Render `url` with the `app_key` query parameter replaced by `[REDACTED]`.
pub fn sanitize_url(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "app_key") {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == "app_key" { REDACTED.to_string() } else { v.into_owned() };
            (k.into_owned(), value)
        })
        .collect();

    let mut sanitized = url.clone();
    sanitized.query_pairs_mut().clear().extend_pairs(pairs);
    sanitized.to_string()
}

/// Redact an `app_key=...` fragment embedded in an error message.
pub fn sanitize_error(message: &str) -> String {
    let Some(start) = message.find("app_key=") else {
        return message.to_string();
    };
    let value_start = start + "app_key=".len();
    let rest = &message[value_start..];
    match rest.find(['&', ' ', ')']) {
        Some(end) => format!("{}app_key={}{}", &message[..start], REDACTED, &rest[end..]),
        None => format!("{}app_key={}", &message[..start], REDACTED),
    }
}
