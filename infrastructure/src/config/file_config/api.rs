//! API connection settings (`[api]` section)

use crate::duty::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, default_user_agent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Flashduty API endpoint
    pub base_url: String,
    /// Flashduty APP key (required)
    pub app_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_key: None,
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl FileApiConfig {
    /// The APP key, if set to something other than whitespace.
    pub fn app_key(&self) -> Option<&str> {
        self.app_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
