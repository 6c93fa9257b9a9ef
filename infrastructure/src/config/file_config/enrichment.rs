//! Enrichment settings (`[enrichment]` section)

use crate::duty::DEFAULT_TIMELINE_LIMIT;
use serde::{Deserialize, Serialize};

/// Upper bound the API accepts for page sizes
pub const MAX_PAGE_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEnrichmentConfig {
    /// Alerts previewed per incident
    pub alerts_limit: usize,
    /// Timeline entries fetched per incident
    pub timeline_limit: usize,
}

impl Default for FileEnrichmentConfig {
    fn default() -> Self {
        Self {
            alerts_limit: 20,
            timeline_limit: DEFAULT_TIMELINE_LIMIT,
        }
    }
}
