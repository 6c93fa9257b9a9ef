//! `[output]` section

use duty_domain::OutputFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub format: Option<OutputFormat>,
}

impl FileOutputConfig {
    /// The format to render with: `requested` (the `--output` flag) first,
    /// then the configured one, then JSON.
    pub fn resolve(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.or(self.format).unwrap_or_default()
    }
}
