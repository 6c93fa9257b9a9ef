//! Output rendering for enrichment results
//!
//! Results are wrapped in a small envelope (`{"incidents": [...], "total": 2}`)
//! and serialized in the format chosen at start-up.

use crate::output::toon;
use duty_domain::OutputFormat;
use serde::Serialize;
use serde_json::{Map, Value};

/// Renders serializable results in one fixed [`OutputFormat`]
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputRenderer {
    format: OutputFormat,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, serde_json::Error> {
        match self.format {
            OutputFormat::Json => serde_json::to_string(value),
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
            OutputFormat::Toon => toon::to_toon(value),
        }
    }

    /// Render `items` under `key` together with a `total` count.
    ///
    /// `total` is the number of items returned unless the server reported a
    /// larger one.
    pub fn render_listing<T: Serialize>(
        &self,
        key: &str,
        items: &[T],
        total: Option<usize>,
    ) -> Result<String, serde_json::Error> {
        let mut envelope = Map::new();
        envelope.insert(key.to_string(), serde_json::to_value(items)?);
        envelope.insert(
            "total".to_string(),
            Value::from(total.unwrap_or(items.len())),
        );
        self.render(&Value::Object(envelope))
    }
}
