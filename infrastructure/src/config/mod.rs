//! Configuration file loading for duty-enrich
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DUTY_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./duty.toml` or `./.duty.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/duty-enrich/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, FileApiConfig, FileConfig, FileEnrichmentConfig, FileOutputConfig,
    MAX_PAGE_LIMIT,
};
pub use loader::ConfigLoader;
