//! Infrastructure layer for duty-enrich
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod duty;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileApiConfig, FileConfig, FileEnrichmentConfig, FileOutputConfig,
};
pub use duty::{DutyClient, DutyClientConfig, DutyClientError, sanitize_error, sanitize_url};
