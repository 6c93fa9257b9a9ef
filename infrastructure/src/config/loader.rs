//! Configuration file loader with multi-source merging

use super::file_config::{ConfigError, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "duty-enrich";
const PROJECT_FILES: [&str; 2] = ["duty.toml", ".duty.toml"];
const ENV_PREFIX: &str = "DUTY_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `DUTY_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./duty.toml` or `./.duty.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/duty-enrich/config.toml`
    /// 5. Default values
    ///
    /// The result is not validated; CLI overrides are applied first.
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        Self::load_from(Self::global_config_path().as_deref(), config_path)
    }

    fn load_from(
        global_path: Option<&Path>,
        config_path: Option<&Path>,
    ) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global_path.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        Self::extract(figment)
    }

    /// Load defaults plus `DUTY_*` environment, skipping every file (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, ConfigError> {
        Self::extract(Figment::new().merge(Serialized::defaults(FileConfig::default())))
    }

    fn extract(figment: Figment) -> Result<FileConfig, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).filter_map(|key| {
                env_key_path(&key.as_str().to_ascii_lowercase()).map(Into::into)
            }))
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/duty-enrich/config.toml if set,
    /// otherwise falls back to ~/.config/duty-enrich/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {ENV_PREFIX}APP_KEY, {ENV_PREFIX}BASE_URL, ...");

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{mark:^5}] Explicit: {}", path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./duty.toml or ./.duty.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

/// Map a `DUTY_`-stripped, lowercased variable name onto its config key.
fn env_key_path(key: &str) -> Option<&'static str> {
    match key {
        "app_key" => Some("api.app_key"),
        "base_url" => Some("api.base_url"),
        "timeout_seconds" | "timeout" => Some("api.timeout_seconds"),
        "user_agent" => Some("api.user_agent"),
        "output" | "format" => Some("output.format"),
        "alerts_limit" => Some("enrichment.alerts_limit"),
        "timeline_limit" => Some("enrichment.timeline_limit"),
        _ => None,
    }
}
