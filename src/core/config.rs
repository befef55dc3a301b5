//! # Configuration
//!
//! Settings resolve with a clear override hierarchy:
//! defaults → config file → env vars.
//!
//! Config lives at `~/.govote/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover the options.
//! The API key is the one required value; without it the fetch capability
//! cannot exist and startup fails.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use log::{info, warn};
use serde::Deserialize;

use crate::api::client::DEFAULT_BASE_URL;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Default, Deserialize)]
pub struct GovoteConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiConfig {
    pub key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Concrete values after resolution, no Options left.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// No API key in the environment or the config file. Fatal at startup.
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingApiKey => write!(
                f,
                "no API key configured: set CIVIC_API_KEY or api.key in ~/.govote/config.toml"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Returns the path to `~/.govote/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".govote").join("config.toml"))
}

/// Load config from `~/.govote/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and returns
/// `GovoteConfig::default()`. If it exists but is malformed, returns
/// `ConfigError::Parse`.
pub fn load_config() -> Result<GovoteConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(GovoteConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(GovoteConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: GovoteConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# govote configuration
# All settings are optional except the API key, which may also come from
# the CIVIC_API_KEY environment variable.
# Override hierarchy: defaults → this file → env vars.

# [api]
# key = "..."                # Google Civic Information API key
# base_url = "https://www.googleapis.com/civicinfo/v2/voterinfo"
# timeout_secs = 10
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

/// Resolve the final config by collapsing: defaults → config file → env.
///
/// The key is required; everything else has a default.
pub fn resolve(config: &GovoteConfig) -> Result<ResolvedConfig, ConfigError> {
    let api_key = std::env::var("CIVIC_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
        .or_else(|| config.api.key.clone())
        .ok_or(ConfigError::MissingApiKey)?;

    let base_url = std::env::var("CIVIC_API_BASE_URL")
        .ok()
        .filter(|u| !u.is_empty())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let timeout_secs = config.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(ResolvedConfig {
        api_key,
        base_url,
        timeout: Duration::from_secs(timeout_secs),
    })
}
