//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tod/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::service::graph::DEFAULT_GRAPH_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TodConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub graph: GraphConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub max_tasks: Option<usize>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GraphConfig {
    pub base_url: Option<String>,
    pub access_token: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MAX_TASKS: usize = 100;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Resolved Config (concrete values)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub graph_base_url: String,
    pub access_token: Option<String>,
    pub max_tasks: usize,
    /// `None` lets a hung call spin forever.
    pub request_timeout: Option<Duration>,
}

/// Values given on the command line; `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub max_tasks: Option<usize>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tod/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tod").join("config.toml"))
}

/// Load config from `~/.tod/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TodConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TodConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TodConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<TodConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TodConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TodConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: max_tasks={:?}, timeout={:?}, base_url={:?}, token set={}",
        config.general.max_tasks,
        config.general.request_timeout_secs,
        config.graph.base_url,
        config.graph.access_token.is_some());
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# tod Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# max_tasks = 100                    # Tasks fetched per list
# request_timeout_secs = 30          # 0 waits forever

# [graph]
# base_url = "https://graph.microsoft.com/v1.0"   # Or set TOD_GRAPH_BASE_URL
# access_token = "eyJ0eXAi..."                     # Or set TOD_ACCESS_TOKEN
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

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TodConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: env → config → default
    let graph_base_url = std::env::var("TOD_GRAPH_BASE_URL")
        .ok()
        .or_else(|| config.graph.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.to_string());

    // Token: env → config
    let access_token = std::env::var("TOD_ACCESS_TOKEN")
        .ok()
        .or_else(|| config.graph.access_token.clone());

    let max_tasks = cli
        .max_tasks
        .or(config.general.max_tasks)
        .unwrap_or(DEFAULT_MAX_TASKS);

    let timeout_secs = cli
        .timeout_secs
        .or(config.general.request_timeout_secs)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

    ResolvedConfig {
        graph_base_url,
        access_token,
        max_tasks,
        request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
    }
}
