//! Shared paths and configuration for the Workshop Manager client
//!
//! Layout:
//! ```text
//! <config dir>/workshop_manager/
//! └── config.json      # persisted api_base_url
//! <WORKSHOP_ROOT or data dir>/workshop_manager/
//! └── session.json     # logged-in user (token + claims)
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const APP_DIR: &str = "workshop_manager";
pub const API_PREFIX: &str = "/api/v1";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct WorkshopConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
}

/// Get the global configuration path
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.json"))
}

/// Read a config file. Missing or unreadable files yield the default.
pub fn load_config_from(path: &Path) -> WorkshopConfig {
    if !path.exists() {
        return WorkshopConfig::default();
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<WorkshopConfig>(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to parse config file at {:?}: {}", path, e);
                WorkshopConfig::default()
            }
        },
        Err(e) => {
            warn!("Failed to read config file at {:?}: {}", path, e);
            WorkshopConfig::default()
        }
    }
}

pub fn save_config_to(path: &Path, config: &WorkshopConfig) -> anyhow::Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load the persisted configuration
pub fn load_persistent_config() -> WorkshopConfig {
    config_path()
        .map(|p| load_config_from(&p))
        .unwrap_or_default()
}

/// Persist an API base URL for later runs
pub fn save_persistent_base_url(url: &str) -> anyhow::Result<PathBuf> {
    let path = config_path().ok_or_else(|| anyhow::anyhow!("Could not determine config dir"))?;
    let mut config = load_config_from(&path);
    config.api_base_url = Some(url.trim_end_matches('/').to_string());
    save_config_to(&path, &config)?;
    info!("Saved API base URL {} to {:?}", url, path);
    Ok(path)
}

/// Pick the API base URL from the available sources, first match wins:
/// an explicit override, host (+ port), the persisted value, the default.
pub fn resolve_base_url(
    explicit: Option<String>,
    host: Option<String>,
    port: Option<String>,
    persisted: Option<String>,
) -> String {
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    if let Some(url) = non_empty(explicit) {
        return url.trim_end_matches('/').to_string();
    }
    if let Some(host) = non_empty(host) {
        let host = host.trim_end_matches('/');
        return match non_empty(port) {
            Some(port) => format!("{}:{}{}", host, port, API_PREFIX),
            None => format!("{}{}", host, API_PREFIX),
        };
    }
    non_empty(persisted).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// API base URL from `WORKSHOP_API_BASE_URL`, `WORKSHOP_API_URL` and
/// `WORKSHOP_API_PORT`, the persisted config, or the default
pub fn api_base_url() -> String {
    resolve_base_url(
        std::env::var("WORKSHOP_API_BASE_URL").ok(),
        std::env::var("WORKSHOP_API_URL").ok(),
        std::env::var("WORKSHOP_API_PORT").ok(),
        load_persistent_config().api_base_url,
    )
}

/// Get the WORKSHOP_ROOT directory from environment, platform data dir, or default
pub fn workshop_root() -> PathBuf {
    if let Ok(val) = std::env::var("WORKSHOP_ROOT") {
        return PathBuf::from(val);
    }

    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("workshop_data"))
}

/// Persisted session file path
pub fn session_path() -> PathBuf {
    workshop_root().join("session.json")
}

/// Ensure a file's parent directory exists
pub fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            info!("Created directory: {:?}", parent);
        }
    }
    Ok(())
}
