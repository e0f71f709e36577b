use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::constants::{API_KEY_ENV, API_URL_ENV, CONFIG_FILE, DEFAULT_API_URL, DEFAULT_ORG_ENV};
use crate::error::{OrgError, OrgResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub default_org: Option<String>,
    #[serde(default = "default_enable_colors")]
    pub enable_colors: bool,
}

fn default_enable_colors() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            api_url: None,
            default_org: None,
            enable_colors: true,
        }
    }
}

impl Config {
    pub fn api_url(&self) -> String {
        env::var(API_URL_ENV)
            .ok()
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Org from the environment, then the config file.
    pub fn default_org(&self) -> Option<String> {
        env::var(DEFAULT_ORG_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.default_org.clone())
    }
}

pub fn config_path() -> OrgResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| OrgError::ConfigError("Could not find home directory".to_string()))?;
    Ok(home_dir.join(CONFIG_FILE))
}

pub fn load_config() -> Config {
    match config_path() {
        Ok(path) => load_config_from(&path),
        Err(_) => Config::default(),
    }
}

/// A missing or unreadable file yields the default config.
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    match fs::read_to_string(path) {
        Ok(config_str) => serde_json::from_str(&config_str).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            Config::default()
        }),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read config file");
            Config::default()
        }
    }
}

pub fn save_config(config: &Config) -> OrgResult<()> {
    save_config_to(config, &config_path()?)
}

pub fn save_config_to(config: &Config, path: &Path) -> OrgResult<()> {
    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(path, config_str)?;
    Ok(())
}

pub fn get_api_key() -> OrgResult<String> {
    api_key_from(&load_config())
}

pub fn api_key_from(config: &Config) -> OrgResult<String> {
    // Environment wins over the config file
    if let Ok(key) = env::var(API_KEY_ENV) {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    config.api_key.clone().ok_or(OrgError::ApiKeyNotFound)
}
