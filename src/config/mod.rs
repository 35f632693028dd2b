//! Configuration management for CricSphere

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Backend used when neither the command line nor the config file names one
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the CricSphere backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Response cache settings
    #[serde(default)]
    pub cache: CacheSettings,

    /// Refresh intervals for watch modes
    #[serde(default)]
    pub polling: PollingSettings,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Seconds a cached response stays fresh
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Disable to always hit the network
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_ttl_secs() -> u64 {
    5 * 60
}

fn default_true() -> bool {
    true
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            enabled: true,
        }
    }
}

/// Polling intervals, in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingSettings {
    #[serde(default = "default_live_secs")]
    pub live_secs: u64,

    #[serde(default = "default_match_secs")]
    pub match_secs: u64,

    #[serde(default = "default_series_secs")]
    pub series_secs: u64,
}

fn default_live_secs() -> u64 {
    30
}

fn default_match_secs() -> u64 {
    30
}

fn default_series_secs() -> u64 {
    120
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            live_secs: default_live_secs(),
            match_secs: default_match_secs(),
            series_secs: default_series_secs(),
        }
    }
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".cricsphere").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional path, falling back to defaults
    /// when no file exists yet.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to an optional path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Pick the backend URL: explicit override, then config file, then default.
    pub fn resolve_api_url(&self, override_url: Option<&str>) -> String {
        override_url
            .or(self.api_url.as_deref())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.preferences.timeout_secs)
    }

    pub fn live_interval(&self) -> Duration {
        Duration::from_secs(self.polling.live_secs)
    }

    pub fn match_interval(&self) -> Duration {
        Duration::from_secs(self.polling.match_secs)
    }

    pub fn series_interval(&self) -> Duration {
        Duration::from_secs(self.polling.series_secs)
    }

    /// Reject values that would make the client misbehave
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.api_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid(format!(
                "api_url must start with http:// or https:// (got {})",
                url
            ))
            .into());
        }

        for (name, secs) in [
            ("polling.live_secs", self.polling.live_secs),
            ("polling.match_secs", self.polling.match_secs),
            ("polling.series_secs", self.polling.series_secs),
            ("preferences.timeout_secs", self.preferences.timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::Invalid(format!("{} must be greater than 0", name)).into());
            }
        }

        Ok(())
    }
}
