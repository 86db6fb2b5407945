//! Configuration loading.
//!
//! Configuration is a TOML file.  The path comes from `--config`, then the
//! `FEEDREADER_CONFIG` environment variable; with neither, the built-in
//! defaults are used.
//!
//! ```toml
//! refresh_interval_secs = 60
//! request_timeout_secs = 10
//! check_timeout_ms = 5000
//! log_file = "feedreader.log"
//!
//! [[feeds]]
//! name = "CSS Tricks"
//! url = "http://feeds.feedburner.com/CssTricks"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::registry::{has_http_scheme, FeedDescriptor, FeedRegistry};

/// Environment variable consulted when no explicit path is given.
pub const CONFIG_ENV_VAR: &str = "FEEDREADER_CONFIG";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Feeds shown in the menu, in order.
    pub feeds: Vec<FeedDescriptor>,
    /// How often the TUI re-loads the feed on screen.
    pub refresh_interval_secs: u64,
    /// Per-request HTTP timeout.
    pub request_timeout_secs: u64,
    /// Timeout applied to each setup step and each check by `feedreader check`.
    pub check_timeout_ms: u64,
    /// Where the TUI writes its log.  Logging is off in the TUI when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feeds: default_feeds(),
            refresh_interval_secs: 60,
            request_timeout_secs: 10,
            check_timeout_ms: 5_000,
            log_file: None,
        }
    }
}

fn default_feeds() -> Vec<FeedDescriptor> {
    vec![
        FeedDescriptor::new("Udacity Blog", "http://blog.udacity.com/feed"),
        FeedDescriptor::new("CSS Tricks", "http://feeds.feedburner.com/CssTricks"),
        FeedDescriptor::new("HTML5 Rocks", "http://feeds.feedburner.com/html5rocks"),
        FeedDescriptor::new(
            "Linear Digressions",
            "http://feeds.feedburner.com/udacity-linear-digressions",
        ),
    ]
}

/// A validated config together with the file it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` when the built-in defaults are in use.
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    /// Logs where the configuration came from.
    ///
    /// Loading happens before the log subscriber exists (the log file is a
    /// config setting), so callers report the outcome once logging is up.
    pub fn log_origin(&self) {
        match &self.path {
            Some(path) => {
                info!(path = %path.display(), feeds = self.config.feeds.len(), "loaded config");
            }
            None => info!("no config file given, using built-in defaults"),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, the environment, or defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed or
    /// validated.
    pub fn load(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        let Some(resolved) = resolve_path(path) else {
            return Ok(LoadedConfig {
                config: Self::default(),
                path: None,
            });
        };
        let content =
            fs::read_to_string(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        let config = Self::from_toml(&content)?;
        Ok(LoadedConfig {
            config,
            path: Some(resolved),
        })
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feeds.is_empty() {
            return Err(ConfigError::Invalid("feeds must not be empty".to_string()));
        }
        for (index, feed) in self.feeds.iter().enumerate() {
            if feed.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("feeds[{index}].name must not be empty")));
            }
            if !has_http_scheme(&feed.url) {
                return Err(ConfigError::Invalid(format!(
                    "feeds[{index}].url must start with http:// or https://"
                )));
            }
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid("refresh_interval_secs must be positive".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be positive".to_string()));
        }
        if self.check_timeout_ms == 0 {
            return Err(ConfigError::Invalid("check_timeout_ms must be positive".to_string()));
        }
        Ok(())
    }

    pub fn registry(&self) -> FeedRegistry {
        FeedRegistry::new(self.feeds.clone())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn check_timeout(&self) -> Duration {
        Duration::from_millis(self.check_timeout_ms)
    }
}

/// Resolves the config path from the CLI or the environment.
fn resolve_path(path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = path {
        return Some(path.to_path_buf());
    }
    env::var_os(CONFIG_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
