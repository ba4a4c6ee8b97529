//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::dashboard::DashboardConfig;
use crate::scheduler::ScheduleConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub refresh: ScheduleConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metric store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    dirs::data_local_dir()
        .map(|p| {
            p.join("pulseboard")
                .join("metrics.json")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./pulseboard_metrics.json".to_string())
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl StoreConfig {
    /// Store path with a leading `~/` expanded to the home directory
    pub fn resolved_path(&self) -> PathBuf {
        match (self.path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.path),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content, path)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("pulseboard").join("config.toml")),
            Some(PathBuf::from("/etc/pulseboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("PULSEBOARD_STORE_PATH") {
            self.store.path = path;
        }

        if let Some(secs) = var("PULSEBOARD_REFRESH_SECS") {
            match secs.parse() {
                Ok(secs) => self.refresh.interval_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid PULSEBOARD_REFRESH_SECS={}", secs),
            }
        }

        if let Some(level) = var("PULSEBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("PULSEBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Pulseboard Configuration
#
# Environment variables override these settings:
# - PULSEBOARD_STORE_PATH
# - PULSEBOARD_REFRESH_SECS
# - PULSEBOARD_LOG_LEVEL
# - PULSEBOARD_LOG_FORMAT

[store]
# JSON file holding the "<period>_<metric>" values
path = "~/.local/share/pulseboard/metrics.json"

[refresh]
# Seconds between dashboard refreshes
interval_secs = 300

# Refresh once immediately on start
run_immediately = true

[dashboard]
# Periods: alltime, thismonth, lastmonth, current, previous
# Period shown in the counters
totals_period = "alltime"

# Growth compares current_period against previous_period
current_period = "thismonth"
previous_period = "lastmonth"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::Period;
    use std::collections::HashMap;

    #[test]
    fn test_default_template_parses() {
        let config = Config::parse(&generate_default_config(), Path::new("default.toml")).unwrap();
        assert_eq!(config.refresh.interval_secs, 300);
        assert!(config.refresh.run_immediately);
        assert_eq!(config.dashboard.totals_period, Period::AllTime);
        assert_eq!(config.dashboard.current_period, Period::ThisMonth);
        assert_eq!(config.dashboard.previous_period, Period::LastMonth);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse(
            "[dashboard]\ncurrent_period = \"current\"\nprevious_period = \"previous\"\n",
            Path::new("partial.toml"),
        )
        .unwrap();

        assert_eq!(config.dashboard.totals_period, Period::AllTime);
        assert_eq!(config.dashboard.current_period, Period::Current);
        assert_eq!(config.refresh.interval_secs, 300);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_period_rejected() {
        let err = Config::parse(
            "[dashboard]\ntotals_period = \"yesterday\"\n",
            Path::new("bad.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/pulseboard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[refresh]\ninterval_secs = 60\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.refresh.interval_secs, 60);
    }

    #[test]
    fn test_resolved_path() {
        let store = StoreConfig {
            path: "/var/lib/pulseboard/metrics.json".to_string(),
        };
        assert_eq!(
            store.resolved_path(),
            PathBuf::from("/var/lib/pulseboard/metrics.json")
        );

        if let Some(home) = dirs::home_dir() {
            let store = StoreConfig {
                path: "~/metrics.json".to_string(),
            };
            assert_eq!(store.resolved_path(), home.join("metrics.json"));
        }
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PULSEBOARD_STORE_PATH", "/tmp/metrics.json"),
            ("PULSEBOARD_REFRESH_SECS", "not-a-number"),
            ("PULSEBOARD_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.store.path, "/tmp/metrics.json");
        assert_eq!(config.refresh.interval_secs, 300);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }
}
