//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{
    ClientConfig, DEFAULT_ALL_DIARY_LIMIT, DEFAULT_API_BASE, DEFAULT_DIARY_LIMIT,
    DEFAULT_USER_DIARY_LIMIT, DEFAULT_USER_LIMIT,
};

/// Environment variable selecting the backend base URL
pub const API_BASE_URL_ENV: &str = "FLOWER_DIARY_API_BASE_URL";

/// Environment variable selecting the acting user
pub const USER_ID_ENV: &str = "FLOWER_DIARY_USER_ID";

/// Environment variable selecting `pretty` or `json` log output
pub const LOG_FORMAT_ENV: &str = "FLOWER_DIARY_LOG_FORMAT";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Acting user until authentication exists
    #[serde(default = "default_user_id")]
    pub user_id: i64,

    /// Unset means no client-side timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_user_id() -> i64 {
    1
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_id: default_user_id(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            user_id: self.user_id,
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Page behaviour configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// How long the success view stays up before moving to the diary list
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,

    #[serde(default = "default_diary_page_size")]
    pub diary_page_size: u32,

    #[serde(default = "default_admin_user_page_size")]
    pub admin_user_page_size: u32,

    #[serde(default = "default_admin_user_diary_page_size")]
    pub admin_user_diary_page_size: u32,

    #[serde(default = "default_admin_diary_page_size")]
    pub admin_diary_page_size: u32,
}

fn default_redirect_delay() -> u64 {
    4000 // 4 seconds
}

fn default_diary_page_size() -> u32 {
    DEFAULT_DIARY_LIMIT
}

fn default_admin_user_page_size() -> u32 {
    DEFAULT_USER_LIMIT
}

fn default_admin_user_diary_page_size() -> u32 {
    DEFAULT_USER_DIARY_LIMIT
}

fn default_admin_diary_page_size() -> u32 {
    DEFAULT_ALL_DIARY_LIMIT
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay(),
            diary_page_size: default_diary_page_size(),
            admin_user_page_size: default_admin_user_page_size(),
            admin_user_diary_page_size: default_admin_user_diary_page_size(),
            admin_diary_page_size: default_admin_diary_page_size(),
        }
    }
}

impl UiConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Output format of the log layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// A loaded configuration and the sources that had to be skipped
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// Files or overrides that were ignored in favour of defaults
    pub skipped: Vec<ConfigError>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> LoadedConfig {
        let mut config = Config::default();
        let skipped = config.apply_env_overrides();
        LoadedConfig { config, skipped }
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<LoadedConfig, ConfigError> {
        let mut config = Self::load(path)?;
        let skipped = config.apply_env_overrides();
        Ok(LoadedConfig { config, skipped })
    }

    /// Load from default locations or environment
    pub fn load_default() -> LoadedConfig {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("flower-diary").join("config.toml")),
            Some(PathBuf::from("/etc/flower-diary/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths, |key| std::env::var(key).ok())
    }

    /// Load the first readable file among `paths`, then apply overrides.
    ///
    /// Broken files are recorded in `skipped` and the search continues.
    fn load_first<F>(paths: &[PathBuf], lookup: F) -> LoadedConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut skipped = Vec::new();
        let mut config = None;

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load(path) {
                Ok(loaded) => {
                    tracing::debug!("Loaded config from {:?}", path);
                    config = Some(loaded);
                    break;
                }
                Err(e) => skipped.push(e),
            }
        }

        let mut config = config.unwrap_or_else(|| {
            tracing::debug!("Using default config with environment overrides");
            Config::default()
        });
        skipped.extend(config.apply_overrides(lookup));

        LoadedConfig { config, skipped }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Vec<ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Vec<ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut skipped = Vec::new();

        // API overrides
        if let Some(url) = lookup(API_BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
        if let Some(user_id) = lookup(USER_ID_ENV) {
            match user_id.trim().parse() {
                Ok(id) => self.api.user_id = id,
                Err(_) => skipped.push(ConfigError::InvalidOverride {
                    key: USER_ID_ENV,
                    value: user_id,
                }),
            }
        }

        // Logging overrides
        if let Some(level) = lookup("FLOWER_DIARY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            match format.parse() {
                Ok(format) => self.logging.format = format,
                Err(_) => skipped.push(ConfigError::InvalidOverride {
                    key: LOG_FORMAT_ENV,
                    value: format,
                }),
            }
        }

        skipped
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Ignoring invalid {key}: {value}")]
    InvalidOverride { key: &'static str, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Flower Diary Configuration
#
# Environment variables override these settings:
# - FLOWER_DIARY_API_BASE_URL
# - FLOWER_DIARY_USER_ID
# - FLOWER_DIARY_LOG_LEVEL
# - FLOWER_DIARY_LOG_FORMAT

[api]
# Diary backend base URL
base_url = "http://localhost:8005"

# User that diaries are written as (no login yet)
user_id = 1

# Request timeout in seconds (unset = wait for the network stack)
# request_timeout_secs = 30

[ui]
# Delay before leaving the "flower bloomed" screen (ms)
redirect_delay_ms = 4000

# Page sizes
diary_page_size = 10
admin_user_page_size = 100
admin_user_diary_page_size = 50
admin_diary_page_size = 100

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8005");
        assert_eq!(config.api.user_id, 1);
        assert_eq!(config.ui.redirect_delay(), Duration::from_millis(4000));
        assert_eq!(config.ui.diary_page_size, 10);
        assert_eq!(config.ui.admin_user_diary_page_size, 50);
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.api.base_url, defaults.api.base_url);
        assert_eq!(config.api.request_timeout_secs, None);
        assert_eq!(config.ui.redirect_delay_ms, defaults.ui.redirect_delay_ms);
        assert_eq!(config.ui.admin_diary_page_size, defaults.ui.admin_diary_page_size);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://diary.example.com\"\nrequest_timeout_secs = 5").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://diary.example.com");
        assert_eq!(config.api.user_id, 1);
        assert_eq!(
            config.api.client_config().request_timeout,
            Some(Duration::from_secs(5))
        );
        assert_eq!(config.ui.redirect_delay_ms, 4000);
    }

    #[test]
    fn test_load_errors() {
        let err = Config::load(Path::new("/nonexistent/flower-diary.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = 3").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (API_BASE_URL_ENV, "http://backend:9000"),
            ("FLOWER_DIARY_USER_ID", "7"),
            (LOG_FORMAT_ENV, "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        let skipped = config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert!(skipped.is_empty());
        assert_eq!(config.api.base_url, "http://backend:9000");
        assert_eq!(config.api.user_id, 7);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_user_id_override_reported() {
        let mut config = Config::default();
        let skipped =
            config.apply_overrides(|key| (key == USER_ID_ENV).then(|| "abc".to_string()));

        assert_eq!(config.api.user_id, 1);
        assert_eq!(skipped.len(), 1);
        assert_eq!(
            skipped[0].to_string(),
            "Ignoring invalid FLOWER_DIARY_USER_ID: abc"
        );
    }

    #[test]
    fn test_broken_file_is_reported_and_search_continues() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let broken = dir.path().join("broken.toml");
        let valid = dir.path().join("valid.toml");
        std::fs::write(&broken, "[api\nbase_url = 3").unwrap();
        std::fs::write(&valid, "[api]\nbase_url = \"http://from-file:8005\"").unwrap();

        let loaded = Config::load_first(&[missing, broken.clone(), valid], |key| {
            (key == USER_ID_ENV).then(|| "abc".to_string())
        });

        assert_eq!(loaded.config.api.base_url, "http://from-file:8005");
        assert_eq!(loaded.config.api.user_id, 1);
        assert_eq!(loaded.skipped.len(), 2);
        assert!(matches!(&loaded.skipped[0], ConfigError::Parse { path, .. } if *path == broken));
        assert!(matches!(
            loaded.skipped[1],
            ConfigError::InvalidOverride { key: USER_ID_ENV, .. }
        ));
    }

    #[test]
    fn test_no_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_first(&[dir.path().join("none.toml")], |_| None);

        assert!(loaded.skipped.is_empty());
        assert_eq!(loaded.config.api.base_url, "http://localhost:8005");
    }

    #[test]
    fn test_log_format_values() {
        let config = Config::parse("[logging]\nformat = \"json\"").unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(Config::parse("[logging]\nformat = \"fancy\"").is_err());

        let mut config = Config::default();
        let skipped =
            config.apply_overrides(|key| (key == LOG_FORMAT_ENV).then(|| "fancy".to_string()));
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(matches!(
            skipped[0],
            ConfigError::InvalidOverride { key: LOG_FORMAT_ENV, .. }
        ));
    }
}
