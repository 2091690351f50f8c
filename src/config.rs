//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::analytics::AnalyticsConfig;
use crate::animation::{AnimationConfig, AnimationMode};
use crate::scheduler::ScheduleConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub animation: AnimationSettings,

    #[serde(default)]
    pub toasts: ToastConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means no client-side timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8001".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Refresh cadence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_ms: u64,

    #[serde(default)]
    pub overlap_guard: bool,
}

fn default_refresh_interval() -> u64 {
    300_000 // 5 minutes
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval(),
            overlap_guard: false,
        }
    }
}

/// Metric animation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnimationSettings {
    #[serde(default = "default_animation_duration")]
    pub duration_ms: u64,

    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,

    #[serde(default)]
    pub mode: AnimationMode,
}

fn default_animation_duration() -> u64 {
    1000
}

fn default_frame_interval() -> u64 {
    16
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: default_animation_duration(),
            frame_interval_ms: default_frame_interval(),
            mode: AnimationMode::default(),
        }
    }
}

/// Toast configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToastConfig {
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,
}

fn default_display_ms() -> u64 {
    5000
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            display_ms: default_display_ms(),
        }
    }
}

/// Snapshot server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_enabled")]
    pub enabled: bool,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_api_enabled() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: default_api_enabled(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
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
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the scheduler and animator cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.refresh_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "dashboard.refresh_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.animation.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "animation.frame_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
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
            dirs::config_dir().map(|p| p.join("portfolio-pulse").join("config.toml")),
            Some(PathBuf::from("/etc/portfolio-pulse/config.toml")),
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

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub(crate) fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PULSE_SOURCE_URL") {
            self.source.base_url = url;
        }
        if let Some(interval) = lookup("PULSE_REFRESH_INTERVAL_MS") {
            match interval.parse::<u64>() {
                Ok(ms) if ms > 0 => self.dashboard.refresh_interval_ms = ms,
                _ => tracing::warn!("Ignoring invalid PULSE_REFRESH_INTERVAL_MS: {}", interval),
            }
        }

        if let Some(host) = lookup("PULSE_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("PULSE_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid PULSE_API_PORT: {}", port),
            }
        }

        if let Some(level) = lookup("PULSE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PULSE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Settings for the analytics client
    pub fn analytics(&self) -> AnalyticsConfig {
        AnalyticsConfig {
            base_url: self.source.base_url.clone(),
            request_timeout: self.source.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Settings for the metric animator
    pub fn animation(&self) -> AnimationConfig {
        AnimationConfig {
            duration: Duration::from_millis(self.animation.duration_ms),
            mode: self.animation.mode,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.animation.frame_interval_ms)
    }

    pub fn toast_display(&self) -> Duration {
        Duration::from_millis(self.toasts.display_ms)
    }

    /// Settings for the refresh scheduler
    pub fn schedule(&self) -> ScheduleConfig {
        ScheduleConfig {
            interval: Duration::from_millis(self.dashboard.refresh_interval_ms),
            overlap_guard: self.dashboard.overlap_guard,
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

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Portfolio Pulse Configuration
#
# Environment variables override these settings:
# - PULSE_SOURCE_URL
# - PULSE_REFRESH_INTERVAL_MS
# - PULSE_API_HOST
# - PULSE_API_PORT
# - PULSE_LOG_LEVEL
# - PULSE_LOG_FORMAT

[source]
# Base URL of the portfolio server; analytics are read from
# {base_url}/api/portfolio/analytics
base_url = "http://localhost:8001"

# Optional request timeout in seconds (unset: wait for the transport)
# request_timeout_secs = 30

[dashboard]
# Time between refresh cycles (ms)
refresh_interval_ms = 300000

# Skip a tick while the previous cycle is still running
overlap_guard = false

[animation]
# Duration of a metric transition (ms)
duration_ms = 1000

# Time between animation frames (ms)
frame_interval_ms = 16

# race: overlapping animations both write, last write wins
# supersede: a new animation stops the previous one on the same element
mode = "race"

[toasts]
# How long a toast stays visible (ms)
display_ms = 5000

[api]
# Serve the dashboard snapshot over HTTP
enabled = true

# Snapshot server host
host = "127.0.0.1"

# Snapshot server port
port = 8090

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
