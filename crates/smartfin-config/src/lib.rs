//! Configuration management for smartfin
//!
//! Settings are read from an optional YAML file, then overridden by the
//! `PORT` environment variable, then by command line flags.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::{ConfigError, ConfigResult};

/// Environment variable that overrides `server.port`
pub const PORT_ENV: &str = "PORT";

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served for non-API paths
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "public".to_string()
}

/// Synthetic dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Months of history generated at startup
    #[serde(default = "default_months_back")]
    pub months_back: u32,
    /// Seed for the generator; a fresh one is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Number of recent transactions covered by `/api/summary`
    #[serde(default = "default_summary_limit")]
    pub summary_limit: usize,
    /// Number of recent transactions covered by `/api/insights`
    #[serde(default = "default_insight_window")]
    pub insight_window: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            months_back: default_months_back(),
            seed: None,
            summary_limit: default_summary_limit(),
            insight_window: default_insight_window(),
        }
    }
}

fn default_months_back() -> u32 {
    6
}

fn default_summary_limit() -> usize {
    100
}

fn default_insight_window() -> usize {
    30
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Dataset settings
    #[serde(default)]
    pub data: DataConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::from_yaml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, falling back to defaults otherwise
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })
    }

    /// Apply the `PORT` override, given its raw value
    pub fn apply_port_override(&mut self, value: Option<&str>) -> ConfigResult<()> {
        let Some(raw) = value else {
            return Ok(());
        };
        let port = raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            field: PORT_ENV.to_string(),
            reason: format!("'{}' is not a valid port number", raw),
        })?;
        self.server.port = port;
        self.validate()
    }

    /// Apply overrides read from the process environment
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        let port = std::env::var(PORT_ENV).ok();
        self.apply_port_override(port.as_deref())
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.data.months_back == 0 || self.data.months_back > 120 {
            return Err(ConfigError::InvalidValue {
                field: "data.months_back".to_string(),
                reason: "Months back must be between 1 and 120".to_string(),
            });
        }

        if self.data.summary_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "data.summary_limit".to_string(),
                reason: "Summary limit must be greater than 0".to_string(),
            });
        }

        if self.data.insight_window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "data.insight_window".to_string(),
                reason: "Insight window must be greater than 0".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
