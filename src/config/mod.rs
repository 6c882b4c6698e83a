//! Configuration management for mongoscript.
//!
//! Configuration is loaded from a TOML file, with defaults for every
//! field so a missing or partial file still yields a usable config.
//! Command-line arguments override whatever the file provides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Connection configuration.
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Display configuration.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Script loading configuration.
    #[serde(default)]
    pub script: ScriptConfig,
}

/// Connection-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Default MongoDB connection URI, used when none is given on the
    /// command line.
    #[serde(default = "default_uri")]
    pub default_uri: String,

    /// Connection timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Server selection timeout in seconds.
    #[serde(default = "default_server_selection_timeout")]
    pub server_selection_timeout: u64,
}

/// Display and output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Report output format.
    #[serde(default)]
    pub format: ReportFormat,

    /// Enable colored output.
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Show per-command execution time.
    #[serde(default = "default_show_timing")]
    pub show_timing: bool,
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Colored per-command report with a summary table.
    #[default]
    Console,

    /// The full execution result as pretty-printed JSON.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level to log.
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Include timestamps in log output.
    #[serde(default)]
    pub timestamps: bool,
}

/// Script loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Maximum script file size in bytes.
    #[serde(default = "default_max_script_bytes")]
    pub max_size_bytes: u64,
}

/// Log verbosity levels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_server_selection_timeout() -> u64 {
    5
}

fn default_color_output() -> bool {
    true
}

fn default_show_timing() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_max_script_bytes() -> u64 {
    10 * 1024 * 1024
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            default_uri: default_uri(),
            timeout: default_timeout(),
            server_selection_timeout: default_server_selection_timeout(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            color_output: default_color_output(),
            show_timing: default_show_timing(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: false,
        }
    }
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_script_bytes(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;
        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default path, falling back to defaults
    /// when no config file exists.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Default configuration file path: `~/.mongoscript/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mongoscript")
            .join("config.toml")
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.connection.timeout == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connection.timeout".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        if self.script.max_size_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "script.max_size_bytes".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Connection timeout as a `Duration`.
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection.timeout)
    }

    /// Server selection timeout as a `Duration`.
    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection.server_selection_timeout)
    }
}

impl LogLevel {
    /// Convert to `tracing::Level`.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
