//! Application configuration model.

use serde::{Deserialize, Serialize};

/// Main configuration structure for simloop
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Defaults for harness operations invoked without explicit counts
    #[serde(default)]
    pub harness: HarnessConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".simloop/simloop.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// `sqlx` connection URL for the configured path.
    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Rotation policy for file logs (daily, hourly, never)
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Harness defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HarnessConfig {
    /// Iterations run by `loop` when no count is given
    #[serde(default = "default_iterations")]
    pub default_iterations: i64,

    /// Conversations run by `converse` when no count is given
    #[serde(default = "default_conversation_count")]
    pub default_conversation_count: u32,

    /// Message cap per scripted conversation when none is given
    #[serde(default = "default_max_messages")]
    pub default_max_messages: u32,
}

const fn default_iterations() -> i64 {
    100
}

const fn default_conversation_count() -> u32 {
    1
}

const fn default_max_messages() -> u32 {
    4
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            default_iterations: default_iterations(),
            default_conversation_count: default_conversation_count(),
            default_max_messages: default_max_messages(),
        }
    }
}
