use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where and how log lines are written
///
/// Console output always goes to stderr; stdout is reserved for command output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console line format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory receiving `marley-config.log`; unset disables file output
    pub log_dir: Option<PathBuf>,

    /// Write log lines to stderr
    #[serde(default = "default_true")]
    pub enable_console: bool,

    /// When the log file is rolled over
    #[serde(default)]
    pub rotation: RotationPolicy,
}

/// Console line format; the log file is always JSON
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    /// Compact human-readable lines
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            enable_console: true,
            rotation: RotationPolicy::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_true() -> bool {
    true
}
