//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - compact or JSON console output on stderr
//! - optional rolling JSON log file

pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat, RotationPolicy};
pub use logger::{parse_log_level, LoggerImpl, LOG_FILE_NAME};
