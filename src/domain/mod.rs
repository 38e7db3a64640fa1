//! Domain layer for MARLEY run configurations
//!
//! This module contains the typed configuration model and its error types.

pub mod error;
pub mod models;

// Re-export error types for convenient access
pub use error::{BindingError, ConfigError};
