use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::loader::{LoaderOptions, DEFAULT_FRACTION_TOLERANCE};
use crate::infrastructure::logging::LogConfig;

/// Settings file picked up from the working directory when present
pub const DEFAULT_SETTINGS_FILE: &str = "marley-config.yaml";

/// Prefix for environment overrides, e.g. `MARLEYCFG_LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "MARLEYCFG_";

/// Settings error types
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid fraction_tolerance: {0}. Must be a positive, finite number")]
    InvalidTolerance(f64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Tool settings, separate from the MARLEY documents being checked
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,

    /// Document loader configuration
    #[serde(default)]
    pub loader: LoaderSettings,
}

/// Loader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoaderSettings {
    /// Allowed deviation of the atom fraction sum from 1.0
    #[serde(default = "default_fraction_tolerance")]
    pub fraction_tolerance: f64,

    /// Reject documents containing unrecognized keys
    #[serde(default)]
    pub strict: bool,
}

const fn default_fraction_tolerance() -> f64 {
    DEFAULT_FRACTION_TOLERANCE
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            fraction_tolerance: default_fraction_tolerance(),
            strict: false,
        }
    }
}

impl From<&LoaderSettings> for LoaderOptions {
    fn from(settings: &LoaderSettings) -> Self {
        Self {
            fraction_tolerance: settings.fraction_tolerance,
            strict: settings.strict,
        }
    }
}

/// Settings loader with hierarchical merging
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `marley-config.yaml` in the working directory (optional)
    /// 3. Explicit settings file passed on the command line (optional)
    /// 4. Environment variables (`MARLEYCFG_*` prefix, `__` separates levels)
    pub fn load(explicit: Option<&Path>) -> Result<Settings> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Yaml::file_exact(DEFAULT_SETTINGS_FILE));

        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Settings file {} does not exist", path.display());
            }
            figment = figment.merge(Yaml::file_exact(path));
        }

        let settings: Settings = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract settings from figment")?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Load settings from a specific file, ignoring the environment
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Settings> {
        let settings: Settings = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Yaml::file_exact(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load settings from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Validate settings after loading
    pub fn validate(settings: &Settings) -> Result<(), SettingsError> {
        let tolerance = settings.loader.fraction_tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(SettingsError::InvalidTolerance(tolerance));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&settings.logging.level.to_lowercase().as_str()) {
            return Err(SettingsError::InvalidLogLevel(settings.logging.level.clone()));
        }

        Ok(())
    }
}
