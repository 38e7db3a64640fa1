use serde_json::Value;
use std::path::Path;
use tracing::{debug, instrument, warn};

use super::schema::extract_run_configuration;
use crate::domain::models::{FieldPath, RunConfiguration, Source, WriteMode};
use crate::domain::ConfigError;
use crate::infrastructure::literal;

/// Default tolerance when checking that atom fractions sum to one
pub const DEFAULT_FRACTION_TOLERANCE: f64 = 1e-6;

/// Loader behaviour switches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoaderOptions {
    /// Allowed deviation of `sum(target.atom_fractions)` from 1.0
    pub fraction_tolerance: f64,

    /// Treat unrecognized keys as validation failures
    pub strict: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            fraction_tolerance: DEFAULT_FRACTION_TOLERANCE,
            strict: false,
        }
    }
}

/// Result of a successful load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub config: RunConfiguration,

    /// Keys present in the document but not part of the schema
    pub unknown_keys: Vec<FieldPath>,
}

/// Loads and validates MARLEY run-configuration documents
///
/// Loading never touches the files a document refers to (`tfile`, reaction
/// files, outputs); those are resolved by the simulation engine.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    pub const fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Load configuration from document text
    pub fn load_str(&self, text: &str) -> Result<RunConfiguration, ConfigError> {
        self.load_str_with_report(text).map(|report| report.config)
    }

    /// Load configuration from document text, keeping the unknown keys
    #[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
    pub fn load_str_with_report(&self, text: &str) -> Result<LoadReport, ConfigError> {
        let document = literal::parse(text)?;
        let (config, unknown_keys) = extract_run_configuration(&document)?;

        for path in &unknown_keys {
            warn!(key = %path, "unrecognized configuration key");
        }
        if self.options.strict {
            if let Some(path) = unknown_keys.first() {
                return Err(ConfigError::UnknownKey { path: path.clone() });
            }
        }

        self.validate(&config)?;

        debug!(
            seed = config.seed,
            source = config.source.kind(),
            reactions = config.reactions.len(),
            nuclides = config.target.nuclides.len(),
            "run configuration loaded"
        );
        Ok(LoadReport {
            config,
            unknown_keys,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<RunConfiguration, ConfigError> {
        self.load_file_with_report(path).map(|report| report.config)
    }

    /// Load configuration from a specific file, keeping the unknown keys
    pub fn load_file_with_report(&self, path: impl AsRef<Path>) -> Result<LoadReport, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading run configuration");
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str_with_report(&text)
    }

    /// Validate configuration after loading
    ///
    /// Also usable on records assembled in code.
    pub fn validate(&self, config: &RunConfiguration) -> Result<(), ConfigError> {
        // Validate reactions
        let reactions_path = FieldPath::root().key("reactions");
        if config.reactions.is_empty() {
            return Err(ConfigError::EmptyList {
                path: reactions_path,
            });
        }
        for (i, reaction) in config.reactions.iter().enumerate() {
            if reaction.trim().is_empty() {
                return Err(ConfigError::EmptyString {
                    path: reactions_path.index(i),
                });
            }
        }

        // Validate target composition
        let target = &config.target;
        let fractions_path = FieldPath::from("target.atom_fractions");
        if target.nuclides.is_empty() {
            return Err(ConfigError::EmptyList {
                path: FieldPath::from("target.nuclides"),
            });
        }
        if target.nuclides.len() != target.atom_fractions.len() {
            return Err(ConfigError::LengthMismatch {
                path: fractions_path,
                nuclides: target.nuclides.len(),
                fractions: target.atom_fractions.len(),
            });
        }
        for (index, &value) in target.atom_fractions.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidFraction {
                    path: fractions_path.index(index),
                    index,
                    value,
                });
            }
        }
        let sum = target.fraction_sum();
        if (sum - 1.0).abs() > self.options.fraction_tolerance {
            return Err(ConfigError::FractionSum {
                path: fractions_path,
                sum,
                tolerance: self.options.fraction_tolerance,
            });
        }

        // Validate direction components
        let direction = config.direction;
        for (axis, value) in [("x", direction.x), ("y", direction.y), ("z", direction.z)] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    path: FieldPath::root().key("direction").key(axis),
                    message: format!("{value} is not a finite number"),
                });
            }
        }

        Self::validate_source(&config.source)?;

        // Validate executable settings
        if let Some(settings) = &config.executable_settings {
            let output_path = FieldPath::from("executable_settings.output");
            for (i, output) in settings.output.iter().enumerate() {
                if output.file.trim().is_empty() {
                    return Err(ConfigError::EmptyString {
                        path: output_path.index(i).key("file"),
                    });
                }
                if output.mode == WriteMode::Append
                    && !output.format.supports_append()
                {
                    return Err(ConfigError::InvalidValue {
                        path: output_path.index(i).key("mode"),
                        message: format!("{} output does not support append mode", output.format),
                    });
                }
            }
        }

        Ok(())
    }

    fn validate_source(source: &Source) -> Result<(), ConfigError> {
        let path = FieldPath::root().key("source");
        match source {
            Source::Monoenergetic { energy, .. } => {
                if !energy.is_finite() || *energy < 0.0 {
                    return Err(ConfigError::InvalidValue {
                        path: path.key("energy"),
                        message: format!("{energy} MeV is not a valid neutrino energy"),
                    });
                }
            }
            Source::Tgraph(spectrum) | Source::Th1(spectrum) => {
                if spectrum.tfile.trim().is_empty() {
                    return Err(ConfigError::EmptyString {
                        path: path.key("tfile"),
                    });
                }
                if spectrum.namecycle.trim().is_empty() {
                    return Err(ConfigError::EmptyString {
                        path: path.key("namecycle"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Structured form of a record, as JSON
    pub fn to_json(config: &RunConfiguration) -> Result<Value, ConfigError> {
        Ok(serde_json::to_value(config)?)
    }

    /// Render a record back into the object-literal format
    ///
    /// Loading the returned text yields an equal record.
    pub fn to_literal(config: &RunConfiguration) -> Result<String, ConfigError> {
        Self::to_json(config).map(|value| literal::write(&value))
    }
}
