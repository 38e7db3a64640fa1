use std::path::PathBuf;

use thiserror::Error;

use super::models::FieldPath;

/// Errors raised while loading or validating a run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Missing required field: {path}")]
    MissingField { path: FieldPath },

    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: FieldPath,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Unknown value {value:?} at {path}. Must be one of: {}", .expected.join(", "))]
    UnknownVariant {
        path: FieldPath,
        value: String,
        expected: &'static [&'static str],
    },

    #[error("Field {path} cannot be an empty string")]
    EmptyString { path: FieldPath },

    #[error("Field {path} cannot be an empty list")]
    EmptyList { path: FieldPath },

    #[error("Invalid value at {path}: {message}")]
    InvalidValue { path: FieldPath, message: String },

    #[error("{path} has {fractions} entries but target.nuclides has {nuclides}")]
    LengthMismatch {
        path: FieldPath,
        nuclides: usize,
        fractions: usize,
    },

    #[error("Invalid atom fraction {value} at {path}. Must be finite and non-negative")]
    InvalidFraction {
        path: FieldPath,
        index: usize,
        value: f64,
    },

    #[error("Atom fractions at {path} sum to {sum}, expected 1.0 (tolerance {tolerance})")]
    FractionSum {
        path: FieldPath,
        sum: f64,
        tolerance: f64,
    },

    #[error("Invalid nuclide code {code} at {path}. Expected a nuclear PDG code of the form 100ZZZAAAI")]
    InvalidNuclide { path: FieldPath, code: i128 },

    #[error("Unrecognized key: {path}")]
    UnknownKey { path: FieldPath },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ConfigError {
    /// Field path the error refers to, when it has one
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::MissingField { path }
            | Self::TypeMismatch { path, .. }
            | Self::UnknownVariant { path, .. }
            | Self::EmptyString { path }
            | Self::EmptyList { path }
            | Self::InvalidValue { path, .. }
            | Self::LengthMismatch { path, .. }
            | Self::InvalidFraction { path, .. }
            | Self::FractionSum { path, .. }
            | Self::InvalidNuclide { path, .. }
            | Self::UnknownKey { path } => Some(path),
            _ => None,
        }
    }
}

/// Errors raised while reading a G4SOLAr `marley` generator block
#[derive(Error, Debug)]
pub enum BindingError {
    #[error("Generator type {0:?} is not a marley generator")]
    WrongGeneratorType(String),

    #[error("Invalid direction {0}. Must be \"isotropic\", \"fixed\" or an [x, y, z] array")]
    InvalidDirection(String),

    #[error("Vertex generator is missing its mandatory \"type\" field")]
    MissingVertexType,

    #[error("Invalid generator block: {0}")]
    Block(#[source] ConfigError),

    #[error("Failed to load MARLEY config {}: {source}", .path.display())]
    MarleyConfig {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

impl From<ConfigError> for BindingError {
    fn from(err: ConfigError) -> Self {
        Self::Block(err)
    }
}
