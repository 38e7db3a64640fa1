//! marley-config - MARLEY run configurations for G4SOLAr
//!
//! Loads the object-literal documents that configure the MARLEY neutrino
//! event generator, extracts a typed [`RunConfiguration`] and checks it
//! before any simulation starts.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): run-configuration records and error types
//! - **Infrastructure Layer** (`infrastructure`): document format, loader, settings, logging
//! - **Service Layer** (`services`): binding G4SOLAr generator blocks to documents
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use marley_config::ConfigLoader;
//!
//! let config = ConfigLoader::default()
//!     .load_str(r#"{
//!         seed: 12345,
//!         direction: { x: 0, y: 0, z: 1 },
//!         target: { nuclides: [1000180400], atom_fractions: [1.0] },
//!         reactions: ["ES.react"],
//!         source: { type: "monoenergetic", neutrino: "ve", energy: 15 },
//!     }"#)
//!     .unwrap();
//! assert_eq!(config.seed, 12345);
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Direction, DirectionMode, ExecutableSettings, FieldPath, GeneratorBinding, NeutrinoFlavor,
    Nuclide, OutputFormat, OutputSpec, RootSpectrum, RunConfiguration, Source, Target,
    VertexGenerator, WriteMode,
};
pub use domain::{BindingError, ConfigError};
pub use infrastructure::config::{ConfigLoader, LoadReport, LoaderOptions, Settings, SettingsLoader};
pub use services::ResolvedGenerator;
