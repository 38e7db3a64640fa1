//! Configuration management infrastructure
//!
//! Two kinds of configuration live here:
//! - MARLEY run-configuration documents (`ConfigLoader`, `schema`)
//! - the tool's own layered settings, merged with figment (`SettingsLoader`)

pub mod loader;
pub mod schema;
pub mod settings;

pub use loader::{ConfigLoader, LoadReport, LoaderOptions, DEFAULT_FRACTION_TOLERANCE};
pub use settings::{LoaderSettings, Settings, SettingsError, SettingsLoader};
