//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The monoenergetic scenario document used throughout the tests
#[allow(dead_code)]
pub const MONO_DOC: &str = r#"{seed:12345, direction:{x:0,y:0,z:1}, target:{nuclides:[1000180400], atom_fractions:[1.0]}, reactions:["ES.react"], source:{type:"monoenergetic", neutrino:"ve", energy:15}}"#;

/// Directory holding the G4SOLAr sample documents
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/marley_cfg")
}

/// Path of a named sample document
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
#[allow(dead_code)]
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `contents` to `name` inside `dir` and return the full path
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write test file");
    path
}
