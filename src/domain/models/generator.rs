use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;

use super::run_config::Direction;

/// Generator type string G4SOLAr uses for MARLEY
pub const MARLEY_GENERATOR_TYPE: &str = "marley";

/// How the simulation orients the incoming neutrino
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DirectionMode {
    /// Sample a new direction for every event
    Isotropic,
    /// Always use the given direction
    Fixed(Direction),
}

impl Default for DirectionMode {
    fn default() -> Self {
        Self::Fixed(Direction::Z_AXIS)
    }
}

/// Vertex generator settings, passed through to the simulation untouched
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VertexGenerator(Value);

impl VertexGenerator {
    /// Wrap a vertex block that is already known to carry a string `type`
    pub(crate) const fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn kind(&self) -> &str {
        self.0.get("type").and_then(Value::as_str).unwrap_or("point")
    }

    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for VertexGenerator {
    fn default() -> Self {
        Self(json!({ "type": "point" }))
    }
}

/// A G4SOLAr primary generator block of type `marley`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorBinding {
    pub label: String,
    pub marley_config_path: PathBuf,
    pub direction: DirectionMode,
    pub vertex_generator: VertexGenerator,
}
