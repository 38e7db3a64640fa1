use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::domain::models::{
    Direction, DirectionMode, FieldPath, GeneratorBinding, RunConfiguration, VertexGenerator,
    MARLEY_GENERATOR_TYPE,
};
use crate::domain::{BindingError, ConfigError};
use crate::infrastructure::config::schema::{number, object, optional, required, string};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::literal;

impl GeneratorBinding {
    /// Parse a generator block from its object-literal text
    pub fn parse_str(text: &str) -> Result<Self, BindingError> {
        let block = literal::parse(text).map_err(ConfigError::from)?;
        Self::from_value(&block)
    }

    /// Read a generator block file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BindingError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&text)
    }

    /// Build a binding from an already parsed generator block
    ///
    /// Block layout: `{ type: "marley", label, config: { marley_config_path,
    /// direction?, vertex_gen? } }`.
    pub fn from_value(block: &Value) -> Result<Self, BindingError> {
        let root = FieldPath::root();
        let map = object(block, &root)?;

        let kind_path = root.key("type");
        let kind = string(required(map, &kind_path)?, &kind_path)?;
        if kind != MARLEY_GENERATOR_TYPE {
            return Err(BindingError::WrongGeneratorType(kind.to_string()));
        }

        let label_path = root.key("label");
        let label = string(required(map, &label_path)?, &label_path)?;
        if label.trim().is_empty() {
            return Err(ConfigError::EmptyString { path: label_path }.into());
        }

        let config_path = root.key("config");
        let config = object(required(map, &config_path)?, &config_path)?;

        let marley_path = config_path.key("marley_config_path");
        let marley_config_path = string(required(config, &marley_path)?, &marley_path)?;
        if marley_config_path.trim().is_empty() {
            return Err(ConfigError::EmptyString { path: marley_path }.into());
        }

        let direction = match optional(config, "direction") {
            Some(value) => direction_mode(value, &config_path.key("direction"))?,
            None => DirectionMode::default(),
        };

        let vertex_generator = match optional(config, "vertex_gen") {
            Some(value) => vertex_generator(value, &config_path.key("vertex_gen"))?,
            None => VertexGenerator::default(),
        };

        Ok(Self {
            label: label.to_string(),
            marley_config_path: PathBuf::from(marley_config_path),
            direction,
            vertex_generator,
        })
    }

    /// Interpret `marley_config_path` relative to `base` unless it is absolute
    #[must_use]
    pub fn relative_to(mut self, base: &Path) -> Self {
        if self.marley_config_path.is_relative() {
            self.marley_config_path = base.join(&self.marley_config_path);
        }
        self
    }

    /// Load the MARLEY document this block points at
    #[instrument(level = "debug", skip_all, fields(label = %self.label))]
    pub fn resolve(&self, loader: &ConfigLoader) -> Result<ResolvedGenerator, BindingError> {
        let config = loader
            .load_from_file(&self.marley_config_path)
            .map_err(|source| BindingError::MarleyConfig {
                path: self.marley_config_path.clone(),
                source,
            })?;

        debug!(
            path = %self.marley_config_path.display(),
            direction = ?self.direction,
            vertex = self.vertex_generator.kind(),
            "generator bound to run configuration"
        );
        Ok(ResolvedGenerator {
            binding: self.clone(),
            config,
        })
    }
}

/// A generator block together with the run configuration it references
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGenerator {
    pub binding: GeneratorBinding,
    pub config: RunConfiguration,
}

impl ResolvedGenerator {
    /// Replace the document seed with the seed of the enclosing run
    #[must_use]
    pub fn with_run_seed(mut self, seed: Option<u64>) -> Self {
        if let Some(seed) = seed {
            info!(
                label = %self.binding.label,
                document_seed = self.config.seed,
                run_seed = seed,
                "reseeding generator"
            );
            self.config.seed = seed;
        }
        self
    }

    /// Generator description recorded in the run metadata
    pub fn export_config(&self) -> Result<Value, ConfigError> {
        Ok(json!({
            "type": MARLEY_GENERATOR_TYPE,
            "label": self.binding.label,
            "marley_config": ConfigLoader::to_json(&self.config)?,
            "vertex_generator": self.binding.vertex_generator.as_value(),
        }))
    }
}

fn direction_mode(value: &Value, path: &FieldPath) -> Result<DirectionMode, BindingError> {
    match value {
        Value::String(mode) => match mode.as_str() {
            "isotropic" => Ok(DirectionMode::Isotropic),
            "fixed" => Ok(DirectionMode::Fixed(Direction::Z_AXIS)),
            other => Err(BindingError::InvalidDirection(format!("{other:?}"))),
        },
        Value::Array(components) => {
            let [x, y, z] = components.as_slice() else {
                return Err(BindingError::InvalidDirection(format!(
                    "array of {} elements",
                    components.len()
                )));
            };
            Ok(DirectionMode::Fixed(Direction::new(
                number(x, &path.index(0))?,
                number(y, &path.index(1))?,
                number(z, &path.index(2))?,
            )))
        }
        other => Err(BindingError::InvalidDirection(other.to_string())),
    }
}

fn vertex_generator(value: &Value, path: &FieldPath) -> Result<VertexGenerator, BindingError> {
    let map = object(value, path)?;
    match optional(map, "type") {
        Some(kind) => {
            string(kind, &path.key("type"))?;
            Ok(VertexGenerator::from_value(value.clone()))
        }
        None => Err(BindingError::MissingVertexType),
    }
}
