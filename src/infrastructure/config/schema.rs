//! Typed extraction of a parsed document.
//!
//! Walks the `serde_json::Value` produced by the literal parser and builds a
//! `RunConfiguration`, reporting the field path of the first missing or
//! mistyped field. Value constraints (fraction sums, empty strings, ...) are
//! checked afterwards by `ConfigLoader::validate`.

use serde_json::{Map, Value};
use std::str::FromStr;

use crate::domain::models::{
    Direction, ExecutableSettings, FieldPath, NeutrinoFlavor, Nuclide, OutputFormat,
    OutputSpec, RootSpectrum, RunConfiguration, Source, Target, WriteMode, DEFAULT_EVENTS,
};
use crate::domain::ConfigError;

const RUN_KEYS: &[&str] = &[
    "seed",
    "direction",
    "target",
    "reactions",
    "source",
    "executable_settings",
];
const DIRECTION_KEYS: &[&str] = &["x", "y", "z"];
const TARGET_KEYS: &[&str] = &["nuclides", "atom_fractions"];
const MONO_KEYS: &[&str] = &["type", "neutrino", "energy"];
const ROOT_SPECTRUM_KEYS: &[&str] = &["type", "neutrino", "tfile", "namecycle"];
const EXECUTABLE_KEYS: &[&str] = &["events", "output"];
const OUTPUT_KEYS: &[&str] = &["file", "format", "mode"];

/// Extract a run configuration from a document tree
///
/// Returns the record and the paths of keys the schema does not know.
pub fn extract_run_configuration(
    root: &Value,
) -> Result<(RunConfiguration, Vec<FieldPath>), ConfigError> {
    let mut unknown = Vec::new();
    let path = FieldPath::root();
    let map = object(root, &path)?;
    note_unknown(&mut unknown, map, &path, RUN_KEYS);

    let seed_path = path.key("seed");
    let seed = unsigned(required(map, &seed_path)?, &seed_path)?;

    let direction_path = path.key("direction");
    let direction = direction(
        required(map, &direction_path)?,
        &direction_path,
        &mut unknown,
    )?;

    let target_path = path.key("target");
    let target = target(required(map, &target_path)?, &target_path, &mut unknown)?;

    let reactions_path = path.key("reactions");
    let reactions = array(required(map, &reactions_path)?, &reactions_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| string(item, &reactions_path.index(i)).map(str::to_string))
        .collect::<Result<Vec<_>, _>>()?;

    let source_path = path.key("source");
    let source = source(required(map, &source_path)?, &source_path, &mut unknown)?;

    let settings_path = path.key("executable_settings");
    let executable_settings = optional(map, "executable_settings")
        .map(|value| executable_settings(value, &settings_path, &mut unknown))
        .transpose()?;

    let config = RunConfiguration {
        seed,
        direction,
        target,
        reactions,
        source,
        executable_settings,
    };
    Ok((config, unknown))
}

fn direction(
    value: &Value,
    path: &FieldPath,
    unknown: &mut Vec<FieldPath>,
) -> Result<Direction, ConfigError> {
    let map = object(value, path)?;
    note_unknown(unknown, map, path, DIRECTION_KEYS);
    let component = |key: &str| {
        let path = path.key(key);
        number(required(map, &path)?, &path)
    };
    Ok(Direction::new(component("x")?, component("y")?, component("z")?))
}

fn target(
    value: &Value,
    path: &FieldPath,
    unknown: &mut Vec<FieldPath>,
) -> Result<Target, ConfigError> {
    let map = object(value, path)?;
    note_unknown(unknown, map, path, TARGET_KEYS);

    let nuclides_path = path.key("nuclides");
    let nuclides = array(required(map, &nuclides_path)?, &nuclides_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| nuclide(item, &nuclides_path.index(i)))
        .collect::<Result<Vec<_>, _>>()?;

    let fractions_path = path.key("atom_fractions");
    let atom_fractions = array(required(map, &fractions_path)?, &fractions_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| number(item, &fractions_path.index(i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Target {
        nuclides,
        atom_fractions,
    })
}

fn nuclide(value: &Value, path: &FieldPath) -> Result<Nuclide, ConfigError> {
    let Value::Number(number) = value else {
        return Err(mismatch(path, "integer", value));
    };
    if let Some(code) = number.as_u64() {
        return Nuclide::from_pdg(code).ok_or_else(|| ConfigError::InvalidNuclide {
            path: path.clone(),
            code: i128::from(code),
        });
    }
    match number.as_i64() {
        Some(code) => Err(ConfigError::InvalidNuclide {
            path: path.clone(),
            code: i128::from(code),
        }),
        None => Err(mismatch(path, "integer", value)),
    }
}

fn source(
    value: &Value,
    path: &FieldPath,
    unknown: &mut Vec<FieldPath>,
) -> Result<Source, ConfigError> {
    let map = object(value, path)?;
    let type_path = path.key("type");
    let kind = string(required(map, &type_path)?, &type_path)?;

    let neutrino_path = path.key("neutrino");
    let read_neutrino = || neutrino(required(map, &neutrino_path)?, &neutrino_path);

    match kind {
        "monoenergetic" => {
            note_unknown(unknown, map, path, MONO_KEYS);
            let neutrino = read_neutrino()?;
            let energy_path = path.key("energy");
            let energy = number(required(map, &energy_path)?, &energy_path)?;
            Ok(Source::Monoenergetic { neutrino, energy })
        }
        "tgraph" | "th1" => {
            note_unknown(unknown, map, path, ROOT_SPECTRUM_KEYS);
            let neutrino = read_neutrino()?;
            let tfile_path = path.key("tfile");
            let tfile = string(required(map, &tfile_path)?, &tfile_path)?.to_string();
            let namecycle_path = path.key("namecycle");
            let namecycle = string(required(map, &namecycle_path)?, &namecycle_path)?.to_string();
            let spectrum = RootSpectrum {
                neutrino,
                tfile,
                namecycle,
            };
            Ok(if kind == "tgraph" {
                Source::Tgraph(spectrum)
            } else {
                Source::Th1(spectrum)
            })
        }
        other => Err(ConfigError::UnknownVariant {
            path: type_path,
            value: other.to_string(),
            expected: Source::VARIANTS,
        }),
    }
}

fn neutrino(value: &Value, path: &FieldPath) -> Result<NeutrinoFlavor, ConfigError> {
    let unknown_flavor = |shown: String| ConfigError::UnknownVariant {
        path: path.clone(),
        value: shown,
        expected: NeutrinoFlavor::VARIANTS,
    };
    match value {
        Value::String(tag) => tag.parse().map_err(|()| unknown_flavor(tag.clone())),
        Value::Number(code) => code
            .as_i64()
            .and_then(NeutrinoFlavor::from_pdg)
            .ok_or_else(|| unknown_flavor(code.to_string())),
        other => Err(mismatch(path, "string", other)),
    }
}

fn executable_settings(
    value: &Value,
    path: &FieldPath,
    unknown: &mut Vec<FieldPath>,
) -> Result<ExecutableSettings, ConfigError> {
    let map = object(value, path)?;
    note_unknown(unknown, map, path, EXECUTABLE_KEYS);

    let events_path = path.key("events");
    let events = optional(map, "events")
        .map(|value| unsigned(value, &events_path))
        .transpose()?
        .unwrap_or(DEFAULT_EVENTS);

    let output_path = path.key("output");
    let output = match optional(map, "output") {
        Some(value) => array(value, &output_path)?
            .iter()
            .enumerate()
            .map(|(i, item)| output_spec(item, &output_path.index(i), unknown))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(ExecutableSettings { events, output })
}

fn output_spec(
    value: &Value,
    path: &FieldPath,
    unknown: &mut Vec<FieldPath>,
) -> Result<OutputSpec, ConfigError> {
    let map = object(value, path)?;
    note_unknown(unknown, map, path, OUTPUT_KEYS);

    let file_path = path.key("file");
    let file = string(required(map, &file_path)?, &file_path)?.to_string();

    let format_path = path.key("format");
    let format = tag::<OutputFormat>(
        required(map, &format_path)?,
        &format_path,
        OutputFormat::VARIANTS,
    )?;

    let mode_path = path.key("mode");
    let mode = optional(map, "mode")
        .map(|value| tag::<WriteMode>(value, &mode_path, WriteMode::VARIANTS))
        .transpose()?
        .unwrap_or(WriteMode::Overwrite);

    Ok(OutputSpec { file, format, mode })
}

/// JSON type name used in mismatch messages
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn mismatch(path: &FieldPath, expected: &'static str, found: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        path: path.clone(),
        expected,
        found: type_name(found),
    }
}

/// Record keys of `map` that are not in `known`
pub(crate) fn note_unknown(
    unknown: &mut Vec<FieldPath>,
    map: &Map<String, Value>,
    path: &FieldPath,
    known: &[&str],
) {
    unknown.extend(
        map.keys()
            .filter(|key| !known.contains(&key.as_str()))
            .map(|key| path.key(key.as_str())),
    );
}

/// Member named by the last segment of `path`; `null` counts as absent
pub(crate) fn required<'a>(
    map: &'a Map<String, Value>,
    path: &FieldPath,
) -> Result<&'a Value, ConfigError> {
    let key = path.last_key().unwrap_or_default();
    optional(map, key).ok_or_else(|| ConfigError::MissingField { path: path.clone() })
}

pub(crate) fn optional<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

pub(crate) fn object<'a>(
    value: &'a Value,
    path: &FieldPath,
) -> Result<&'a Map<String, Value>, ConfigError> {
    value.as_object().ok_or_else(|| mismatch(path, "object", value))
}

pub(crate) fn array<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a Vec<Value>, ConfigError> {
    value.as_array().ok_or_else(|| mismatch(path, "array", value))
}

pub(crate) fn string<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a str, ConfigError> {
    value.as_str().ok_or_else(|| mismatch(path, "string", value))
}

pub(crate) fn number(value: &Value, path: &FieldPath) -> Result<f64, ConfigError> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| mismatch(path, "number", value)),
        other => Err(mismatch(path, "number", other)),
    }
}

pub(crate) fn unsigned(value: &Value, path: &FieldPath) -> Result<u64, ConfigError> {
    value
        .as_u64()
        .ok_or_else(|| mismatch(path, "non-negative integer", value))
}

fn tag<T: FromStr>(
    value: &Value,
    path: &FieldPath,
    expected: &'static [&'static str],
) -> Result<T, ConfigError> {
    let text = string(value, path)?;
    text.parse().map_err(|_| ConfigError::UnknownVariant {
        path: path.clone(),
        value: text.to_string(),
        expected,
    })
}
