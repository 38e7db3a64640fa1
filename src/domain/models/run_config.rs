use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::nuclide::Nuclide;
use super::source::Source;

/// One MARLEY simulation run, as described by a configuration document
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfiguration {
    /// Seed for the generator's random number stream
    pub seed: u64,

    /// Incident neutrino direction
    pub direction: Direction,

    /// Target material composition
    pub target: Target,

    /// Reaction-definition files to enable, in order
    pub reactions: Vec<String>,

    /// Neutrino energy spectrum
    pub source: Source,

    /// Settings for the standalone MARLEY executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable_settings: Option<ExecutableSettings>,
}

/// Direction vector, not necessarily normalized
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Direction {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Direction {
    pub const Z_AXIS: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        self.z.mul_add(self.z, self.x.mul_add(self.x, self.y * self.y)).sqrt()
    }

    /// Unit vector along this direction, `None` for the zero vector
    pub fn normalized(&self) -> Option<Self> {
        let norm = self.norm();
        (norm.is_finite() && norm > 0.0)
            .then(|| Self::new(self.x / norm, self.y / norm, self.z / norm))
    }

    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Target composition: parallel lists of nuclides and their atom fractions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    pub nuclides: Vec<Nuclide>,
    pub atom_fractions: Vec<f64>,
}

impl Target {
    /// Single-nuclide target
    pub fn pure(nuclide: Nuclide) -> Self {
        Self {
            nuclides: vec![nuclide],
            atom_fractions: vec![1.0],
        }
    }

    pub fn fraction_sum(&self) -> f64 {
        self.atom_fractions.iter().sum()
    }

    /// Nuclide and fraction pairs, truncated to the shorter list
    pub fn components(&self) -> impl Iterator<Item = (Nuclide, f64)> + '_ {
        self.nuclides
            .iter()
            .copied()
            .zip(self.atom_fractions.iter().copied())
    }
}

/// Default event count when `executable_settings` omits `events`
pub const DEFAULT_EVENTS: u64 = 1000;

/// Options read only by the standalone MARLEY executable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutableSettings {
    pub events: u64,
    pub output: Vec<OutputSpec>,
}

impl Default for ExecutableSettings {
    fn default() -> Self {
        Self {
            events: DEFAULT_EVENTS,
            output: Vec::new(),
        }
    }
}

/// One output destination of the standalone executable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSpec {
    pub file: String,
    pub format: OutputFormat,
    pub mode: WriteMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Ascii,
    Hepevt,
    Json,
    Root,
}

impl OutputFormat {
    pub const VARIANTS: &'static [&'static str] = &["ascii", "hepevt", "json", "root"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Hepevt => "hepevt",
            Self::Json => "json",
            Self::Root => "root",
        }
    }

    /// Whether events can be appended to an existing file of this format
    pub const fn supports_append(self) -> bool {
        !matches!(self, Self::Json)
    }
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(Self::Ascii),
            "hepevt" => Ok(Self::Hepevt),
            "json" => Ok(Self::Json),
            "root" => Ok(Self::Root),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    Overwrite,
    Append,
}

impl WriteMode {
    pub const VARIANTS: &'static [&'static str] = &["overwrite", "append"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Append => "append",
        }
    }
}

impl FromStr for WriteMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(Self::Overwrite),
            "append" => Ok(Self::Append),
            _ => Err(()),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_normalized() {
        let dir = Direction::new(0.0, 3.0, 4.0).normalized().unwrap();
        assert!((dir.y - 0.6).abs() < 1e-12);
        assert!((dir.z - 0.8).abs() < 1e-12);
        assert!(Direction::new(0.0, 0.0, 0.0).normalized().is_none());
        assert_eq!(Direction::Z_AXIS.normalized(), Some(Direction::Z_AXIS));
    }

    #[test]
    fn test_target_components() {
        let target = Target {
            nuclides: vec![Nuclide::ARGON_40, Nuclide::from_pdg(1_000_180_390).unwrap()],
            atom_fractions: vec![0.75, 0.25],
        };
        assert!((target.fraction_sum() - 1.0).abs() < f64::EPSILON);
        let components: Vec<_> = target.components().collect();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].0, Nuclide::ARGON_40);
    }

    #[test]
    fn test_output_format_append_support() {
        assert!(OutputFormat::Root.supports_append());
        assert!(!OutputFormat::Json.supports_append());
        assert_eq!("hepevt".parse::<OutputFormat>(), Ok(OutputFormat::Hepevt));
        assert!("csv".parse::<OutputFormat>().is_err());
        assert_eq!("append".parse::<WriteMode>(), Ok(WriteMode::Append));
    }

    #[test]
    fn test_executable_settings_default() {
        let settings = ExecutableSettings::default();
        assert_eq!(settings.events, DEFAULT_EVENTS);
        assert!(settings.output.is_empty());
    }
}
