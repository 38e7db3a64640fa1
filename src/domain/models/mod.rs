pub mod generator;
pub mod nuclide;
pub mod path;
pub mod run_config;
pub mod source;

pub use generator::{DirectionMode, GeneratorBinding, VertexGenerator, MARLEY_GENERATOR_TYPE};
pub use nuclide::Nuclide;
pub use path::FieldPath;
pub use run_config::{
    Direction, ExecutableSettings, OutputFormat, OutputSpec, RunConfiguration, Target,
    WriteMode, DEFAULT_EVENTS,
};
pub use source::{NeutrinoFlavor, RootSpectrum, Source};
