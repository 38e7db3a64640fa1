//! Services built on top of the document loader

pub mod generator_binding;

pub use generator_binding::ResolvedGenerator;
