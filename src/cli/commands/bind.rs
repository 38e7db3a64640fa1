//! Implementation of the `marley-config bind` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::GeneratorBinding;
use crate::infrastructure::config::ConfigLoader;

#[derive(Args, Debug)]
pub struct BindArgs {
    /// File holding a G4SOLAr generator block of type "marley"
    pub generator_file: PathBuf,

    /// Run seed replacing the seed of the MARLEY document
    #[arg(long)]
    pub seed: Option<u64>,

    /// Resolve a relative marley_config_path against the generator file's directory
    #[arg(long)]
    pub relative_to_file: bool,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct BindOutput {
    pub exported: Value,
}

impl CommandOutput for BindOutput {
    fn to_human(&self) -> String {
        crate::infrastructure::literal::write(&self.exported)
            .trim_end()
            .to_string()
    }

    fn to_json(&self) -> Value {
        self.exported.clone()
    }
}

pub fn run(args: &BindArgs, loader: &ConfigLoader) -> Result<BindOutput> {
    let mut binding = GeneratorBinding::from_file(&args.generator_file).with_context(|| {
        format!("Invalid generator block in {}", args.generator_file.display())
    })?;

    if args.relative_to_file {
        if let Some(dir) = args.generator_file.parent() {
            binding = binding.relative_to(dir);
        }
    }

    let resolved = binding
        .resolve(loader)
        .with_context(|| format!("Failed to bind generator {:?}", binding.label))?
        .with_run_seed(args.seed);

    Ok(BindOutput {
        exported: resolved.export_config()?,
    })
}

pub fn execute(args: BindArgs, loader: &ConfigLoader, json_mode: bool) -> Result<()> {
    let result = run(&args, loader)?;
    output(&result, json_mode);
    Ok(())
}
