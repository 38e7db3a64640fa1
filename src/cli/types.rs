//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::{bind::BindArgs, check::CheckArgs, show::ShowArgs};

#[derive(Parser, Debug)]
#[command(name = "marley-config")]
#[command(about = "Load and validate MARLEY run configurations for G4SOLAr", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Settings file merged over marley-config.yaml
    #[arg(long, global = true, env = "MARLEYCFG_SETTINGS", value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Reject documents containing unrecognized keys
    #[arg(long, global = true)]
    pub strict: bool,

    /// Allowed deviation of the atom fraction sum from 1.0
    #[arg(long, global = true, value_name = "F")]
    pub tolerance: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate one or more MARLEY configuration files
    Check(CheckArgs),

    /// Print the normalized form of a configuration file
    Show(ShowArgs),

    /// Resolve a G4SOLAr marley generator block and print its exported config
    Bind(BindArgs),
}

impl Cli {
    /// Log level implied by the verbosity flag, if any
    pub const fn verbosity_level(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }
}
