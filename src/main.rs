//! marley-config CLI entry point.

use clap::Parser;

use marley_config::cli::{commands, handle_error, Cli, Commands};
use marley_config::infrastructure::config::{ConfigLoader, LoaderOptions, SettingsLoader};
use marley_config::infrastructure::logging::LoggerImpl;

fn main() {
    let cli = Cli::parse();

    let mut settings = match SettingsLoader::load(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(err) => handle_error(err, cli.json),
    };
    if let Some(level) = cli.verbosity_level() {
        settings.logging.level = level.to_string();
    }
    if cli.strict {
        settings.loader.strict = true;
    }
    if let Some(tolerance) = cli.tolerance {
        settings.loader.fraction_tolerance = tolerance;
    }
    if let Err(err) = SettingsLoader::validate(&settings) {
        handle_error(err.into(), cli.json);
    }

    let _logger = match LoggerImpl::init(&settings.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let loader = ConfigLoader::new(LoaderOptions::from(&settings.loader));

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args, &loader, cli.json),
        Commands::Show(args) => commands::show::execute(args, &loader, cli.json),
        Commands::Bind(args) => commands::bind::execute(args, &loader, cli.json),
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
