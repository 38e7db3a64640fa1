//! Implementation of the `marley-config check` command.

use anyhow::Result;
use clap::Args;
use comfy_table::Cell;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::cli::output::{base_table, header, output, status_cell, truncate, CommandOutput};
use crate::domain::models::{RunConfiguration, Source};
use crate::infrastructure::config::ConfigLoader;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// MARLEY configuration files to validate
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

/// Outcome for a single document
#[derive(Debug, Serialize)]
pub struct CheckEntry {
    pub file: PathBuf,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CheckOutput {
    pub entries: Vec<CheckEntry>,
}

impl CheckOutput {
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.ok).count()
    }
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut table = base_table();
        table.set_header(header(["File", "Status", "Source", "Events", "Details"]));

        for entry in &self.entries {
            let details = match (&entry.error, entry.unknown_keys.is_empty()) {
                (Some(error), _) => truncate(error, 80),
                (None, false) => format!("unknown keys: {}", entry.unknown_keys.join(", ")),
                (None, true) => String::new(),
            };
            table.add_row(vec![
                Cell::new(entry.file.display()),
                status_cell(entry.ok),
                Cell::new(entry.source.as_deref().unwrap_or("-")),
                Cell::new(entry.events.map_or_else(|| "-".to_string(), |n| n.to_string())),
                Cell::new(details),
            ]);
        }

        let total = self.entries.len();
        format!(
            "{table}\n{} of {total} document{} valid",
            total - self.failures(),
            if total == 1 { "" } else { "s" }
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// One-line description of a neutrino source
pub fn describe_source(source: &Source) -> String {
    match source {
        Source::Monoenergetic { neutrino, energy } => {
            format!("monoenergetic {neutrino} {energy} MeV")
        }
        Source::Tgraph(spectrum) | Source::Th1(spectrum) => {
            format!("{} {} {}:{}", source.kind(), spectrum.neutrino, spectrum.tfile, spectrum.namecycle)
        }
    }
}

fn entry_for(file: PathBuf, config: &RunConfiguration, unknown_keys: Vec<String>) -> CheckEntry {
    CheckEntry {
        file,
        ok: true,
        source: Some(describe_source(&config.source)),
        events: config.executable_settings.as_ref().map(|settings| settings.events),
        unknown_keys,
        error: None,
    }
}

/// Validate every file, without stopping at the first failure
pub fn run(args: &CheckArgs, loader: &ConfigLoader) -> CheckOutput {
    let entries = args
        .files
        .iter()
        .map(|file| match loader.load_file_with_report(file) {
            Ok(report) => {
                let unknown = report.unknown_keys.iter().map(ToString::to_string).collect();
                entry_for(file.clone(), &report.config, unknown)
            }
            Err(err) => {
                warn!(file = %file.display(), error = %err, "document rejected");
                CheckEntry {
                    file: file.clone(),
                    ok: false,
                    source: None,
                    events: None,
                    unknown_keys: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        })
        .collect();
    CheckOutput { entries }
}

pub fn execute(args: CheckArgs, loader: &ConfigLoader, json_mode: bool) -> Result<()> {
    let result = run(&args, loader);
    output(&result, json_mode);

    let failures = result.failures();
    info!(files = result.entries.len(), failures, "check finished");
    if failures > 0 {
        anyhow::bail!("{failures} of {} documents failed validation", result.entries.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_doc(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_check_reports_each_file() {
        let good = write_doc(
            r#"{seed:1, direction:{x:0,y:0,z:1}, target:{nuclides:[1000180400], atom_fractions:[1]},
                reactions:["ES.react"], source:{type:"monoenergetic", neutrino:"vu", energy:10},
                executable_settings:{events:50, output:[{file:"out.ascii", format:"ascii"}]}}"#,
        );
        let bad = write_doc("{seed: 1,");

        let args = CheckArgs {
            files: vec![good.path().to_path_buf(), bad.path().to_path_buf()],
        };
        let result = run(&args, &ConfigLoader::default());

        assert_eq!(result.failures(), 1);
        assert_eq!(result.entries[0].events, Some(50));
        assert_eq!(
            result.entries[0].source.as_deref(),
            Some("monoenergetic vu 10 MeV")
        );
        assert!(result.entries[1].error.is_some());

        let json = result.to_json();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(json[1]["ok"], false);

        let human = result.to_human();
        assert!(human.contains("1 of 2 documents valid"));
    }
}
