//! Implementation of the `marley-config show` command.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::infrastructure::config::ConfigLoader;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    /// Object-literal form, loadable again
    #[default]
    Literal,
    /// Plain JSON
    Json,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// MARLEY configuration file
    pub file: PathBuf,

    /// Output format (`--json` implies json)
    #[arg(short, long, value_enum, default_value_t = ShowFormat::Literal)]
    pub format: ShowFormat,
}

/// Normalized text of the document in the requested format
pub fn render(args: &ShowArgs, loader: &ConfigLoader, json_mode: bool) -> Result<String> {
    let config = loader
        .load_from_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    if json_mode || args.format == ShowFormat::Json {
        let value = ConfigLoader::to_json(&config)?;
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(ConfigLoader::to_literal(&config)?.trim_end().to_string())
    }
}

pub fn execute(args: ShowArgs, loader: &ConfigLoader, json_mode: bool) -> Result<()> {
    println!("{}", render(&args, loader, json_mode)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOC: &str = r#"// solar
{seed:7, direction:{x:0,y:0,z:1}, target:{nuclides:[1000180400], atom_fractions:[1]},
 reactions:["ve40ArCC_Bhattacharya2009.react"],
 source:{type:"tgraph", neutrino:"ve", tfile:"b8.root", namecycle:"b8_nue"},}"#;

    #[test]
    fn test_show_literal_reloads() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DOC.as_bytes()).unwrap();
        let loader = ConfigLoader::default();

        let args = ShowArgs {
            file: file.path().to_path_buf(),
            format: ShowFormat::Literal,
        };
        let text = render(&args, &loader, false).unwrap();
        assert!(!text.contains("//"));
        assert_eq!(
            loader.load_str(&text).unwrap(),
            loader.load_from_file(file.path()).unwrap()
        );
    }

    #[test]
    fn test_show_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DOC.as_bytes()).unwrap();

        let args = ShowArgs {
            file: file.path().to_path_buf(),
            format: ShowFormat::Json,
        };
        let text = render(&args, &ConfigLoader::default(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["source"]["namecycle"], "b8_nue");
    }

    #[test]
    fn test_show_missing_file() {
        let args = ShowArgs {
            file: PathBuf::from("/nonexistent/marley.js"),
            format: ShowFormat::Literal,
        };
        let err = render(&args, &ConfigLoader::default(), false).unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }
}
