//! Acceptance and rejection rules of the run-configuration loader

mod common;

use common::MONO_DOC;
use marley_config::{ConfigError, ConfigLoader, LoaderOptions, Source};

fn load(text: &str) -> Result<marley_config::RunConfiguration, ConfigError> {
    ConfigLoader::default().load_str(text)
}

fn error_path(err: &ConfigError) -> String {
    err.path().map(ToString::to_string).unwrap_or_default()
}

#[test]
fn test_monoenergetic_scenario_is_accepted() {
    let config = load(MONO_DOC).unwrap();
    assert_eq!(config.source.energy(), Some(15.0));
    assert!(matches!(config.source, Source::Monoenergetic { .. }));
}

#[test]
fn test_half_fraction_is_rejected() {
    let text = MONO_DOC.replace("atom_fractions:[1.0]", "atom_fractions:[0.5]");
    match load(&text) {
        Err(err @ ConfigError::FractionSum { sum, .. }) => {
            assert!((sum - 0.5).abs() < 1e-12);
            assert_eq!(error_path(&err), "target.atom_fractions");
        }
        other => panic!("Expected FractionSum, got {other:?}"),
    }
}

#[test]
fn test_monoenergetic_requires_energy() {
    let text = MONO_DOC.replace(", energy:15", "");
    let err = load(&text).unwrap_err();
    assert!(matches!(err, ConfigError::MissingField { .. }));
    assert_eq!(error_path(&err), "source.energy");
}

#[test]
fn test_monoenergetic_energy_must_be_numeric() {
    let text = MONO_DOC.replace("energy:15", r#"energy:"15""#);
    let err = load(&text).unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    assert_eq!(error_path(&err), "source.energy");
}

#[test]
fn test_tgraph_requires_tfile_and_namecycle() {
    let tgraph = MONO_DOC.replace(
        r#"source:{type:"monoenergetic", neutrino:"ve", energy:15}"#,
        r#"source:{type:"tgraph", neutrino:"ve", tfile:"b8.root", namecycle:"b8_nue"}"#,
    );
    assert!(load(&tgraph).is_ok());

    let without_tfile = tgraph.replace(r#"tfile:"b8.root", "#, "");
    assert_eq!(error_path(&load(&without_tfile).unwrap_err()), "source.tfile");

    let without_namecycle = tgraph.replace(r#", namecycle:"b8_nue""#, "");
    assert_eq!(
        error_path(&load(&without_namecycle).unwrap_err()),
        "source.namecycle"
    );

    let empty_tfile = tgraph.replace(r#"tfile:"b8.root""#, r#"tfile:"""#);
    assert!(matches!(
        load(&empty_tfile),
        Err(ConfigError::EmptyString { .. })
    ));
}

#[test]
fn test_length_mismatch_is_rejected() {
    let text = MONO_DOC.replace("atom_fractions:[1.0]", "atom_fractions:[0.5, 0.5]");
    let err = load(&text).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::LengthMismatch {
            nuclides: 1,
            fractions: 2,
            ..
        }
    ));
    assert_eq!(error_path(&err), "target.atom_fractions");
}

#[test]
fn test_mixed_target_is_accepted() {
    let text = MONO_DOC.replace(
        "target:{nuclides:[1000180400], atom_fractions:[1.0]}",
        "target:{nuclides:[1000180400, 1000180360], atom_fractions:[0.996, 0.004]}",
    );
    let config = load(&text).unwrap();
    assert_eq!(config.target.nuclides.len(), 2);
}

#[test]
fn test_unknown_source_type() {
    let text = MONO_DOC.replace("monoenergetic", "fermi-dirac");
    match load(&text) {
        Err(ConfigError::UnknownVariant { value, .. }) => assert_eq!(value, "fermi-dirac"),
        other => panic!("Expected UnknownVariant, got {other:?}"),
    }
}

#[test]
fn test_unknown_neutrino_flavor() {
    let text = MONO_DOC.replace(r#"neutrino:"ve""#, r#"neutrino:"nu_e""#);
    assert!(matches!(
        load(&text),
        Err(ConfigError::UnknownVariant { .. })
    ));
}

#[test]
fn test_pdg_neutrino_code_is_accepted() {
    let text = MONO_DOC.replace(r#"neutrino:"ve""#, "neutrino:-12");
    let config = load(&text).unwrap();
    assert_eq!(config.source.neutrino().as_str(), "vebar");
}

#[test]
fn test_syntax_error_reports_line() {
    let text = "{\n  seed: 12345,\n  direction: {x:0 y:0, z:1},\n}";
    match load(text) {
        Err(ConfigError::Syntax { line, .. }) => assert_eq!(line, 3),
        other => panic!("Expected Syntax error, got {other:?}"),
    }
}

#[test]
fn test_root_must_be_object() {
    assert!(matches!(load("[1, 2]"), Err(ConfigError::Syntax { .. })));
}

#[test]
fn test_unknown_keys_reported_then_rejected_when_strict() {
    let text = MONO_DOC.replace("seed:12345", "seed:12345, geometry:\"solar\"");

    let report = ConfigLoader::default().load_str_with_report(&text).unwrap();
    assert_eq!(report.unknown_keys.len(), 1);
    assert_eq!(report.unknown_keys[0].to_string(), "geometry");

    let strict = ConfigLoader::new(LoaderOptions {
        strict: true,
        ..LoaderOptions::default()
    });
    assert!(matches!(
        strict.load_str(&text),
        Err(ConfigError::UnknownKey { .. })
    ));
}

#[test]
fn test_json_output_cannot_append() {
    let text = MONO_DOC.replace(
        "energy:15}",
        r#"energy:15}, executable_settings:{output:[{file:"ev.json", format:"json", mode:"append"}]}"#,
    );
    let err = load(&text).unwrap_err();
    assert_eq!(error_path(&err), "executable_settings.output[0].mode");
}

#[test]
fn test_executable_settings_defaults() {
    let text = MONO_DOC.replace(
        "energy:15}",
        r#"energy:15}, executable_settings:{output:[{file:"ev.hepevt", format:"hepevt"}]}"#,
    );
    let settings = load(&text).unwrap().executable_settings.unwrap();
    assert_eq!(settings.events, 1000);
    assert_eq!(settings.output[0].mode.as_str(), "overwrite");
}

#[test]
fn test_negative_seed_is_rejected() {
    let text = MONO_DOC.replace("seed:12345", "seed:-1");
    let err = load(&text).unwrap_err();
    assert_eq!(error_path(&err), "seed");
}
