//! Generator blocks bound to documents on disk

mod common;

use marley_config::cli::commands::bind::{run, BindArgs};
use marley_config::cli::output::CommandOutput;
use marley_config::{BindingError, ConfigLoader, DirectionMode, GeneratorBinding};

const GENERATOR_BLOCK: &str = r#"{
  // solar neutrinos on argon
  type: "marley",
  label: "b8_nue",
  config: {
    marley_config_path: "marley_cfg/b8_osc_spect_ES_nue.js",
    direction: "isotropic",
    vertex_gen: { type: "bulk", config: { volume: "target_lar_pv" } },
  },
}"#;

#[test]
fn test_bind_fixture_relative_to_generator_file() {
    let dir = common::temp_dir();
    std::fs::create_dir(dir.path().join("marley_cfg")).unwrap();
    std::fs::copy(
        common::fixture("b8_osc_spect_ES_nue.js"),
        dir.path().join("marley_cfg/b8_osc_spect_ES_nue.js"),
    )
    .unwrap();
    let generator = common::write_file(dir.path(), "generator.json", GENERATOR_BLOCK);

    let binding = GeneratorBinding::from_file(&generator)
        .unwrap()
        .relative_to(dir.path());
    assert_eq!(binding.direction, DirectionMode::Isotropic);

    let resolved = binding.resolve(&ConfigLoader::default()).unwrap();
    assert_eq!(resolved.config.seed, 12345);

    let exported = resolved.with_run_seed(Some(2024)).export_config().unwrap();
    assert_eq!(exported["label"], "b8_nue");
    assert_eq!(exported["marley_config"]["seed"], 2024);
    assert_eq!(exported["marley_config"]["source"]["namecycle"], "b8_nue");
    assert_eq!(exported["vertex_generator"]["type"], "bulk");
}

#[test]
fn test_bind_command_output() {
    let dir = common::temp_dir();
    common::write_file(dir.path(), "mono.js", common::MONO_DOC);
    let generator = common::write_file(
        dir.path(),
        "generator.json",
        r#"{ type: "marley", label: "mono", config: { marley_config_path: "mono.js", direction: [1, 0, 0] } }"#,
    );

    let args = BindArgs {
        generator_file: generator,
        seed: None,
        relative_to_file: true,
    };
    let result = run(&args, &ConfigLoader::default()).unwrap();

    let json = result.to_json();
    assert_eq!(json["type"], "marley");
    assert_eq!(json["marley_config"]["seed"], 12345);
    assert_eq!(json["vertex_generator"]["type"], "point");

    let human = result.to_human();
    assert!(human.contains("label: \"mono\""));
}

#[test]
fn test_bind_reports_invalid_document() {
    let dir = common::temp_dir();
    let broken = common::MONO_DOC.replace("atom_fractions:[1.0]", "atom_fractions:[0.5]");
    let marley = common::write_file(dir.path(), "broken.js", &broken);

    let binding = GeneratorBinding::parse_str(&format!(
        r#"{{ type: "marley", label: "broken", config: {{ marley_config_path: {:?} }} }}"#,
        marley.display().to_string()
    ))
    .unwrap();

    match binding.resolve(&ConfigLoader::default()) {
        Err(BindingError::MarleyConfig { path, .. }) => assert_eq!(path, marley),
        other => panic!("Expected MarleyConfig error, got {other:?}"),
    }
}
