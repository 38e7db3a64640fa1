//! Environment overrides of the tool settings

mod common;

use marley_config::infrastructure::config::{SettingsError, SettingsLoader};
use marley_config::infrastructure::logging::LogFormat;
use marley_config::LoaderOptions;

#[test]
fn test_env_overrides_loader_settings() {
    temp_env::with_vars(
        [
            ("MARLEYCFG_LOADER__STRICT", Some("true")),
            ("MARLEYCFG_LOADER__FRACTION_TOLERANCE", Some("0.01")),
        ],
        || {
            let settings = SettingsLoader::load(None).unwrap();
            assert!(settings.loader.strict);
            assert!((settings.loader.fraction_tolerance - 0.01).abs() < f64::EPSILON);

            let options = LoaderOptions::from(&settings.loader);
            assert!(options.strict);
        },
    );
}

#[test]
fn test_env_overrides_logging_settings() {
    temp_env::with_vars(
        [
            ("MARLEYCFG_LOGGING__LEVEL", Some("debug")),
            ("MARLEYCFG_LOGGING__FORMAT", Some("json")),
        ],
        || {
            let settings = SettingsLoader::load(None).unwrap();
            assert_eq!(settings.logging.level, "debug");
            assert_eq!(settings.logging.format, LogFormat::Json);
        },
    );
}

#[test]
fn test_env_wins_over_settings_file() {
    let dir = common::temp_dir();
    let file = common::write_file(
        dir.path(),
        "settings.yaml",
        "loader:\n  fraction_tolerance: 0.001\nlogging:\n  level: warn\n",
    );

    temp_env::with_var("MARLEYCFG_LOGGING__LEVEL", Some("trace"), || {
        let settings = SettingsLoader::load(Some(file.as_path())).unwrap();
        assert!((settings.loader.fraction_tolerance - 0.001).abs() < f64::EPSILON);
        assert_eq!(settings.logging.level, "trace");
    });
}

#[test]
fn test_invalid_env_tolerance_is_rejected() {
    temp_env::with_var("MARLEYCFG_LOADER__FRACTION_TOLERANCE", Some("-1"), || {
        let err = SettingsLoader::load(None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SettingsError>(),
            Some(SettingsError::InvalidTolerance(_))
        ));
    });
}
