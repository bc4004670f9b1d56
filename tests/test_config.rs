use std::io::Write;

use shadewalk::config::{ConfigError, ShadeConfig};

#[test]
fn test_defaults() {
    let config = ShadeConfig::default();
    assert_eq!(config.meters_per_degree, 111_000.0);
    assert_eq!(config.default_height_m, 15.0);
    assert_eq!(config.meters_per_level, 3.0);
    assert_eq!(config.sun_cache_decimals, 3);
    assert_eq!(config.heat_alert_c, 35.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = ShadeConfig::from_toml_str("meters_per_level = 3.5\n").unwrap();
    assert_eq!(config.meters_per_level, 3.5);
    assert_eq!(config.meters_per_degree, 111_000.0);
    assert_eq!(ShadeConfig::from_toml_str("").unwrap(), ShadeConfig::default());
}

#[test]
fn test_invalid_values_are_rejected() {
    for contents in [
        "meters_per_degree = 0.0",
        "default_height_m = -1.0",
        "meters_per_level = nan",
        "sun_cache_decimals = 12",
        "heat_alert_c = inf",
    ] {
        let err = ShadeConfig::from_toml_str(contents).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{}: {:?}", contents, err);
    }
}

#[test]
fn test_unparseable_toml() {
    let err = ShadeConfig::from_toml_str("meters_per_level = \"tall\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "default_height_m = 12.0").unwrap();
    writeln!(file, "sun_cache_decimals = 4").unwrap();
    let config = ShadeConfig::load(file.path()).unwrap();
    assert_eq!(config.default_height_m, 12.0);
    assert_eq!(config.sun_cache_decimals, 4);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ShadeConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
