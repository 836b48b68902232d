use agrimind_core::consts::{DEFAULT_CONFIDENCE, DEFAULT_FORECAST_EPOCHS, DEFAULT_ZONE_COUNT};
use agrimind_core::error::AgriError;
use agrimind_core::pipeline::{AnalyticsConfig, AnalyticsStage};

mod common;

#[test]
fn test_default_values() {
    let config = AnalyticsConfig::default();
    assert_eq!(config.trend.window, 3);
    assert_eq!(config.trend.rainfall_deficit_ratio, 0.85);
    assert_eq!(config.trend.heat_stress_celsius, 32.0);
    assert_eq!(config.forecast.hidden_units, 8);
    assert_eq!(config.forecast.epochs, DEFAULT_FORECAST_EPOCHS);
    assert_eq!(config.forecast.learning_rate, 0.05);
    assert_eq!(config.forecast.horizon, 3);
    assert_eq!(config.zoning.zone_count, DEFAULT_ZONE_COUNT);
    assert_eq!(config.zoning.max_width, 1024);
    assert_eq!(config.detection.confidence, DEFAULT_CONFIDENCE);
    assert_eq!(config.advice.dip_ratio, 0.95);
}

#[test]
fn test_toml_roundtrip() {
    let config = AnalyticsConfig::default();
    let text = toml::to_string_pretty(&config).unwrap();
    assert_eq!(AnalyticsConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = AnalyticsConfig::from_toml_str(
        "[forecast]\nepochs = 10\n\n[detection]\nconfidence = 0.7\n",
    )
    .unwrap();
    assert_eq!(config.forecast.epochs, 10);
    assert_eq!(config.forecast.hidden_units, 8);
    assert_eq!(config.detection.confidence, 0.7);
    assert_eq!(config.detection.frame_interval_ms, 16);
    assert_eq!(config.trend, AnalyticsConfig::default().trend);
}

#[test]
fn test_empty_toml_is_default() {
    assert_eq!(AnalyticsConfig::from_toml_str("").unwrap(), AnalyticsConfig::default());
}

#[test]
fn test_invalid_toml_is_config_error() {
    let err = AnalyticsConfig::from_toml_str("[forecast]\nepochs = \"many\"\n").unwrap_err();
    assert!(matches!(err, AgriError::Config(_)));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_file(dir.path(), "agrimind.toml", "[zoning]\nzone_count = 5\n");
    assert_eq!(AnalyticsConfig::load(&path).unwrap().zoning.zone_count, 5);
    assert!(matches!(
        AnalyticsConfig::load(&dir.path().join("missing.toml")),
        Err(AgriError::Io(_))
    ));
}

#[test]
fn test_stage_display() {
    assert_eq!(AnalyticsStage::Training.to_string(), "Training forecast");
}
