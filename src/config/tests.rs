//! Tests for config module.

use super::*;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

// ==================== Duration parsing tests ====================

#[test]
fn test_parse_duration_seconds() {
    assert_eq!(duration::parse_duration("30s").unwrap(), Duration::from_secs(30));
}

#[test]
fn test_parse_duration_hours() {
    assert_eq!(duration::parse_duration("2h").unwrap(), Duration::from_secs(7200));
}

#[test]
fn test_parse_duration_milliseconds() {
    assert_eq!(duration::parse_duration("250ms").unwrap(), Duration::from_millis(250));
}

#[test]
fn test_parse_duration_compound() {
    assert_eq!(duration::parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
}

#[test]
fn test_parse_duration_bare_number() {
    assert_eq!(duration::parse_duration("15").unwrap(), Duration::from_secs(15));
}

#[test]
fn test_parse_duration_empty() {
    assert_eq!(duration::parse_duration("").unwrap(), Duration::ZERO);
}

#[test]
fn test_parse_duration_invalid_unit() {
    let result = duration::parse_duration("10x");
    assert!(result.unwrap_err().contains("unknown duration unit"));
}

#[test]
fn test_parse_duration_overflow() {
    let result = duration::parse_duration("99999999999999999999999d");
    assert!(result.unwrap_err().contains("out of range"));
}

#[test]
fn test_overflowing_duration_is_parse_error() {
    let result = from_yaml("app:\n  name: x\nmarket:\n  stale_after: 99999999999999999999999d\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_parse_duration_invalid_number() {
    assert!(duration::parse_duration("h").is_err());
}

// ==================== YAML loading tests ====================

/// Parse and validate config from a YAML string.
fn from_yaml(yaml: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}

#[test]
fn test_minimal_config_uses_defaults() {
    let cfg = from_yaml(
        r#"
app:
  name: conversion
"#,
    )
    .unwrap();

    assert_eq!(cfg.app.name, "conversion");
    assert_eq!(cfg.app.env, "development");
    assert!(cfg.app.log_level.is_none());
    assert_eq!(cfg.server.bind, "0.0.0.0:8000");
    assert_eq!(cfg.market.source, SourceKind::Live);
    assert_eq!(cfg.market.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.market.request_timeout, Duration::from_secs(10));
    assert_eq!(cfg.market.stale_after, Duration::from_secs(7200));
    assert_eq!(cfg.market.stale_after, crate::market::DEFAULT_STALE_AFTER);
    assert!(cfg.market.fixture_path.is_none());
}

#[test]
fn test_load_all_fields() {
    let cfg = from_yaml(
        r#"
app:
  name: conversion
  env: production
  log_level: debug

server:
  bind: 127.0.0.1:9000

market:
  source: live
  base_url: http://localhost:4000/api/v2
  request_timeout: 3s
  stale_after: 30m
"#,
    )
    .unwrap();

    assert_eq!(cfg.app.env, "production");
    assert_eq!(cfg.app.log_level, Some("debug".to_string()));
    assert_eq!(cfg.server.bind, "127.0.0.1:9000");
    assert_eq!(cfg.market.base_url, "http://localhost:4000/api/v2");
    assert_eq!(cfg.market.request_timeout, Duration::from_secs(3));
    assert_eq!(cfg.market.stale_after, Duration::from_secs(1800));
}

#[test]
fn test_fixture_source() {
    let cfg = from_yaml(
        r#"
app:
  name: conversion
market:
  source: fixture
  fixture_path: fixtures/markets.json
"#,
    )
    .unwrap();

    assert_eq!(cfg.market.source, SourceKind::Fixture);
    assert_eq!(cfg.market.fixture_path.as_deref(), Some("fixtures/markets.json"));
}

// ==================== Validation tests ====================

#[test]
fn test_validation_empty_name() {
    let result = from_yaml("app:\n  name: \"\"\n");
    assert!(matches!(result, Err(ConfigError::Validation { field: "app.name", .. })));
}

#[test]
fn test_validation_fixture_without_path() {
    let result = from_yaml("app:\n  name: x\nmarket:\n  source: fixture\n");
    assert!(matches!(
        result,
        Err(ConfigError::Validation { field: "market.fixture_path", .. })
    ));
}

#[test]
fn test_validation_bad_bind() {
    let result = from_yaml("app:\n  name: x\nserver:\n  bind: localhost\n");
    assert!(matches!(result, Err(ConfigError::Validation { field: "server.bind", .. })));
}

#[test]
fn test_validation_bad_base_url() {
    let result = from_yaml("app:\n  name: x\nmarket:\n  base_url: ftp://example.com\n");
    assert!(matches!(
        result,
        Err(ConfigError::Validation { field: "market.base_url", .. })
    ));
}

#[test]
fn test_unknown_source_is_parse_error() {
    let result = from_yaml("app:\n  name: x\nmarket:\n  source: websocket\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_duration_is_parse_error() {
    let result = from_yaml("app:\n  name: x\nmarket:\n  stale_after: soon\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_missing_app_section() {
    let result = from_yaml("server:\n  bind: 0.0.0.0:8000\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

// ==================== File loading tests ====================

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "app:\n  name: from-file\nserver:\n  bind: 0.0.0.0:8080").unwrap();

    let cfg = Config::load(file.path().to_str().unwrap()).unwrap();
    assert_eq!(cfg.app.name, "from-file");
    assert_eq!(cfg.server.bind, "0.0.0.0:8080");
}

#[test]
fn test_load_missing_file() {
    let result = Config::load("/nonexistent/config.yaml");
    assert!(matches!(result, Err(ConfigError::ReadFile(_))));
}
