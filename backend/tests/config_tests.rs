//! Configuration loading from environment variables and pricing table files.

use std::io::Write;
use std::sync::Arc;

use rust_decimal_macros::dec;

use firewood_dispatch::config::{AppConfig, ConfigError};
use firewood_dispatch::models::FixedClock;

mod support;
use support::{creation_instant, with_scoped_env};

const VARS: [&str; 4] = ["HOST", "PORT", "DISPATCH_DRIVER_PREFIX", "DISPATCH_PRICING_TABLE"];

fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
    VARS.iter().map(|k| (*k, None)).collect()
}

#[test]
fn test_defaults_when_unset() {
    let config = with_scoped_env(&cleared(), AppConfig::from_env).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.bind_address(), "0.0.0.0:8080");
    assert_eq!(config.driver_prefix, "driver-");
}

#[test]
fn test_reads_all_variables() {
    let config = with_scoped_env(
        &[
            ("HOST", Some("127.0.0.1")),
            ("PORT", Some("9090")),
            ("DISPATCH_DRIVER_PREFIX", Some("drv_")),
            ("DISPATCH_PRICING_TABLE", Some("/etc/dispatch/pricing.toml")),
        ],
        AppConfig::from_env,
    )
    .unwrap();

    assert_eq!(config.bind_address(), "127.0.0.1:9090");
    assert_eq!(config.driver_prefix, "drv_");
    assert_eq!(
        config.pricing_table_path.as_deref(),
        Some(std::path::Path::new("/etc/dispatch/pricing.toml"))
    );
}

#[test]
fn test_invalid_port() {
    let mut changes = cleared();
    changes.push(("PORT", Some("eighty")));
    let err = with_scoped_env(&changes, AppConfig::from_env).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort { .. }));
    assert!(err.to_string().contains("eighty"));
}

#[test]
fn test_blank_pricing_path_is_ignored() {
    let mut changes = cleared();
    changes.push(("DISPATCH_PRICING_TABLE", Some("  ")));
    let config = with_scoped_env(&changes, AppConfig::from_env).unwrap();
    assert!(config.pricing_table_path.is_none());
}

#[test]
fn test_pricing_table_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
default_price = 11

[[rules]]
keyword = "face cord"
unit_price = 95

[[rules]]
keyword = "cord"
unit_price = 210
"#
    )
    .unwrap();

    let config = AppConfig {
        pricing_table_path: Some(file.path().to_path_buf()),
        ..AppConfig::default()
    };
    let engine = config
        .build_engine(Arc::new(FixedClock::new(creation_instant())))
        .unwrap();
    assert_eq!(engine.pricing().price(Some("Face Cord, cord, pine")), dec!(316));
}

#[test]
fn test_missing_pricing_file() {
    let config = AppConfig {
        pricing_table_path: Some("/definitely/not/here.toml".into()),
        ..AppConfig::default()
    };
    assert!(matches!(
        config.load_pricing_table(),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_invalid_pricing_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "default_price = -5").unwrap();
    let config = AppConfig {
        pricing_table_path: Some(file.path().to_path_buf()),
        ..AppConfig::default()
    };
    let err = config.load_pricing_table().unwrap_err();
    assert!(matches!(err, ConfigError::PricingTable { .. }));
}

#[test]
fn test_custom_driver_prefix_flows_into_numbers() {
    let config = AppConfig {
        driver_prefix: "drv_".to_string(),
        ..AppConfig::default()
    };
    let engine = config
        .build_engine(Arc::new(FixedClock::new(creation_instant())))
        .unwrap();
    let number = engine
        .numberer()
        .generate(creation_instant(), "2024-06-14", &["drv_8", "drv_3"]);
    assert_eq!(number, "DS-240610-FRI-D38");
}
