// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use super::{LogConfig, LogLevel, LogRotation, rolling_parts};

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::from_u8(0), Some(LogLevel::SILENT));
    assert_eq!(LogLevel::from_u8(6), Some(LogLevel::DUMP));
    assert_eq!(LogLevel::from_u8(7), None);
    assert!(LogLevel::new(9).is_err());
    assert_eq!(u8::from(LogLevel::DEBUG), 4);
}

#[test]
fn test_log_level_filters() {
    let filters: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();
    insta::assert_debug_snapshot!(filters, @r#"
    [
        "off",
        "error",
        "warn",
        "info,hyper=warn,reqwest=warn",
        "debug,hyper=warn,reqwest=warn",
        "trace,hyper=warn,reqwest=warn",
        "trace",
    ]
    "#);
}

#[test]
fn test_log_level_deserialize_rejects_out_of_range() {
    let ok: LogLevel = serde_json::from_str("5").unwrap();
    assert_eq!(ok, LogLevel::TRACE);
    assert!(serde_json::from_str::<LogLevel>("12").is_err());
}

#[test]
fn test_log_rotation_serde() {
    let rotation: LogRotation = serde_json::from_str("\"hourly\"").unwrap();
    assert_eq!(rotation, LogRotation::Hourly);
    assert_eq!(LogRotation::default(), LogRotation::Daily);
    assert_eq!(LogRotation::Never.to_string(), "never");
    assert!(serde_json::from_str::<LogRotation>("\"weekly\"").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert_eq!(config.rotation(), LogRotation::Daily);
    assert_eq!(config.max_log_files(), 3);
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .with_log_file(PathBuf::from("logs/sync.log"))
        .with_rotation(LogRotation::Never)
        .with_max_log_files(5)
        .build();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.log_file(), Some(Path::new("logs/sync.log")));
    assert_eq!(config.rotation(), LogRotation::Never);
    assert_eq!(config.max_log_files(), 5);
}

#[test]
fn test_rolling_parts() {
    assert_eq!(
        rolling_parts(Path::new("git-mirror.log")),
        (PathBuf::from("."), "git-mirror".to_string(), Some("log".to_string()))
    );
    assert_eq!(
        rolling_parts(Path::new("/var/log/mirror/sync.txt")),
        (
            PathBuf::from("/var/log/mirror"),
            "sync".to_string(),
            Some("txt".to_string())
        )
    );
    assert_eq!(
        rolling_parts(Path::new("logs/mirror")),
        (PathBuf::from("logs"), "mirror".to_string(), None)
    );
}
