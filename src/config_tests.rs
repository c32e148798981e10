use super::*;
use crate::logging::LogError;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_defaults_when_no_path() {
    let settings = load_settings(None).expect("defaults");
    assert_eq!(settings, LogSettings::default());
    assert_eq!(settings.logging.mode, OutputMode::Stdio);
    assert!(settings.logging.color);
    assert!(settings.logging.dir.is_none());
}

#[test]
fn test_defaults_when_file_absent() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("daylog.toml");
    let settings = load_settings(Some(&missing)).expect("defaults");
    assert_eq!(settings, LogSettings::default());
}

#[test]
fn test_empty_toml_produces_defaults() {
    let settings: LogSettings = toml::from_str("").expect("Should parse empty TOML");
    assert_eq!(settings, LogSettings::default());
}

#[test]
fn test_load_file_mode() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("daylog.toml");
    fs::write(
        &path,
        "[logging]\nmode = \"file\"\ndir = \"/var/log/movies\"\ncolor = false\n",
    )
    .expect("write config");

    let settings = load_settings(Some(&path)).expect("parse config");
    assert_eq!(settings.logging.mode, OutputMode::File);
    assert_eq!(
        settings.logging.dir.as_deref(),
        Some(Path::new("/var/log/movies"))
    );
    assert!(!settings.logging.color);
}

#[test]
fn test_numeric_mode_selector() {
    let settings: LogSettings = toml::from_str("[logging]\nmode = \"2\"\n").expect("parse");
    assert_eq!(settings.logging.mode, OutputMode::File);
}

#[test]
fn test_invalid_mode_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("daylog.toml");
    fs::write(&path, "[logging]\nmode = \"syslog\"\n").expect("write config");

    let err = load_settings(Some(&path)).unwrap_err();
    assert!(matches!(err, LogError::ConfigParse(_)));
    assert!(err.to_string().contains("syslog"));
}

#[test]
fn test_unknown_field_is_rejected() {
    let result: Result<LogSettings, _> = toml::from_str("[logging]\nlevel = \"debug\"\n");
    assert!(result.is_err());
}

#[test]
fn test_unreadable_config_reports_path() {
    let dir = tempdir().expect("tempdir");
    // A directory exists but cannot be read as a file.
    let err = load_settings(Some(dir.path())).unwrap_err();
    assert!(matches!(err, LogError::ConfigRead { .. }));
}

#[test]
fn test_overrides_replace_file_values() {
    let mut settings = LogSettings::default();
    settings.apply_overrides(Some(OutputMode::File), Some("/tmp/logs".into()), true);
    assert_eq!(settings.logging.mode, OutputMode::File);
    assert_eq!(settings.logging.dir.as_deref(), Some(Path::new("/tmp/logs")));
    assert!(!settings.logging.color);
}

#[test]
fn test_absent_overrides_keep_file_values() {
    let mut settings: LogSettings =
        toml::from_str("[logging]\nmode = \"file\"\ndir = \"/srv/logs\"\n").expect("parse");
    settings.apply_overrides(None, None, false);
    assert_eq!(settings.logging.mode, OutputMode::File);
    assert_eq!(settings.logging.dir.as_deref(), Some(Path::new("/srv/logs")));
    assert!(settings.logging.color);
}
