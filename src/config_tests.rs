#![allow(clippy::unwrap_used)]

use super::*;
use std::collections::HashMap;

fn config(vars: &[(&str, &str)]) -> Result<Config> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_under_home() {
    let cfg = config(&[("MONEYRISK_HOME", "/tmp/mr")]).unwrap();
    assert_eq!(cfg.data_dir, PathBuf::from("/tmp/mr"));
    assert_eq!(cfg.db_path, PathBuf::from("/tmp/mr/moneyrisk.db"));
    assert_eq!(cfg.log_filter, "info");
    assert_eq!(cfg.log_target, LogTarget::File(PathBuf::from("/tmp/mr/moneyrisk.log")));
}

#[test]
fn test_explicit_db_and_log_file() {
    let cfg = config(&[
        ("MONEYRISK_HOME", "/tmp/mr"),
        ("MONEYRISK_DB", "/data/other.db"),
        ("MONEYRISK_LOG_FILE", "/var/log/mr.log"),
    ])
    .unwrap();
    assert_eq!(cfg.db_path, PathBuf::from("/data/other.db"));
    assert_eq!(cfg.log_target, LogTarget::File(PathBuf::from("/var/log/mr.log")));
}

#[test]
fn test_stderr_log_target() {
    let cfg = config(&[("MONEYRISK_HOME", "/tmp/mr"), ("MONEYRISK_LOG_FILE", "STDERR")]).unwrap();
    assert_eq!(cfg.log_target, LogTarget::Stderr);
}

#[test]
fn test_log_filter_precedence() {
    let cfg = config(&[("MONEYRISK_HOME", "/tmp/mr"), ("RUST_LOG", "warn")]).unwrap();
    assert_eq!(cfg.log_filter, "warn");

    let cfg = config(&[
        ("MONEYRISK_HOME", "/tmp/mr"),
        ("RUST_LOG", "warn"),
        ("MONEYRISK_LOG", "moneyrisk=debug"),
    ])
    .unwrap();
    assert_eq!(cfg.log_filter, "moneyrisk=debug");
}

#[test]
fn test_empty_values_are_unset() {
    let cfg = config(&[("MONEYRISK_HOME", "/tmp/mr"), ("MONEYRISK_DB", "  "), ("MONEYRISK_LOG", "")])
        .unwrap();
    assert_eq!(cfg.db_path, PathBuf::from("/tmp/mr/moneyrisk.db"));
    assert_eq!(cfg.log_filter, "info");
}

#[test]
fn test_ensure_dirs_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().join("home");
    let db = dir.path().join("db").join("x.db");
    let cfg = config(&[
        ("MONEYRISK_HOME", home.to_str().unwrap()),
        ("MONEYRISK_DB", db.to_str().unwrap()),
    ])
    .unwrap();

    cfg.ensure_dirs().unwrap();
    assert!(home.is_dir());
    assert!(dir.path().join("db").is_dir());
}
