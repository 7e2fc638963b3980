//! Environment overlay tests for `RepoboxConfig::from_env`
//!
//! Environment variables are process-global, so every test here runs serially
//! and restores what it touched.

use repobox::{ConfigFormat, RepoboxConfig};
use serial_test::serial;
use std::env;

const KEYS: &[&str] = &[
    "REPOBOX_MAX_CONTENT_BYTES",
    "REPOBOX_MAX_FILES",
    "REPOBOX_MAX_DEPTH",
    "REPOBOX_CONFIG_FORMAT",
    "REPOBOX_LOG_LEVEL",
];

/// Clears the repobox variables on creation and restores them on drop
struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn new() -> Self {
        let saved = KEYS.iter().map(|k| (*k, env::var(k).ok())).collect();
        for key in KEYS {
            env::remove_var(key);
        }
        Self { saved }
    }

    fn set(&self, key: &str, value: &str) {
        env::set_var(key, value);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

#[test]
#[serial]
fn test_from_env_without_variables_matches_default() {
    let _guard = EnvGuard::new();
    assert_eq!(RepoboxConfig::from_env(), RepoboxConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    let guard = EnvGuard::new();
    guard.set("REPOBOX_MAX_CONTENT_BYTES", "4096");
    guard.set("REPOBOX_MAX_FILES", "100");
    guard.set("REPOBOX_MAX_DEPTH", "3");
    guard.set("REPOBOX_CONFIG_FORMAT", "json");
    guard.set("REPOBOX_LOG_LEVEL", "DEBUG");

    let config = RepoboxConfig::from_env();
    assert_eq!(config.max_content_bytes, 4096);
    assert_eq!(config.max_files, 100);
    assert_eq!(config.max_depth, 3);
    assert_eq!(config.config_format, ConfigFormat::Json);
    assert_eq!(config.log_level, "debug");
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_ignores_unparseable_values() {
    let guard = EnvGuard::new();
    guard.set("REPOBOX_MAX_FILES", "lots");
    guard.set("REPOBOX_CONFIG_FORMAT", "toml");

    let config = RepoboxConfig::from_env();
    let defaults = RepoboxConfig::default();
    assert_eq!(config.max_files, defaults.max_files);
    assert_eq!(config.config_format, defaults.config_format);
}

#[test]
#[serial]
fn test_from_env_out_of_range_fails_validation() {
    let guard = EnvGuard::new();
    guard.set("REPOBOX_MAX_DEPTH", "0");
    guard.set("REPOBOX_LOG_LEVEL", "chatty");

    let config = RepoboxConfig::from_env();
    assert_eq!(config.max_depth, 0);
    assert!(config.validate().is_err());
}
