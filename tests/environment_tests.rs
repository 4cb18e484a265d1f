//! Tests for effective-environment selection through the process environment.
//!
//! These mutate `CONFIG_MANAGER_ENV`, so they run serially in their own binary.

use layered_config::config::{ConfigStore, ENVIRONMENT_VAR, METADATA_ENVIRONMENT_KEY};
use serde_json::json;
use serial_test::serial;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn layered_dir() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("app.json"), r#"{"env": "base"}"#).unwrap();
    fs::write(temp.path().join("app.staging.json"), r#"{"env": "staging"}"#).unwrap();
    fs::write(temp.path().join("app.qa.json"), r#"{"env": "qa"}"#).unwrap();
    fs::write(temp.path().join("app.meta.json"), r#"{"env": "meta"}"#).unwrap();
    let base = temp.path().join("app.json");
    (temp, base)
}

fn metadata(env: &str) -> HashMap<String, String> {
    HashMap::from([(METADATA_ENVIRONMENT_KEY.to_string(), env.to_string())])
}

#[test]
#[serial]
fn test_process_variable_selects_environment() {
    let (_temp, base) = layered_dir();

    temp_env::with_var(ENVIRONMENT_VAR, Some("staging"), || {
        let store = ConfigStore::load(&base, None);
        assert_eq!(store.environment(), Some("staging"));
        assert_eq!(store.candidates().len(), 3);
        assert_eq!(store.get("env"), Some(&json!("staging")));
    });
}

#[test]
#[serial]
fn test_explicit_environment_beats_process_variable() {
    let (_temp, base) = layered_dir();

    temp_env::with_var(ENVIRONMENT_VAR, Some("staging"), || {
        let store = ConfigStore::load(&base, Some("qa"));
        assert_eq!(store.environment(), Some("qa"));
        assert_eq!(store.get("env"), Some(&json!("qa")));
    });
}

#[test]
#[serial]
fn test_process_variable_beats_metadata() {
    let (_temp, base) = layered_dir();

    temp_env::with_var(ENVIRONMENT_VAR, Some("staging"), || {
        let store = ConfigStore::builder()
            .base_path(&base)
            .metadata(metadata("meta"))
            .build();
        assert_eq!(store.get("env"), Some(&json!("staging")));
    });
}

#[test]
#[serial]
fn test_metadata_used_when_variable_unset() {
    let (_temp, base) = layered_dir();

    temp_env::with_var_unset(ENVIRONMENT_VAR, || {
        let store = ConfigStore::builder()
            .base_path(&base)
            .metadata(metadata("meta"))
            .build();
        assert_eq!(store.environment(), Some("meta"));
        assert_eq!(store.get("env"), Some(&json!("meta")));
    });
}

#[test]
#[serial]
fn test_empty_variable_is_ignored() {
    let (_temp, base) = layered_dir();

    temp_env::with_var(ENVIRONMENT_VAR, Some(""), || {
        let store = ConfigStore::load(&base, None);
        assert_eq!(store.environment(), None);
        assert_eq!(store.candidates().len(), 2);
        assert_eq!(store.get("env"), Some(&json!("base")));
    });
}

#[test]
#[serial]
fn test_no_environment_source() {
    let (_temp, base) = layered_dir();

    temp_env::with_var_unset(ENVIRONMENT_VAR, || {
        let store = ConfigStore::load(&base, None);
        assert_eq!(store.environment(), None);
        assert_eq!(
            store.candidates(),
            &[base.with_file_name(".app.json"), base.clone()]
        );
        assert_eq!(store.get("env"), Some(&json!("base")));
    });
}

#[test]
#[serial]
fn test_environment_is_fixed_at_construction() {
    let (_temp, base) = layered_dir();

    let store = temp_env::with_var(ENVIRONMENT_VAR, Some("qa"), || ConfigStore::load(&base, None));
    temp_env::with_var(ENVIRONMENT_VAR, Some("staging"), || {
        assert_eq!(store.environment(), Some("qa"));
        assert_eq!(store.get("env"), Some(&json!("qa")));
    });
}
