//! Effective environment resolution.
//!
//! The environment name selecting `name.ENV.ext` comes from the first
//! non-empty source of:
//! 1. The explicit value given to the store
//! 2. The `CONFIG_MANAGER_ENV` process environment variable
//! 3. The `ConfigManagerEnv` application metadata field

use std::collections::{BTreeMap, HashMap};

/// Process environment variable naming the configuration environment.
pub const ENVIRONMENT_VAR: &str = "CONFIG_MANAGER_ENV";

/// Application metadata key naming the configuration environment.
pub const METADATA_ENVIRONMENT_KEY: &str = "ConfigManagerEnv";

/// Read-only application metadata (bundle info, build-time settings, ...).
pub trait AppMetadata {
    fn value(&self, key: &str) -> Option<String>;
}

impl AppMetadata for HashMap<String, String> {
    fn value(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl AppMetadata for BTreeMap<String, String> {
    fn value(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Pick the effective environment from already-read sources.
pub fn effective_environment(
    explicit: Option<&str>,
    process: Option<String>,
    metadata: Option<&dyn AppMetadata>,
) -> Option<String> {
    explicit
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| process.filter(|s| !s.is_empty()))
        .or_else(|| {
            metadata
                .and_then(|m| m.value(METADATA_ENVIRONMENT_KEY))
                .filter(|s| !s.is_empty())
        })
}

/// Resolve the effective environment, reading [`ENVIRONMENT_VAR`] from the process.
pub fn resolve_environment(
    explicit: Option<&str>,
    metadata: Option<&dyn AppMetadata>,
) -> Option<String> {
    effective_environment(explicit, std::env::var(ENVIRONMENT_VAR).ok(), metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(env: &str) -> HashMap<String, String> {
        HashMap::from([(METADATA_ENVIRONMENT_KEY.to_string(), env.to_string())])
    }

    #[test]
    fn test_explicit_wins() {
        let meta = metadata("fromMeta");
        let env = effective_environment(Some("explicit"), Some("process".into()), Some(&meta));
        assert_eq!(env.as_deref(), Some("explicit"));
    }

    #[test]
    fn test_process_beats_metadata() {
        let meta = metadata("fromMeta");
        let env = effective_environment(None, Some("process".into()), Some(&meta));
        assert_eq!(env.as_deref(), Some("process"));
    }

    #[test]
    fn test_metadata_fallback() {
        let meta = metadata("fromMeta");
        let env = effective_environment(None, None, Some(&meta));
        assert_eq!(env.as_deref(), Some("fromMeta"));
    }

    #[test]
    fn test_empty_sources_are_skipped() {
        let meta = metadata("fromMeta");
        let env = effective_environment(Some(""), Some(String::new()), Some(&meta));
        assert_eq!(env.as_deref(), Some("fromMeta"));

        let empty_meta = metadata("");
        assert_eq!(effective_environment(Some(""), None, Some(&empty_meta)), None);
    }

    #[test]
    fn test_no_sources() {
        assert_eq!(effective_environment(None, None, None), None);
    }

    #[test]
    fn test_btree_metadata() {
        let meta = BTreeMap::from([(METADATA_ENVIRONMENT_KEY.to_string(), "qa".to_string())]);
        assert_eq!(
            effective_environment(None, None, Some(&meta)).as_deref(),
            Some("qa")
        );
    }
}
