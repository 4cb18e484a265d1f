//! Layered configuration store.
//!
//! Resolves candidate files for a base path, loads the ones that exist from
//! lowest to highest priority, and deep-merges them so that private and
//! environment-specific files override the base file. The result is
//! immutable.
//!
//! Loading is fail-open: a candidate that is missing or fails to load simply
//! contributes nothing. Lookups never return errors, only absence or defaults.

use super::ConfigMap;
use super::environment::{AppMetadata, resolve_environment};
use super::files::FileSystem;
use super::format::Format;
use super::loader::ConfigLoader;
use super::merge::merge_into;
use super::types::{FromConfigValue, TypedKey};
use crate::error::LoadError;
use crate::paths::PathResolver;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, trace, warn};

/// A candidate that existed but failed to load.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: LoadError,
}

/// Immutable, merged configuration.
#[derive(Debug, Default)]
pub struct ConfigStore {
    /// Candidate files, highest priority first
    candidates: Vec<PathBuf>,
    /// Effective environment used to build the candidates
    environment: Option<String>,
    /// Merged configuration, absent if nothing loaded
    configuration: Option<Value>,
    /// Files that contributed, in merge order (lowest priority first)
    loaded: Vec<PathBuf>,
    skipped: Vec<SkippedFile>,
}

impl ConfigStore {
    /// Load configuration for `base_path` from the real filesystem.
    ///
    /// `environment` overrides the `CONFIG_MANAGER_ENV` variable.
    pub fn load(base_path: impl Into<PathBuf>, environment: Option<&str>) -> Self {
        let mut builder = Self::builder().base_path(base_path);
        if let Some(env) = environment {
            builder = builder.environment(env);
        }
        builder.build()
    }

    /// A store with no configuration and no candidates.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::default()
    }

    /// Candidate files, highest priority first.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// The merged configuration root, if any file loaded.
    pub fn configuration(&self) -> Option<&ConfigMap> {
        self.configuration.as_ref().and_then(Value::as_object)
    }

    pub fn is_empty(&self) -> bool {
        self.configuration.is_none()
    }

    /// Files that contributed, lowest priority first.
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.loaded
    }

    /// Candidates that existed but failed to load.
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Look up a dotted path such as `server.http.port`.
    ///
    /// Empty segments are ignored, so `""` returns the whole root. Descending
    /// into anything that is not a mapping yields `None`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(self.configuration.as_ref()?, |node, segment| match node {
                Value::Object(map) => map.get(segment),
                _ => None,
            })
    }

    /// Typed lookup falling back to the key's default.
    pub fn value<T>(&self, key: &TypedKey<T>) -> T
    where
        T: FromConfigValue + Clone,
    {
        self.get(key.path())
            .and_then(T::from_config_value)
            .unwrap_or_else(|| key.default_value().clone())
    }

    /// Deserialize the subtree at `path` into `T`.
    ///
    /// Absence and shape mismatches both yield `None`.
    pub fn extract<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let value = self.get(path)?;
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("Config value at {} does not match requested type: {}", path, e);
                None
            }
        }
    }
}

/// Builder for [`ConfigStore`].
#[derive(Default)]
pub struct ConfigStoreBuilder {
    base_path: Option<PathBuf>,
    environment: Option<String>,
    metadata: Option<Box<dyn AppMetadata>>,
    format: Option<Format>,
    fs: Option<Box<dyn FileSystem>>,
    resolver: PathResolver,
}

impl ConfigStoreBuilder {
    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Set or clear the base path. Without one the store is empty.
    pub fn maybe_base_path(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.base_path = path.map(Into::into);
        self
    }

    /// Explicit environment, taking precedence over the process variable.
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Application metadata consulted after the process variable.
    pub fn metadata(mut self, metadata: impl AppMetadata + 'static) -> Self {
        self.metadata = Some(Box::new(metadata));
        self
    }

    /// Document format. Detected from the base path when unset.
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn file_system(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Some(Box::new(fs));
        self
    }

    pub fn private_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.resolver = PathResolver::with_private_prefix(prefix);
        self
    }

    pub fn build(self) -> ConfigStore {
        let Some(base_path) = self.base_path else {
            return ConfigStore::empty();
        };

        let environment = resolve_environment(self.environment.as_deref(), self.metadata.as_deref());
        let candidates = self.resolver.resolve(&base_path, environment.as_deref());
        let format = self.format.unwrap_or_else(|| Format::from_path(&base_path));

        debug!(
            "Loading {} configuration from {} (environment: {}, {} candidates)",
            format,
            base_path.display(),
            environment.as_deref().unwrap_or("none"),
            candidates.len()
        );

        let (configuration, loaded, skipped) = match self.fs {
            Some(fs) => merge_candidates(&ConfigLoader::with_file_system(fs, format), &candidates),
            None => merge_candidates(&ConfigLoader::new(format), &candidates),
        };

        ConfigStore {
            candidates,
            environment,
            configuration: configuration.map(Value::Object),
            loaded,
            skipped,
        }
    }
}

/// Load and merge candidates from lowest to highest priority.
fn merge_candidates<F: FileSystem>(
    loader: &ConfigLoader<F>,
    candidates: &[PathBuf],
) -> (Option<ConfigMap>, Vec<PathBuf>, Vec<SkippedFile>) {
    let mut merged: Option<ConfigMap> = None;
    let mut loaded = Vec::new();
    let mut skipped = Vec::new();

    for path in candidates.iter().rev() {
        if !loader.file_system().exists(path) {
            trace!("Config candidate not present: {}", path.display());
            continue;
        }

        match loader.load(path) {
            Ok(config) => {
                debug!("Loaded config candidate: {}", path.display());
                match merged.as_mut() {
                    Some(acc) => merge_into(acc, config),
                    None => merged = Some(config),
                }
                loaded.push(path.clone());
            }
            Err(error) => {
                warn!("Skipping config candidate {}: {}", path.display(), error);
                skipped.push(SkippedFile {
                    path: path.clone(),
                    error,
                });
            }
        }
    }

    (merged, loaded, skipped)
}

impl std::fmt::Debug for ConfigStoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStoreBuilder")
            .field("base_path", &self.base_path)
            .field("environment", &self.environment)
            .field("has_metadata", &self.metadata.is_some())
            .field("format", &self.format)
            .field("has_file_system", &self.fs.is_some())
            .field("resolver", &self.resolver)
            .finish()
    }
}
