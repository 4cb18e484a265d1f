//! Single-file configuration loader with `!extends` inheritance.
//!
//! A document may name a parent document under the reserved [`EXTENDS_KEY`].
//! The parent is resolved relative to the directory of the current file,
//! loaded recursively, and the current document is deep-merged on top of it.
//!
//! In YAML the key must be quoted (`"!extends": base.yaml`). Unquoted,
//! `!extends` is a YAML tag and the document fails to parse.
//!
//! There is no cycle detection: a file that (directly or indirectly) extends
//! itself recurses without bound.

use super::ConfigMap;
use super::files::{FileSystem, OsFileSystem};
use super::format::Format;
use super::merge::deep_merge;
use crate::error::{LoadError, LoadResult};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reserved top-level key naming a parent document.
pub const EXTENDS_KEY: &str = "!extends";

/// Loads one configuration file, following its extends chain.
#[derive(Debug, Clone)]
pub struct ConfigLoader<F = OsFileSystem> {
    fs: F,
    format: Format,
}

impl ConfigLoader<OsFileSystem> {
    /// Loader over the real filesystem.
    pub fn new(format: Format) -> Self {
        Self::with_file_system(OsFileSystem, format)
    }
}

impl<F: FileSystem> ConfigLoader<F> {
    pub fn with_file_system(fs: F, format: Format) -> Self {
        Self { fs, format }
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Load `path` and every file it extends, returning the merged mapping.
    ///
    /// The `!extends` key is kept in the result.
    pub fn load(&self, path: &Path) -> LoadResult<ConfigMap> {
        let text = self
            .fs
            .read_to_string(path)
            .map_err(|e| LoadError::from_io(path, e))?;
        let config = self.format.parse(path, &text)?;

        let Some(parent) = extends_target(path, &config) else {
            return Ok(config);
        };

        debug!("Resolving {} for {}: {}", EXTENDS_KEY, path.display(), parent.display());
        let base = self
            .load(&parent)
            .map_err(|e| LoadError::extends(path, &parent, e))?;

        Ok(deep_merge(base, config))
    }
}

/// Parent path named by `config`'s extends directive, if any.
///
/// A non-string directive is ignored.
fn extends_target(path: &Path, config: &ConfigMap) -> Option<PathBuf> {
    match config.get(EXTENDS_KEY)? {
        Value::String(name) => {
            let dir = path.parent().unwrap_or_else(|| Path::new(""));
            Some(dir.join(name))
        }
        other => {
            warn!(
                "Ignoring non-string {} directive in {}: {}",
                EXTENDS_KEY,
                path.display(),
                other
            );
            None
        }
    }
}
