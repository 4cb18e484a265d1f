//! Candidate path resolution.
//!
//! Given a base configuration path and an optional environment name, computes
//! the files consulted for configuration, highest priority first:
//!
//! 1. `dir/.name.ext` - private override (typically git-ignored)
//! 2. `dir/name.ENV.ext` - environment-specific file (only with an environment)
//! 3. `dir/name.ext` - the base file itself
//!
//! Pure path manipulation: no filesystem I/O and no existence checks.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Filename prefix marking a private, locally untracked override.
pub const PRIVATE_FILE_PREFIX: &str = ".";

/// Computes prioritized candidate paths for a base configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    private_prefix: String,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PathResolver {
    /// Create a resolver using the default private prefix (`.`).
    pub fn new() -> Self {
        Self::with_private_prefix(PRIVATE_FILE_PREFIX)
    }

    /// Create a resolver with a custom private-override prefix.
    pub fn with_private_prefix(prefix: impl Into<String>) -> Self {
        Self {
            private_prefix: prefix.into(),
        }
    }

    /// Resolve candidate paths for `base`, highest priority first.
    ///
    /// An empty environment is treated as no environment. If `base` has no
    /// file name (empty path, `..`, filesystem root) only `base` is returned.
    pub fn resolve(&self, base: &Path, environment: Option<&str>) -> Vec<PathBuf> {
        let Some(file_name) = base.file_name() else {
            return vec![base.to_path_buf()];
        };
        let dir = base.parent().unwrap_or_else(|| Path::new(""));

        let mut paths = Vec::with_capacity(3);

        let mut private_name = OsString::from(&self.private_prefix);
        private_name.push(file_name);
        paths.push(dir.join(private_name));

        if let Some(env) = environment.filter(|e| !e.is_empty()) {
            paths.push(dir.join(environment_file_name(base, env)));
        }

        paths.push(base.to_path_buf());
        paths
    }
}

/// `name.ext` + `ENV` -> `name.ENV.ext`; `name` + `ENV` -> `name.ENV`.
fn environment_file_name(base: &Path, environment: &str) -> OsString {
    let mut name = base
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(environment);
    if let Some(ext) = base.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

/// Resolve candidates with the default resolver.
pub fn candidate_paths(base: &Path, environment: Option<&str>) -> Vec<PathBuf> {
    PathResolver::new().resolve(base, environment)
}
