//! Structured error types for configuration loading.
//!
//! These errors only travel between the loader and the store. The store turns
//! every one of them into "this candidate contributes nothing", so lookups
//! never fail.

use std::io;
use std::path::{Path, PathBuf};

/// Error kinds for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    NotFound,
    Unreadable,
    Parse,
    Extends,
}

/// Failure to load a single configuration file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Config file unreadable: {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to load parent {} of {}: {source}", parent.display(), path.display())]
    Extends {
        path: PathBuf,
        parent: PathBuf,
        #[source]
        source: Box<LoadError>,
    },
}

impl LoadError {
    /// Map an I/O failure on `path` to `NotFound` or `Unreadable`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Unreadable {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }

    pub fn parse(path: &Path, reason: impl Into<String>) -> Self {
        LoadError::Parse {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn extends(path: &Path, parent: &Path, source: LoadError) -> Self {
        LoadError::Extends {
            path: path.to_path_buf(),
            parent: parent.to_path_buf(),
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::NotFound { .. } => LoadErrorKind::NotFound,
            LoadError::Unreadable { .. } => LoadErrorKind::Unreadable,
            LoadError::Parse { .. } => LoadErrorKind::Parse,
            LoadError::Extends { .. } => LoadErrorKind::Extends,
        }
    }

    /// The file whose load failed.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path }
            | LoadError::Unreadable { path, .. }
            | LoadError::Parse { path, .. }
            | LoadError::Extends { path, .. } => path,
        }
    }

    /// Follow `Extends` wrappers down to the error that started the chain.
    pub fn root_cause(&self) -> &LoadError {
        match self {
            LoadError::Extends { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type for load operations.
pub type LoadResult<T> = std::result::Result<T, LoadError>;
