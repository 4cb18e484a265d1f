//! Layered Configuration Library
//!
//! Loads a base configuration file together with its private and
//! environment-specific overrides, deep-merges them, and exposes the result
//! through dotted-path and typed-key lookups.
//!
//! ```no_run
//! use layered_config::config::{ConfigStore, TypedKey};
//!
//! const PORT: TypedKey<i64> = TypedKey::from_static("server.port", 8080);
//!
//! let store = ConfigStore::load("config/app.json", Some("staging"));
//! let port = store.value(&PORT);
//! let host = store.get("server.host");
//! # let _ = (port, host);
//! ```

pub mod config;
pub mod error;
pub mod paths;

pub use config::{ConfigMap, ConfigStore, TypedKey};
pub use error::{LoadError, LoadErrorKind, LoadResult};
pub use paths::{PRIVATE_FILE_PREFIX, PathResolver, candidate_paths};
