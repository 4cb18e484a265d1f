//! Layered configuration system.
//!
//! Consolidates configuration from up to three files next to a base path:
//! 1. **Private** - `.name.ext`, a locally untracked override (highest priority)
//! 2. **Environment** - `name.ENV.ext`, selected by the effective environment
//! 3. **Base** - `name.ext` (lowest priority)
//!
//! ## Merge Strategy
//! - Mappings are deep-merged key by key, higher priority wins
//! - Sequences and scalars are replaced wholesale
//! - A file may inherit from a sibling via `"!extends": "parent.json"`
//!   (in YAML the key must stay quoted, since a bare `!extends` is a tag)
//!
//! ## Environment Selection
//! - Explicit value passed to the store
//! - `CONFIG_MANAGER_ENV` - process environment variable
//! - `ConfigManagerEnv` - application metadata field

mod environment;
mod files;
mod format;
mod loader;
mod merge;
mod store;
mod types;

/// A configuration mapping: the root of every document and of the merged result.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

pub use environment::{
    AppMetadata, ENVIRONMENT_VAR, METADATA_ENVIRONMENT_KEY, effective_environment,
    resolve_environment,
};
pub use files::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use format::Format;
pub use loader::{ConfigLoader, EXTENDS_KEY};
pub use merge::{deep_merge, merge_into};
pub use store::{ConfigStore, ConfigStoreBuilder, SkippedFile};
pub use types::{FromConfigValue, TypedKey};
