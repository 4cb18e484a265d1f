//! Deep merge of configuration mappings.
//!
//! Nested mappings are merged key by key; every other value kind (strings,
//! numbers, booleans, null, sequences) is replaced wholesale by the overlay.

use super::ConfigMap;
use serde_json::Value;

/// Deep merge `overlay` into `base`, with `overlay` taking precedence.
///
/// - Keys only in `overlay` are inserted
/// - Keys in both sides holding mappings are merged recursively
/// - Any other conflict (scalars, sequences, null, or a type change between
///   layers) is won by the overlay value
///
/// # Example
/// ```
/// use serde_json::json;
/// use layered_config::config::deep_merge;
///
/// let base = json!({
///     "server": { "port": 8080, "host": "localhost" },
///     "features": ["a", "b"]
/// });
/// let overlay = json!({
///     "server": { "port": 9000 },
///     "features": ["c"]
/// });
/// let merged = deep_merge(
///     base.as_object().unwrap().clone(),
///     overlay.as_object().unwrap().clone(),
/// );
/// assert_eq!(
///     serde_json::Value::Object(merged),
///     json!({ "server": { "port": 9000, "host": "localhost" }, "features": ["c"] })
/// );
/// ```
pub fn deep_merge(mut base: ConfigMap, overlay: ConfigMap) -> ConfigMap {
    merge_into(&mut base, overlay);
    base
}

/// In-place form of [`deep_merge`].
pub fn merge_into(base: &mut ConfigMap, overlay: ConfigMap) {
    for (key, overlay_value) in overlay {
        let merged_value = match (base.remove(&key), overlay_value) {
            (Some(Value::Object(base_map)), Value::Object(overlay_map)) => {
                Value::Object(deep_merge(base_map, overlay_map))
            }
            (_, overlay_value) => overlay_value,
        };
        base.insert(key, merged_value);
    }
}
