//! Typed configuration keys.
//!
//! A [`TypedKey`] pairs a dotted path with a default value. Lookups coerce the
//! stored value only when it already has a compatible representation; a string
//! is never parsed into a number, and anything that does not fit yields the
//! default.

use super::ConfigMap;
use serde_json::Value;
use std::borrow::Cow;
use url::Url;

/// A dotted configuration path with a fallback value.
///
/// ```
/// use layered_config::config::TypedKey;
///
/// const PORT: TypedKey<i64> = TypedKey::from_static("server.port", 8080);
/// let name = TypedKey::new("server.name", "localhost".to_string());
/// assert_eq!(PORT.path(), "server.port");
/// assert_eq!(name.default_value(), "localhost");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TypedKey<T> {
    path: Cow<'static, str>,
    default: T,
}

impl<T> TypedKey<T> {
    pub fn new(path: impl Into<Cow<'static, str>>, default: T) -> Self {
        Self {
            path: path.into(),
            default,
        }
    }

    /// Constant-friendly constructor for `static`/`const` key declarations.
    pub const fn from_static(path: &'static str, default: T) -> Self {
        Self {
            path: Cow::Borrowed(path),
            default,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }
}

impl<T> TypedKey<Option<T>> {
    /// Key whose default is `None`.
    pub fn optional(path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(path, None)
    }
}

/// Conversion from a stored configuration value into a concrete type.
///
/// Returns `None` when the value does not already have a compatible shape.
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &Value) -> Option<Self>;
}

impl FromConfigValue for Value {
    fn from_config_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromConfigValue for String {
    fn from_config_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

/// Whole-valued floats such as `8080.0` (how some emitters write integers).
fn integral_float(value: &Value) -> Option<f64> {
    value.as_f64().filter(|f| f.fract() == 0.0)
}

impl FromConfigValue for i64 {
    fn from_config_value(value: &Value) -> Option<Self> {
        value.as_i64().or_else(|| {
            integral_float(value)
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        })
    }
}

impl FromConfigValue for i32 {
    fn from_config_value(value: &Value) -> Option<Self> {
        i64::from_config_value(value).and_then(|n| i32::try_from(n).ok())
    }
}

impl FromConfigValue for u64 {
    fn from_config_value(value: &Value) -> Option<Self> {
        value.as_u64().or_else(|| {
            integral_float(value)
                .filter(|f| *f >= 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        })
    }
}

impl FromConfigValue for f64 {
    fn from_config_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromConfigValue for Url {
    fn from_config_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(|s| Url::parse(s).ok())
    }
}

impl FromConfigValue for ConfigMap {
    fn from_config_value(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

/// Every element must convert, otherwise the whole sequence is rejected.
impl<T: FromConfigValue> FromConfigValue for Vec<T> {
    fn from_config_value(value: &Value) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(T::from_config_value)
            .collect()
    }
}

impl<T: FromConfigValue> FromConfigValue for Option<T> {
    fn from_config_value(value: &Value) -> Option<Self> {
        T::from_config_value(value).map(Some)
    }
}
