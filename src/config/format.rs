//! Serialization formats for configuration documents.

use super::ConfigMap;
use crate::error::{LoadError, LoadResult};
use serde_json::Value;
use std::path::Path;

/// Document format used to parse every file of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Yaml => write!(f, "yaml"),
        }
    }
}

impl Format {
    /// Detect the format from a file extension (`yaml`/`yml` -> YAML, anything else -> JSON).
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml" | "yml") => Format::Yaml,
            _ => Format::Json,
        }
    }

    /// Parse `text` into a configuration mapping.
    ///
    /// `path` is only used for error reporting.
    pub fn parse(&self, path: &Path, text: &str) -> LoadResult<ConfigMap> {
        let value: Value = match self {
            Format::Json => {
                serde_json::from_str(text).map_err(|e| LoadError::parse(path, e.to_string()))?
            }
            Format::Yaml => {
                serde_yaml::from_str(text).map_err(|e| LoadError::parse(path, e.to_string()))?
            }
        };

        match value {
            Value::Object(map) => Ok(map),
            other => Err(LoadError::parse(
                path,
                format!("root must be a mapping, found {}", kind_name(&other)),
            )),
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;
    use serde_json::json;

    #[test]
    fn test_from_path() {
        assert_eq!(Format::from_path(Path::new("a/config.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a/config.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a/config.YML")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a/config")), Format::Json);
    }

    #[test]
    fn test_parse_json_mapping() {
        let map = Format::Json
            .parse(Path::new("c.json"), r#"{"a": {"b": [1, 2]}}"#)
            .unwrap();
        assert_eq!(Value::Object(map), json!({"a": {"b": [1, 2]}}));
    }

    #[test]
    fn test_parse_yaml_mapping() {
        let yaml = r#"
server:
  port: 9000
  hosts: [a, b]
"#;
        let map = Format::Yaml.parse(Path::new("c.yaml"), yaml).unwrap();
        assert_eq!(
            Value::Object(map),
            json!({"server": {"port": 9000, "hosts": ["a", "b"]}})
        );
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Format::Json
            .parse(Path::new("c.json"), "{ not json")
            .unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Parse);
    }

    #[test]
    fn test_non_mapping_root_is_parse_error() {
        let err = Format::Json
            .parse(Path::new("c.json"), "[1, 2, 3]")
            .unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Parse);
        assert!(err.to_string().contains("sequence"));

        let err = Format::Yaml.parse(Path::new("c.yaml"), "just text").unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Parse);
    }
}
