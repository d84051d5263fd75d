//! Key normalization and value coercion for environment-style sources
//!
//! Both the `.env` file and the process environment hand us flat
//! `KEY=value` string pairs. An [`EnvTransform`] turns each pair into a
//! normalized key and a typed [`config::Value`]; the source readers then
//! split the key on the transform's delimiter to build a nested path.

use config::{Map, Value, ValueKind};
use std::fmt;

/// Default nesting delimiter in raw environment keys (`DATABASE__HOST`)
pub const DEFAULT_DELIMITER: &str = "__";

/// Strategy applied to every pair read from an environment-style source.
///
/// Implementations must be pure: the same input always yields the same
/// output, and no input is an error.
pub trait EnvTransform: fmt::Debug + Send + Sync {
    /// Normalize a raw key and coerce its raw string value.
    fn transform(&self, key: &str, value: &str) -> (String, Value);

    /// Delimiter marking nesting in the raw key
    fn delimiter(&self) -> &str {
        DEFAULT_DELIMITER
    }
}

/// Lower-cases keys and decodes values that look like embedded JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTransform;

impl EnvTransform for DefaultTransform {
    fn transform(&self, key: &str, value: &str) -> (String, Value) {
        (key.to_lowercase(), coerce_value(value))
    }
}

/// Turn a raw string into a typed value.
///
/// `{...}` is tried as a JSON object and `[...]` as a JSON array. Anything
/// else, including JSON-looking text that fails to parse, stays the original
/// string: delimiters are common in passwords and URLs.
pub fn coerce_value(raw: &str) -> Value {
    let trimmed = raw.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        if let Ok(object) =
            serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(trimmed)
        {
            return json_object(object);
        }
    } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Ok(items) = serde_json::from_str::<Vec<serde_json::Value>>(trimmed) {
            let items = items.into_iter().map(json_to_value).collect();
            return Value::new(None, ValueKind::Array(items));
        }
    }

    Value::new(None, ValueKind::String(raw.to_string()))
}

fn json_object(object: serde_json::Map<String, serde_json::Value>) -> Value {
    let table: Map<String, Value> = object
        .into_iter()
        .map(|(key, value)| (key, json_to_value(value)))
        .collect();
    Value::new(None, ValueKind::Table(table))
}

/// Convert a decoded JSON value into the configuration tree's value type
pub fn json_to_value(json: serde_json::Value) -> Value {
    let kind = match json {
        serde_json::Value::Null => ValueKind::Nil,
        serde_json::Value::Bool(b) => ValueKind::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ValueKind::I64(i)
            } else if let Some(u) = n.as_u64() {
                ValueKind::U64(u)
            } else {
                ValueKind::Float(n.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::String(s) => ValueKind::String(s),
        serde_json::Value::Array(items) => {
            ValueKind::Array(items.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(object) => return json_object(object),
    };
    Value::new(None, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_key_is_lowercased() {
        let (key, value) = DefaultTransform.transform("DATABASE__HOST", "localhost");
        assert_eq!(key, "database__host");
        assert_eq!(value.into_string().unwrap(), "localhost");
    }

    #[test]
    fn test_default_delimiter() {
        assert_eq!(DefaultTransform.delimiter(), "__");
    }

    #[test]
    fn test_json_object_becomes_table() {
        let value = coerce_value(r#"{"a": 1}"#);
        let table = value.into_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table["a"].clone().into_int().unwrap(), 1);
    }

    #[test]
    fn test_nested_json_object() {
        let value =
            coerce_value(r#"{"debug": true, "limits": {"max": 10, "names": ["a", "b"]}}"#);
        let table = value.into_table().unwrap();
        assert!(table["debug"].clone().into_bool().unwrap());

        let limits = table["limits"].clone().into_table().unwrap();
        assert_eq!(limits["max"].clone().into_int().unwrap(), 10);
        let names = limits["names"].clone().into_array().unwrap();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_json_array_becomes_sequence() {
        let value = coerce_value(r#"[1, "two", null, 3.5]"#);
        let items = value.into_array().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].clone().into_int().unwrap(), 1);
        assert_eq!(items[1].clone().into_string().unwrap(), "two");
        assert!(matches!(items[2].kind, ValueKind::Nil));
        assert_eq!(items[3].clone().into_float().unwrap(), 3.5);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored_for_detection() {
        let value = coerce_value("  [1, 2]  ");
        assert_eq!(value.into_array().unwrap().len(), 2);
    }

    #[rstest]
    #[case("[")]
    #[case("{")]
    #[case("[not json]")]
    #[case("{oops}")]
    #[case("p@ss{word}")]
    #[case("https://example.com/[v1]")]
    #[case("plain")]
    #[case("")]
    fn test_non_json_stays_string(#[case] raw: &str) {
        let value = coerce_value(raw);
        assert!(matches!(value.kind, ValueKind::String(_)));
        assert_eq!(value.into_string().unwrap(), raw);
    }

    #[test]
    fn test_json_scalar_is_not_decoded() {
        let value = coerce_value("true");
        assert!(matches!(value.kind, ValueKind::String(_)));

        let value = coerce_value("42");
        assert!(matches!(value.kind, ValueKind::String(_)));
    }

    #[test]
    fn test_large_unsigned_number() {
        let value = coerce_value("[18446744073709551615]");
        let items = value.into_array().unwrap();
        assert!(matches!(items[0].kind, ValueKind::U64(u64::MAX)));
    }
}
