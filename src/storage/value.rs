//! Stored setting values
//!
//! Settings are flat string keys mapped to one of three value types. Entries of
//! any other JSON type are carried along untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The full persisted key/value map, ordered by key for stable files.
pub type SettingsMap = BTreeMap<String, SettingValue>;

/// Declared type of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Text,
    Bool,
    Int,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingKind::Text => write!(f, "string"),
            SettingKind::Bool => write!(f, "boolean"),
            SettingKind::Int => write!(f, "integer"),
        }
    }
}

/// A single stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
    /// Entry of a type no setting uses, kept as-is so it is written back
    Other(Value),
}

impl SettingValue {
    /// Declared type this value can satisfy; `None` for [`SettingValue::Other`]
    pub fn kind(&self) -> Option<SettingKind> {
        match self {
            SettingValue::Text(_) => Some(SettingKind::Text),
            SettingValue::Bool(_) => Some(SettingKind::Bool),
            SettingValue::Int(_) => Some(SettingKind::Int),
            SettingValue::Other(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer settings are `i32`; wider stored numbers don't fit.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            SettingValue::Int(n) => i32::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Convert a raw JSON value
    ///
    /// Nulls, floats, arrays and objects become [`SettingValue::Other`].
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Bool(b) => SettingValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => SettingValue::Int(i),
                None => SettingValue::Other(Value::Number(n)),
            },
            Value::String(s) => SettingValue::Text(s),
            other => SettingValue::Other(other),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Text(s) => write!(f, "{:?}", s),
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Int(n) => write!(f, "{}", n),
            SettingValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        SettingValue::Int(i64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalar_types() {
        assert_eq!(SettingValue::from_json(json!(true)), SettingValue::Bool(true));
        assert_eq!(SettingValue::from_json(json!(42)), SettingValue::Int(42));
        assert_eq!(
            SettingValue::from_json(json!("Weekly")),
            SettingValue::Text("Weekly".into())
        );
        assert_eq!(
            SettingValue::from_json(json!("Weekly")).kind(),
            Some(SettingKind::Text)
        );
    }

    #[test]
    fn test_from_json_keeps_other_types() {
        for raw in [json!(null), json!(1.5), json!([1, 2]), json!({"a": 1})] {
            let value = SettingValue::from_json(raw.clone());
            assert_eq!(value, SettingValue::Other(raw));
            assert_eq!(value.kind(), None);
        }
    }

    #[test]
    fn test_as_int_rejects_out_of_range() {
        assert_eq!(SettingValue::Int(75).as_int(), Some(75));
        assert_eq!(SettingValue::Int(i64::from(i32::MAX) + 1).as_int(), None);
        assert_eq!(SettingValue::Text("75".into()).as_int(), None);
    }

    #[test]
    fn test_serializes_as_plain_json() {
        let mut map = SettingsMap::new();
        map.insert("darkMode".into(), true.into());
        map.insert("animationsLevel".into(), 50.into());
        map.insert("language".into(), "English".into());
        map.insert("theme".into(), SettingValue::Other(Value::Null));

        let json = serde_json::to_value(&map).expect("Failed to serialize");
        assert_eq!(
            json,
            json!({"animationsLevel": 50, "darkMode": true, "language": "English", "theme": null})
        );
    }
}
