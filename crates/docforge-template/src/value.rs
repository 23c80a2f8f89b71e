/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Data record and value types.
//!
//! A [`DataRecord`] is the key/value map a template is rendered against. It
//! usually comes straight from a JSON form, so the value semantics here
//! (what counts as empty, what counts as truthy, how a value is printed)
//! follow the JSON/JavaScript conventions that form produces.

use crate::error::{TemplateError, TemplateResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A value stored in a [`DataRecord`].
///
/// Lists hold multiselect values and table rows; maps hold the cells of a
/// single table row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    /// An explicit `null`.
    #[default]
    Null,

    /// A boolean value.
    Bool(bool),

    /// A number, kept in its JSON representation.
    Number(serde_json::Number),

    /// A string value.
    String(String),

    /// A list of values.
    List(Vec<DataValue>),

    /// A map of keys to values, in insertion order.
    Map(IndexMap<String, DataValue>),
}

impl DataValue {
    /// Check if this value is "truthy" for conditional sections.
    ///
    /// Truthiness rules:
    /// - `null`, `false`, `0`, NaN and the empty string are falsy
    /// - everything else is truthy, including empty lists and maps
    pub fn is_truthy(&self) -> bool {
        match self {
            DataValue::Null => false,
            DataValue::Bool(b) => *b,
            DataValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            DataValue::String(s) => !s.is_empty(),
            DataValue::List(_) | DataValue::Map(_) => true,
        }
    }

    /// Whether this value counts as "no value": `null` or the empty string.
    ///
    /// `0` and `false` are values.
    pub fn is_empty(&self) -> bool {
        match self {
            DataValue::Null => true,
            DataValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Render this value as display text.
    ///
    /// - String: returned as-is
    /// - Number: shortest form (`10`, `10.5`)
    /// - Bool: `true` / `false`
    /// - List: element texts joined with `,`
    /// - Map: compact JSON
    /// - Null: empty
    pub fn to_display_string(&self) -> String {
        match self {
            DataValue::Null => String::new(),
            DataValue::Bool(b) => b.to_string(),
            DataValue::Number(n) => format_number(n),
            DataValue::String(s) => s.clone(),
            DataValue::List(items) => items
                .iter()
                .map(DataValue::to_display_string)
                .collect::<Vec<_>>()
                .join(","),
            DataValue::Map(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }

    /// Interpret this value as a number.
    ///
    /// Numeric strings (as typed into a form) are accepted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Number(n) => n.as_f64(),
            DataValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Get a value from a map by key.
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        match self {
            DataValue::Map(m) => m.get(key),
            _ => None,
        }
    }

    /// A short name for the kind of value, for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Bool(_) => "boolean",
            DataValue::Number(_) => "number",
            DataValue::String(_) => "string",
            DataValue::List(_) => "list",
            DataValue::Map(_) => "map",
        }
    }
}

/// Integral floats print without a fractional part, the way a form shows them.
fn format_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

impl From<i64> for DataValue {
    fn from(n: i64) -> Self {
        DataValue::Number(n.into())
    }
}

impl From<i32> for DataValue {
    fn from(n: i32) -> Self {
        DataValue::Number(n.into())
    }
}

impl From<f64> for DataValue {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(DataValue::Null, DataValue::Number)
    }
}

impl From<Vec<DataValue>> for DataValue {
    fn from(items: Vec<DataValue>) -> Self {
        DataValue::List(items)
    }
}

impl From<serde_json::Value> for DataValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DataValue::Null,
            serde_json::Value::Bool(b) => DataValue::Bool(b),
            serde_json::Value::Number(n) => DataValue::Number(n),
            serde_json::Value::String(s) => DataValue::String(s),
            serde_json::Value::Array(items) => {
                DataValue::List(items.into_iter().map(DataValue::from).collect())
            }
            serde_json::Value::Object(map) => DataValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, DataValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// The runtime key/value map a template is rendered against.
///
/// A key that is absent and a key mapped to [`DataValue::Null`] are treated
/// the same everywhere in the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataRecord {
    values: IndexMap<String, DataValue>,
}

impl DataRecord {
    /// Create a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a record from a JSON object. Keys keep their order in the text.
    pub fn from_json_str(json: &str) -> TemplateResult<Self> {
        match serde_json::from_str(json).map_err(TemplateError::InvalidData)? {
            DataValue::Map(values) => Ok(DataRecord { values }),
            other => Err(TemplateError::DataNotAnObject {
                found: other.type_name(),
            }),
        }
    }

    /// Build a record from an already-parsed JSON value, which must be an object.
    pub fn from_json_value(value: serde_json::Value) -> TemplateResult<Self> {
        match value {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, DataValue::from(v)))
                .collect()),
            other => Err(TemplateError::DataNotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Insert a value, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DataValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get the value for a key. `null` values are returned as-is.
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.values.get(key)
    }

    /// Get the value for a key, treating `null` as absent.
    pub fn get_present(&self, key: &str) -> Option<&DataValue> {
        self.values.get(key).filter(|v| !matches!(v, DataValue::Null))
    }

    /// Whether the key holds a value that is not `null` and not `""`.
    pub fn has_value(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|v| !v.is_empty())
    }

    /// Whether the key's value is truthy (absent keys are falsy).
    pub fn is_truthy(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(DataValue::is_truthy)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<DataValue>> FromIterator<(K, V)> for DataRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        DataRecord {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
