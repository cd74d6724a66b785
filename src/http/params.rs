//! Request parameters.
//!
//! [`RequestParams`] is an insertion-ordered map of parameter name to
//! [`ParamValue`]. The same value feeds the query string (sorted, flattened)
//! and the JSON body (insertion order).

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::error::{SdkError, ValidationError};

/// One parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<ParamValue>),
    Map(RequestParams),
}

impl ParamValue {
    /// Null, empty text, empty list or empty map. Booleans and numbers never are.
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Null => true,
            ParamValue::Text(s) => s.is_empty(),
            ParamValue::List(items) => items.is_empty(),
            ParamValue::Map(map) => map.is_empty(),
            ParamValue::Int(_) | ParamValue::Float(_) | ParamValue::Bool(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Query-string rendering of a scalar or list. Maps render as JSON.
    pub fn render(&self) -> String {
        match self {
            ParamValue::Null => String::new(),
            ParamValue::Text(s) => s.clone(),
            ParamValue::Int(n) => n.to_string(),
            ParamValue::Float(n) => n.to_string(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::List(items) => items
                .iter()
                .map(ParamValue::render)
                .collect::<Vec<_>>()
                .join(","),
            ParamValue::Map(map) => serde_json::to_string(map).unwrap_or_default(),
        }
    }

    fn strip_empty(self) -> Option<ParamValue> {
        let value = match self {
            ParamValue::List(items) => ParamValue::List(
                items.into_iter().filter_map(ParamValue::strip_empty).collect(),
            ),
            ParamValue::Map(map) => ParamValue::Map(map.without_empty()),
            other => other,
        };
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    fn from_json(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ParamValue::Int(i),
                None => n.as_f64().map(ParamValue::Float).unwrap_or(ParamValue::Null),
            },
            Value::String(s) => ParamValue::Text(s),
            Value::Array(items) => {
                ParamValue::List(items.into_iter().map(ParamValue::from_json).collect())
            }
            Value::Object(map) => ParamValue::Map(RequestParams {
                entries: map
                    .into_iter()
                    .map(|(k, v)| (k, ParamValue::from_json(v)))
                    .collect(),
            }),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Null => serializer.serialize_none(),
            ParamValue::Text(s) => serializer.serialize_str(s),
            ParamValue::Int(n) => serializer.serialize_i64(*n),
            ParamValue::Float(n) => serializer.serialize_f64(*n),
            ParamValue::Bool(b) => serializer.serialize_bool(*b),
            ParamValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ParamValue::Map(map) => map.serialize(serializer),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<RequestParams> for ParamValue {
    fn from(value: RequestParams) -> Self {
        ParamValue::Map(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ParamValue::Null)
    }
}

/// Insertion-ordered parameter map.
///
/// ```rust,ignore
/// let params = RequestParams::new()
///     .with("max_offers", 10)
///     .with("category", vec!["dining", "travel"]);
/// assert_eq!(params.query_string()?, "category=dining%2Ctravel&max_offers=10");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    entries: Vec<(String, ParamValue)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Insert only when the key is absent or holds an empty value.
    pub fn insert_if_empty(&mut self, key: &str, value: impl Into<ParamValue>) {
        if !self.has_value(key) {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Present and non-empty.
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Move every entry of `other` in, replacing existing keys.
    pub fn extend(&mut self, other: RequestParams) {
        for (k, v) in other.entries {
            self.insert(k, v);
        }
    }

    /// Copy with empty values removed, recursively. Idempotent.
    pub fn without_empty(self) -> Self {
        Self {
            entries: self
                .entries
                .into_iter()
                .filter_map(|(k, v)| v.strip_empty().map(|v| (k, v)))
                .collect(),
        }
    }

    /// Flatten to `(key, value)` pairs in insertion order.
    ///
    /// Nested maps become `key[sub]`; lists are comma-joined.
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.entries {
            flatten_into(key, value, &mut pairs);
        }
        pairs
    }

    /// Flattened pairs, top-level entries sorted by raw name (stable, byte order).
    ///
    /// Sub-keys of a nested map stay together under their parent.
    pub fn sorted_pairs(&self) -> Vec<(String, String)> {
        let mut entries: Vec<&(String, ParamValue)> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let mut pairs = Vec::new();
        for (key, value) in entries {
            flatten_into(key, value, &mut pairs);
        }
        pairs
    }

    /// Sorted, form-urlencoded query string. Empty when there are no params.
    pub fn query_string(&self) -> Result<String, ValidationError> {
        encode_pairs(&self.sorted_pairs())
    }

    /// Form-urlencoded body in insertion order.
    pub fn form_body(&self) -> Result<String, ValidationError> {
        encode_pairs(&self.flatten())
    }

    /// JSON body in insertion order. An empty map renders as `{}`.
    pub fn json_body(&self) -> Result<String, SdkError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Build params from any serializable struct (e.g. with serde renames).
    ///
    /// The value must serialize to a JSON object.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, SdkError> {
        match ParamValue::from_json(serde_json::to_value(value)?) {
            ParamValue::Map(params) => Ok(params),
            ParamValue::Null => Ok(Self::new()),
            _ => Err(ValidationError::InvalidParameter(
                "parameters must serialize to an object".to_string(),
            )
            .into()),
        }
    }
}

fn flatten_into(key: &str, value: &ParamValue, pairs: &mut Vec<(String, String)>) {
    match value {
        ParamValue::Map(map) => {
            for (sub, nested) in &map.entries {
                flatten_into(&format!("{}[{}]", key, sub), nested, pairs);
            }
        }
        other => pairs.push((key.to_string(), other.render())),
    }
}

fn encode_pairs(pairs: &[(String, String)]) -> Result<String, ValidationError> {
    serde_urlencoded::to_string(pairs).map_err(|e| ValidationError::Encoding(e.to_string()))
}

impl Serialize for RequestParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
