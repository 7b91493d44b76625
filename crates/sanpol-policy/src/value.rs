//! Attribute values and the open attribute mapping.
//!
//! Policy attributes form an open record: the management API exposes
//! scalars, sequences, and nested objects (rule lists) under one policy,
//! and partial updates only carry the fields being changed. The tagged
//! union here preserves that openness while keeping comparisons
//! structural.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single configuration attribute value.
///
/// Comparison is structural and recursive; two values are equal when
/// their decoded forms are, regardless of where they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Explicit null (present on the wire, carries no value).
    Null,
    /// A boolean value.
    Boolean(bool),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A string value.
    String(String),
    /// A sequence of values (e.g. a rule list).
    Array(Vec<AttributeValue>),
    /// A nested record (e.g. a single rule).
    Object(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Check if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Get as a string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as an integer if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the nested record if this is an object value.
    pub fn as_object(&self) -> Option<&BTreeMap<String, AttributeValue>> {
        match self {
            AttributeValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Get the sequence if this is an array value.
    pub fn as_array(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<i32> for AttributeValue {
    fn from(i: i32) -> Self {
        AttributeValue::Integer(i64::from(i))
    }
}

impl From<f64> for AttributeValue {
    fn from(f: f64) -> Self {
        AttributeValue::Float(f)
    }
}

impl<T: Into<AttributeValue>> From<Vec<T>> for AttributeValue {
    fn from(items: Vec<T>) -> Self {
        AttributeValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AttributeValue::Null,
            Value::Bool(b) => AttributeValue::Boolean(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AttributeValue::Integer(i)
                } else {
                    AttributeValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            Value::String(s) => AttributeValue::String(s),
            Value::Array(items) => {
                AttributeValue::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(map) => AttributeValue::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl From<&AttributeValue> for Value {
    fn from(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Null => Value::Null,
            AttributeValue::Boolean(b) => Value::Bool(*b),
            AttributeValue::Integer(i) => Value::from(*i),
            AttributeValue::Float(f) => Value::from(*f),
            AttributeValue::String(s) => Value::String(s.clone()),
            AttributeValue::Array(items) => Value::Array(items.iter().map(Into::into).collect()),
            AttributeValue::Object(map) => Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.into())).collect(),
            ),
        }
    }
}

/// An ordered mapping of attribute names to values.
///
/// Ordered so that wire payloads and diffs serialize deterministically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(BTreeMap<String, AttributeValue>);

impl AttributeMap {
    /// Create a new empty attribute map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set an attribute value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Set an attribute using builder pattern.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    /// Get a string attribute.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttributeValue::as_str)
    }

    /// Get a boolean attribute.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(AttributeValue::as_bool)
    }

    /// Check if an attribute exists.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Remove an attribute.
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.0.remove(name)
    }

    /// Get the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.0.iter()
    }

    /// Consume the map, yielding the underlying storage.
    pub fn into_inner(self) -> BTreeMap<String, AttributeValue> {
        self.0
    }
}

impl FromIterator<(String, AttributeValue)> for AttributeMap {
    fn from_iter<T: IntoIterator<Item = (String, AttributeValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, AttributeValue>> for AttributeMap {
    fn from(map: BTreeMap<String, AttributeValue>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let attrs = AttributeMap::new()
            .with("ip_version", "IPv4")
            .with("index", 3i64)
            .with("is_policy_active", false);

        assert_eq!(attrs.get_str("ip_version"), Some("IPv4"));
        assert_eq!(attrs.get("index").and_then(AttributeValue::as_i64), Some(3));
        assert_eq!(attrs.get_bool("is_policy_active"), Some(false));
        assert!(!attrs.contains("permission"));
    }

    #[test]
    fn test_structural_equality_is_recursive() {
        let a = AttributeValue::from(json!({"rule": {"index": 1, "permission": "permit"}}));
        let b = AttributeValue::from(json!({"rule": {"permission": "permit", "index": 1}}));
        assert_eq!(a, b);

        let c = AttributeValue::from(json!({"rule": {"index": 2, "permission": "permit"}}));
        assert_ne!(a, c);
    }

    #[test]
    fn test_json_round_trip() {
        let original = json!({
            "name": "ipv4_hardening",
            "rules": [{"index": 1, "permit": true}, {"index": 2, "permit": false}],
            "comment": null
        });

        let value = AttributeValue::from(original.clone());
        let back = Value::from(&value);
        assert_eq!(back, original);
    }

    #[test]
    fn test_map_serialization_is_transparent() {
        let attrs = AttributeMap::new().with("protocol", "tcp").with("port", 23i64);
        let encoded = serde_json::to_value(&attrs).unwrap();
        assert_eq!(encoded, json!({"port": 23, "protocol": "tcp"}));
    }
}
