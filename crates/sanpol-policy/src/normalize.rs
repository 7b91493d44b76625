//! Response normalization at the gateway boundary.
//!
//! The management API wraps collections in a `Response` envelope and
//! returns a bare object instead of a one-element list when exactly one
//! policy exists. Decoding collapses both shapes into one canonical
//! sequence of [`PolicyRecord`] with underscored attribute names.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{PolicyError, PolicyResult};
use crate::record::{PolicyRecord, ATTR_NAME};
use crate::value::AttributeMap;

/// A collection that the API encodes as either one object or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A proper list of items.
    Many(Vec<T>),
    /// A single bare item.
    One(T),
}

impl<T> OneOrMany<T> {
    /// Collapse into a uniform vector.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: ResponseBody,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(rename = "filter-policy")]
    policies: OneOrMany<Value>,
}

/// Rewrite a wire attribute name into the canonical convention.
///
/// Idempotent: canonical input comes back unchanged.
pub fn canonical_key(key: &str) -> String {
    key.replace('-', "_")
}

/// Rewrite all object keys in `value` to canonical naming, recursively.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (canonical_key(&key), canonicalize(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Decode one fetched response body into canonical policy records.
pub fn decode_policies(body: &Value) -> PolicyResult<Vec<PolicyRecord>> {
    let envelope: Envelope = serde_json::from_value(body.clone())
        .map_err(|e| PolicyError::decode(format!("policy listing: {e}")))?;

    envelope
        .response
        .policies
        .into_vec()
        .into_iter()
        .map(record_from_wire)
        .collect()
}

/// Build one canonical record from its raw wire representation.
pub fn record_from_wire(raw: Value) -> PolicyResult<PolicyRecord> {
    let canonical = canonicalize(raw);
    let map = match canonical {
        Value::Object(map) => map,
        other => {
            return Err(PolicyError::decode(format!(
                "expected a policy object, got {other}"
            )));
        }
    };

    let mut name = None;
    let mut attributes = AttributeMap::new();
    for (key, value) in map {
        if key == ATTR_NAME {
            name = value.as_str().map(str::to_string);
        } else {
            attributes.set(key, value);
        }
    }

    match name {
        Some(name) => Ok(PolicyRecord { name, attributes }),
        None => Err(PolicyError::MissingName),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_object_and_one_element_list_normalize_equally() {
        let single = json!({"Response": {"filter-policy":
            {"name": "ipv4_default", "is-policy-active": true}}});
        let listed = json!({"Response": {"filter-policy":
            [{"name": "ipv4_default", "is-policy-active": true}]}});

        let from_single = decode_policies(&single).unwrap();
        let from_list = decode_policies(&listed).unwrap();

        assert_eq!(from_single.len(), 1);
        assert_eq!(from_single, from_list);
        assert!(from_single[0].is_active());
    }

    #[test]
    fn test_wire_keys_become_canonical_recursively() {
        let body = json!({"Response": {"filter-policy": [{
            "name": "ipv4_hardening",
            "is-policy-active": false,
            "rule-list": [{"source-ip": "10.0.0.0/8", "destination-end-port": 23}]
        }]}});

        let records = decode_policies(&body).unwrap();
        let record = &records[0];
        assert_eq!(record.attributes.get_bool("is_policy_active"), Some(false));

        let rules = record.attributes.get("rule_list").unwrap().as_array().unwrap();
        let rule = rules[0].as_object().unwrap();
        assert_eq!(rule.get("source_ip").unwrap().as_str(), Some("10.0.0.0/8"));
        assert_eq!(rule.get("destination_end_port").unwrap().as_i64(), Some(23));
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let wire = json!({"is-policy-active": true, "rule-list": [{"source-ip": "1.1.1.1"}]});
        let once = canonicalize(wire);
        let twice = canonicalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_record_without_name_is_rejected() {
        let body = json!({"Response": {"filter-policy": [{"ip-version": "IPv4"}]}});
        let err = decode_policies(&body).unwrap_err();
        assert!(matches!(err, PolicyError::MissingName));
    }

    #[test]
    fn test_malformed_envelope_is_a_decode_error() {
        let body = json!({"policies": []});
        let err = decode_policies(&body).unwrap_err();
        assert!(matches!(err, PolicyError::Decode { .. }));
    }
}
