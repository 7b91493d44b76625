//! Canonical-to-wire translation for submission payloads.
//!
//! The inverse of [`crate::normalize`]: canonical underscored attribute
//! names become the hyphenated wire convention. Translation validates as
//! it goes; a record that cannot be expressed on the wire fails the whole
//! operation rather than being submitted partially.

use serde_json::{Map, Value};

use crate::error::{PolicyError, PolicyResult};
use crate::record::{PolicyRecord, ATTR_NAME};
use crate::value::{AttributeMap, AttributeValue};

/// Rewrite a canonical attribute name into the wire convention.
pub fn wire_key(key: &str) -> String {
    key.replace('_', "-")
}

fn validate_key(key: &str) -> PolicyResult<()> {
    if key.is_empty() {
        return Err(PolicyError::translation("", "attribute name is empty"));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(PolicyError::translation(
            key,
            "attribute names may only contain lowercase letters, digits, and underscores",
        ));
    }
    Ok(())
}

fn value_to_wire(attribute: &str, value: &AttributeValue) -> PolicyResult<Value> {
    match value {
        AttributeValue::Null => Err(PolicyError::translation(
            attribute,
            "null values cannot be submitted",
        )),
        AttributeValue::Boolean(b) => Ok(Value::Bool(*b)),
        AttributeValue::Integer(i) => Ok(Value::from(*i)),
        AttributeValue::Float(f) => Ok(Value::from(*f)),
        AttributeValue::String(s) => Ok(Value::String(s.clone())),
        AttributeValue::Array(items) => Ok(Value::Array(
            items
                .iter()
                .map(|item| value_to_wire(attribute, item))
                .collect::<PolicyResult<_>>()?,
        )),
        AttributeValue::Object(map) => {
            let mut wire = Map::new();
            for (key, nested) in map {
                validate_key(key)?;
                wire.insert(wire_key(key), value_to_wire(key, nested)?);
            }
            Ok(Value::Object(wire))
        }
    }
}

fn map_to_wire(attributes: &AttributeMap) -> PolicyResult<Map<String, Value>> {
    let mut wire = Map::new();
    for (key, value) in attributes.iter() {
        validate_key(key)?;
        wire.insert(wire_key(key), value_to_wire(key, value)?);
    }
    Ok(wire)
}

/// Translate an attribute mapping to the wire format.
pub fn to_wire(attributes: &AttributeMap) -> PolicyResult<Value> {
    map_to_wire(attributes).map(Value::Object)
}

/// Translate a full record, including its identity, to the wire format.
pub fn record_to_wire(record: &PolicyRecord) -> PolicyResult<Value> {
    let mut wire = map_to_wire(&record.attributes)?;
    wire.insert(ATTR_NAME.to_string(), Value::String(record.name.clone()));
    Ok(Value::Object(wire))
}

/// Translate a finalized diff: the changed attributes plus the identity
/// of the record they belong to.
pub fn diff_to_wire(name: &str, changes: &AttributeMap) -> PolicyResult<Value> {
    let mut wire = map_to_wire(changes)?;
    wire.insert(ATTR_NAME.to_string(), Value::String(name.to_string()));
    Ok(Value::Object(wire))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::canonicalize;
    use serde_json::json;

    #[test]
    fn test_keys_are_hyphenated_recursively() {
        let record = PolicyRecord::new("ipv4_hardening")
            .with("is_policy_active", false)
            .with(
                "rule_list",
                AttributeValue::from(json!([{"source_ip": "10.0.0.0/8", "index": 1}])),
            );

        let wire = record_to_wire(&record).unwrap();
        assert_eq!(
            wire,
            json!({
                "name": "ipv4_hardening",
                "is-policy-active": false,
                "rule-list": [{"index": 1, "source-ip": "10.0.0.0/8"}]
            })
        );
    }

    #[test]
    fn test_translation_inverts_normalization() {
        let attrs = AttributeMap::new()
            .with("ip_version", "IPv4")
            .with("rule_list", AttributeValue::from(json!([{"source_ip": "1.1.1.1"}])));

        let wire = to_wire(&attrs).unwrap();
        let round_tripped = canonicalize(wire);
        assert_eq!(round_tripped, serde_json::to_value(&attrs).unwrap());
    }

    #[test]
    fn test_invalid_attribute_name_fails() {
        let attrs = AttributeMap::new().with("Bad Key", 1i64);
        let err = to_wire(&attrs).unwrap_err();
        assert!(matches!(err, PolicyError::Translation { .. }));
    }

    #[test]
    fn test_null_value_fails_even_nested() {
        let attrs = AttributeMap::new().with(
            "rule_list",
            AttributeValue::from(json!([{"source_ip": null}])),
        );
        let err = to_wire(&attrs).unwrap_err();
        assert!(matches!(err, PolicyError::Translation { .. }));
    }

    #[test]
    fn test_diff_carries_identity() {
        let changes = AttributeMap::new().with("ip_version", "IPv6");
        let wire = diff_to_wire("ipv4_default", &changes).unwrap();
        assert_eq!(wire, json!({"name": "ipv4_default", "ip-version": "IPv6"}));
    }
}
