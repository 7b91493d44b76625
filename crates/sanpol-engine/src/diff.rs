//! Attribute diffing between a current and a desired record.
//!
//! The diff is one-directional: only fields present in the desired
//! record are considered, because omission means "leave unchanged" under
//! partial-update semantics. Fields present only in the current record
//! never appear in the result.

use std::collections::BTreeMap;

use sanpol_policy::{AttributeMap, AttributeValue, ATTR_NAME};

/// Compute the minimal set of attribute changes that would bring
/// `current` in line with `desired`.
///
/// Nested objects diff recursively, keeping only changed sub-fields;
/// arrays and scalars are compared structurally and replaced wholesale.
/// The identity field never enters the result. An empty result means no
/// operation is needed.
pub fn diff_attributes(current: &AttributeMap, desired: &AttributeMap) -> AttributeMap {
    let mut changes = AttributeMap::new();

    for (key, desired_value) in desired.iter() {
        if key == ATTR_NAME {
            continue;
        }
        match current.get(key) {
            Some(current_value) => {
                if let Some(changed) = diff_value(current_value, desired_value) {
                    changes.set(key.clone(), changed);
                }
            }
            None => changes.set(key.clone(), desired_value.clone()),
        }
    }

    changes
}

fn diff_value(current: &AttributeValue, desired: &AttributeValue) -> Option<AttributeValue> {
    match (current, desired) {
        (AttributeValue::Object(current), AttributeValue::Object(desired)) => {
            let nested = diff_object(current, desired);
            if nested.is_empty() {
                None
            } else {
                Some(AttributeValue::Object(nested))
            }
        }
        _ if current != desired => Some(desired.clone()),
        _ => None,
    }
}

fn diff_object(
    current: &BTreeMap<String, AttributeValue>,
    desired: &BTreeMap<String, AttributeValue>,
) -> BTreeMap<String, AttributeValue> {
    let mut changes = BTreeMap::new();

    for (key, desired_value) in desired {
        match current.get(key) {
            Some(current_value) => {
                if let Some(changed) = diff_value(current_value, desired_value) {
                    changes.insert(key.clone(), changed);
                }
            }
            None => {
                changes.insert(key.clone(), desired_value.clone());
            }
        }
    }

    changes
}
