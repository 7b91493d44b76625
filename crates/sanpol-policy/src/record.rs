//! Policy records.

use serde::{Deserialize, Serialize};

use crate::value::{AttributeMap, AttributeValue};

/// Canonical name of the identity attribute.
pub const ATTR_NAME: &str = "name";

/// Canonical name of the activation flag attribute.
pub const ATTR_IS_ACTIVE: &str = "is_policy_active";

/// A named packet-filter policy.
///
/// Identity is the `name`, unique among the policies on one switch. All
/// other attributes form an open mapping in canonical (underscored)
/// naming. Current-state records are read-only snapshots of one fetch;
/// desired records come from the caller and are never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Policy name, the stable identity used for matching.
    pub name: String,

    /// Remaining configuration attributes.
    #[serde(flatten)]
    pub attributes: AttributeMap,
}

impl PolicyRecord {
    /// Create a new record with the given name and no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: AttributeMap::new(),
        }
    }

    /// Set an attribute using builder pattern.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.set(name, value);
        self
    }

    /// Whether this policy is the active one on the switch.
    ///
    /// Derived from the `is_policy_active` attribute; absent or
    /// non-boolean values read as inactive.
    pub fn is_active(&self) -> bool {
        self.attributes.get_bool(ATTR_IS_ACTIVE).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_active_defaults_to_false() {
        let record = PolicyRecord::new("ipv4_default");
        assert!(!record.is_active());

        let record = PolicyRecord::new("ipv4_default").with(ATTR_IS_ACTIVE, "yes");
        assert!(!record.is_active());

        let record = PolicyRecord::new("ipv4_default").with(ATTR_IS_ACTIVE, true);
        assert!(record.is_active());
    }

    #[test]
    fn test_open_attributes_flatten() {
        let record: PolicyRecord = serde_json::from_value(json!({
            "name": "ipv4_telnet_block",
            "ip_version": "IPv4",
            "is_policy_active": false
        }))
        .unwrap();

        assert_eq!(record.name, "ipv4_telnet_block");
        assert_eq!(record.attributes.get_str("ip_version"), Some("IPv4"));
        assert!(!record.attributes.contains("name"));

        let encoded = serde_json::to_value(&record).unwrap();
        assert_eq!(
            encoded,
            json!({
                "name": "ipv4_telnet_block",
                "ip_version": "IPv4",
                "is_policy_active": false
            })
        );
    }
}
