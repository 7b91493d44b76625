//! Run inputs and the per-run option set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sanpol_policy::PolicyRecord;

/// What one reconciliation run should do.
///
/// Exactly one variant per invocation; the modes are mutually exclusive
/// by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum RunRequest {
    /// Converge the declared records: update drifted matches, create the
    /// rest.
    Apply(Vec<PolicyRecord>),
    /// Make the named policy the active one.
    Activate(String),
    /// Delete the named policies where they exist.
    Delete(Vec<String>),
}

impl RunRequest {
    /// Short mode label for logs and reports.
    pub fn mode(&self) -> &'static str {
        match self {
            RunRequest::Apply(_) => "apply",
            RunRequest::Activate(_) => "activate",
            RunRequest::Delete(_) => "delete",
        }
    }
}

/// Per-run options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute and report everything, submit nothing.
    pub simulate: bool,
}

/// The action carried by an activation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationAction {
    /// Make the policy active.
    Activate,
}

/// Request to make a policy live, produced only for a policy that exists
/// in current state. `action` is `None` when the policy is already
/// active and the request merely re-affirms it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationRequest {
    /// Target policy name.
    pub name: String,

    /// Intended action; absent for a re-affirmation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActivationAction>,
}

impl ActivationRequest {
    /// Request activation of a currently inactive policy.
    pub fn activate(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: Some(ActivationAction::Activate),
        }
    }

    /// Re-affirm a policy that is already active.
    pub fn reaffirm(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: None,
        }
    }

    /// Wire payload for submission.
    pub fn to_wire(&self) -> Value {
        // Both keys are already wire-safe; no hyphenation needed.
        match self.action {
            Some(ActivationAction::Activate) => {
                serde_json::json!({"name": self.name, "action": "activate"})
            }
            None => serde_json::json!({"name": self.name}),
        }
    }
}

/// Request to delete one policy that exists in current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletionRequest {
    /// Target policy name.
    pub name: String,
}

impl DeletionRequest {
    /// Create a deletion request.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Wire payload for submission.
    pub fn to_wire(&self) -> Value {
        serde_json::json!({"name": self.name})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_activation_wire_payloads() {
        assert_eq!(
            ActivationRequest::activate("ipv4_default").to_wire(),
            json!({"name": "ipv4_default", "action": "activate"})
        );
        assert_eq!(
            ActivationRequest::reaffirm("ipv4_default").to_wire(),
            json!({"name": "ipv4_default"})
        );
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(RunRequest::Apply(vec![]).mode(), "apply");
        assert_eq!(RunRequest::Activate("p".into()).mode(), "activate");
        assert_eq!(RunRequest::Delete(vec![]).mode(), "delete");
    }
}
