//! Run reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use sanpol_policy::{AttributeMap, PolicyRecord};

/// One matched record's computed changes, echoed for observability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDiff {
    /// Name of the policy the changes belong to.
    pub name: String,
    /// The changed attributes (canonical naming).
    pub changes: AttributeMap,
}

/// Outcome of one reconciliation run.
///
/// Write-once: the reconciler fills it in as the run progresses and
/// finalizes it at exit. `changed` reflects what was submitted, or what
/// would have been submitted under simulate-only. Logical failures
/// (activation target not found) set `failed` and `message` instead of
/// erroring the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique id of this run.
    pub id: Uuid,

    /// Mode label: apply, activate, or delete.
    pub mode: String,

    /// Whether the run mutated (or, simulating, would mutate) the switch.
    pub changed: bool,

    /// Whether the run ended in a logical failure.
    pub failed: bool,

    /// Human-readable note: the logical failure, or an informational
    /// outcome such as "already active".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// True when mutations were suppressed.
    pub simulate: bool,

    /// API version the switch advertised at login, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Update batch as submitted (wire naming).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub updated: Vec<Value>,

    /// Create batch as submitted (wire naming).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created: Vec<Value>,

    /// Delete batch as submitted (wire naming).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<Value>,

    /// Activation batch as submitted (wire naming).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activated: Vec<Value>,

    /// Snapshot of current state at fetch time (canonical naming).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub current: Vec<PolicyRecord>,

    /// Echo of the declared input for an apply run.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub desired: Vec<PolicyRecord>,

    /// Per-policy changes computed by an apply run.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diffs: Vec<PolicyDiff>,

    /// Deletion targets dropped because no such policy exists.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_deletions: Vec<String>,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl RunReport {
    /// Start a report for a new run.
    pub fn new(mode: &'static str, simulate: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode: mode.to_string(),
            changed: false,
            failed: false,
            message: None,
            simulate,
            api_version: None,
            updated: Vec::new(),
            created: Vec::new(),
            deleted: Vec::new(),
            activated: Vec::new(),
            current: Vec::new(),
            desired: Vec::new(),
            diffs: Vec::new(),
            skipped_deletions: Vec::new(),
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Record a logical failure.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.failed = true;
        self.message = Some(message.into());
    }

    /// Record an informational outcome.
    pub fn note(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Stamp the completion time.
    pub fn finalize(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Whether any batch holds submissions.
    pub fn has_submissions(&self) -> bool {
        !self.updated.is_empty()
            || !self.created.is_empty()
            || !self.deleted.is_empty()
            || !self.activated.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batches_are_omitted_from_json() {
        let mut report = RunReport::new("delete", false);
        report.finalize();

        let encoded = serde_json::to_value(&report).unwrap();
        assert!(encoded.get("updated").is_none());
        assert!(encoded.get("message").is_none());
        assert_eq!(encoded["changed"], serde_json::json!(false));
        assert!(encoded.get("completed_at").is_some());
    }

    #[test]
    fn test_fail_sets_both_fields() {
        let mut report = RunReport::new("activate", false);
        report.fail("no policy named 'x' exists");
        assert!(report.failed);
        assert_eq!(report.message.as_deref(), Some("no policy named 'x' exists"));
        assert!(!report.changed);
    }
}
