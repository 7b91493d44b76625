//! Activation state machine.
//!
//! The switch enforces at-most-one-active; this machine only decides
//! what a single activate request means against the fetched snapshot.
//! There is no deactivate transition: a policy stops being active only
//! when the device activates a different one.

use std::fmt;

use sanpol_policy::PolicyRecord;

use crate::request::ActivationRequest;

/// Activation status of one named policy within the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationState {
    /// Present and not active.
    Inactive,
    /// Present and active.
    Active,
    /// No policy with that name exists; terminal, reachable only on
    /// entry.
    Missing,
}

impl ActivationState {
    /// Derive the state of `target` from the current snapshot.
    pub fn of(target: &str, current: &[PolicyRecord]) -> Self {
        match current.iter().find(|policy| policy.name == target) {
            Some(policy) if policy.is_active() => ActivationState::Active,
            Some(_) => ActivationState::Inactive,
            None => ActivationState::Missing,
        }
    }

    /// String form for logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationState::Inactive => "inactive",
            ActivationState::Active => "active",
            ActivationState::Missing => "missing",
        }
    }
}

impl fmt::Display for ActivationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of applying an activate request to the current state.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivationOutcome {
    /// Inactive → Active: submit this request.
    Activate(ActivationRequest),
    /// Active → Active: nothing to submit, the run is unchanged.
    AlreadyActive(ActivationRequest),
    /// Missing: logical failure, nothing may be submitted.
    NotFound,
}

/// Drive the activation transition for `target`.
pub fn plan_activation(target: &str, current: &[PolicyRecord]) -> ActivationOutcome {
    match ActivationState::of(target, current) {
        ActivationState::Inactive => ActivationOutcome::Activate(ActivationRequest::activate(target)),
        ActivationState::Active => {
            ActivationOutcome::AlreadyActive(ActivationRequest::reaffirm(target))
        }
        ActivationState::Missing => ActivationOutcome::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanpol_policy::ATTR_IS_ACTIVE;

    fn snapshot() -> Vec<PolicyRecord> {
        vec![
            PolicyRecord::new("ipv4_default").with(ATTR_IS_ACTIVE, true),
            PolicyRecord::new("ipv4_hardening").with(ATTR_IS_ACTIVE, false),
        ]
    }

    #[test]
    fn test_state_derivation() {
        let current = snapshot();
        assert_eq!(
            ActivationState::of("ipv4_default", &current),
            ActivationState::Active
        );
        assert_eq!(
            ActivationState::of("ipv4_hardening", &current),
            ActivationState::Inactive
        );
        assert_eq!(
            ActivationState::of("nope", &current),
            ActivationState::Missing
        );
    }

    #[test]
    fn test_inactive_transitions_to_activate() {
        let outcome = plan_activation("ipv4_hardening", &snapshot());
        assert_eq!(
            outcome,
            ActivationOutcome::Activate(ActivationRequest::activate("ipv4_hardening"))
        );
    }

    #[test]
    fn test_active_is_a_reaffirmation() {
        let outcome = plan_activation("ipv4_default", &snapshot());
        assert_eq!(
            outcome,
            ActivationOutcome::AlreadyActive(ActivationRequest::reaffirm("ipv4_default"))
        );
    }

    #[test]
    fn test_missing_is_terminal() {
        assert_eq!(plan_activation("ghost", &snapshot()), ActivationOutcome::NotFound);
    }

    #[test]
    fn test_missing_activation_flag_reads_inactive() {
        let current = vec![PolicyRecord::new("bare")];
        assert_eq!(ActivationState::of("bare", &current), ActivationState::Inactive);
    }
}
