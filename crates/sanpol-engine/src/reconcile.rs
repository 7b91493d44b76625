//! Run orchestration.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use sanpol_gateway::{PolicyGateway, Session};
use sanpol_policy::{normalize, wire, PolicyRecord};

use crate::activation::{plan_activation, ActivationOutcome};
use crate::diff::diff_attributes;
use crate::error::{EngineError, EngineResult};
use crate::report::{PolicyDiff, RunReport};
use crate::request::{DeletionRequest, RunOptions, RunRequest};

/// Orchestrates one reconciliation run against one switch.
///
/// Owns no state across runs; the switch is the sole source of truth
/// and every run starts from a fresh fetch.
pub struct Reconciler<G> {
    gateway: G,
}

impl<G: PolicyGateway> Reconciler<G> {
    /// Create a reconciler over the given gateway.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Execute one run.
    ///
    /// Authenticates, fetches and normalizes current state, dispatches
    /// the requested mode, and submits any non-empty batches unless
    /// simulating. The session is released on every exit path after a
    /// successful login; a failed login releases nothing.
    pub async fn run(&self, request: RunRequest, options: RunOptions) -> EngineResult<RunReport> {
        if let RunRequest::Apply(desired) = &request {
            reject_duplicates(desired)?;
        }

        let mut report = RunReport::new(request.mode(), options.simulate);
        info!(
            run_id = %report.id,
            mode = request.mode(),
            simulate = options.simulate,
            "starting reconciliation run"
        );

        let session = self.gateway.authenticate().await?;
        report.api_version = session.api_version().map(str::to_string);

        let outcome = self
            .execute(&session, request, options, &mut report)
            .await;

        if let Err(error) = self.gateway.deauthenticate(&session).await {
            // The run outcome stands; a stuck session only gets logged.
            warn!(run_id = %report.id, error = %error, "failed to release management session");
        }

        outcome.map(|()| {
            report.finalize();
            info!(
                run_id = %report.id,
                changed = report.changed,
                failed = report.failed,
                "run finished"
            );
            report
        })
    }

    async fn execute(
        &self,
        session: &Session,
        request: RunRequest,
        options: RunOptions,
        report: &mut RunReport,
    ) -> EngineResult<()> {
        let body = self.gateway.fetch_policies(session).await?;
        let current = normalize::decode_policies(&body)?;
        debug!(count = current.len(), "normalized current state");
        report.current = current.clone();

        match request {
            RunRequest::Activate(target) => {
                self.run_activate(session, &target, &current, options, report)
                    .await
            }
            RunRequest::Delete(targets) => {
                self.run_delete(session, &targets, &current, options, report)
                    .await
            }
            RunRequest::Apply(desired) => {
                self.run_apply(session, desired, &current, options, report)
                    .await
            }
        }
    }

    async fn run_activate(
        &self,
        session: &Session,
        target: &str,
        current: &[PolicyRecord],
        options: RunOptions,
        report: &mut RunReport,
    ) -> EngineResult<()> {
        match plan_activation(target, current) {
            ActivationOutcome::NotFound => {
                report.fail(format!("no policy named '{target}' exists on the switch"));
                Ok(())
            }
            ActivationOutcome::AlreadyActive(_) => {
                report.note(format!("policy '{target}' is already active"));
                Ok(())
            }
            ActivationOutcome::Activate(activation) => {
                report.activated = vec![activation.to_wire()];
                report.changed = true;
                if !options.simulate {
                    self.gateway
                        .submit_activate(session, &report.activated)
                        .await?;
                    info!(policy = %target, "activated policy");
                }
                Ok(())
            }
        }
    }

    async fn run_delete(
        &self,
        session: &Session,
        targets: &[String],
        current: &[PolicyRecord],
        options: RunOptions,
        report: &mut RunReport,
    ) -> EngineResult<()> {
        let existing: HashSet<&str> = current.iter().map(|p| p.name.as_str()).collect();

        let mut batch = Vec::new();
        for target in targets {
            if existing.contains(target.as_str()) {
                batch.push(DeletionRequest::new(target).to_wire());
            } else {
                debug!(policy = %target, "deletion target not present, dropping");
                report.skipped_deletions.push(target.clone());
            }
        }

        if batch.is_empty() {
            return Ok(());
        }

        report.deleted = batch;
        report.changed = true;
        if !options.simulate {
            self.gateway.submit_delete(session, &report.deleted).await?;
            info!(count = report.deleted.len(), "deleted policies");
        }
        Ok(())
    }

    async fn run_apply(
        &self,
        session: &Session,
        desired: Vec<PolicyRecord>,
        current: &[PolicyRecord],
        options: RunOptions,
        report: &mut RunReport,
    ) -> EngineResult<()> {
        let by_name: HashMap<&str, &PolicyRecord> =
            current.iter().map(|p| (p.name.as_str(), p)).collect();

        // Update pass: declared records that match a current record.
        let mut updates = Vec::new();
        for record in &desired {
            if let Some(existing) = by_name.get(record.name.as_str()) {
                let changes = diff_attributes(&existing.attributes, &record.attributes);
                if changes.is_empty() {
                    debug!(policy = %record.name, "no drift");
                    continue;
                }
                updates.push(wire::diff_to_wire(&record.name, &changes)?);
                report.diffs.push(PolicyDiff {
                    name: record.name.clone(),
                    changes,
                });
            }
        }

        // Create pass: declared records with no current counterpart.
        let mut creates = Vec::new();
        for record in &desired {
            if !by_name.contains_key(record.name.as_str()) {
                creates.push(wire::record_to_wire(record)?);
            }
        }

        report.desired = desired;

        if !updates.is_empty() {
            report.updated = updates;
            report.changed = true;
            if !options.simulate {
                self.gateway.submit_update(session, &report.updated).await?;
                info!(count = report.updated.len(), "updated policies");
            }
        }

        if !creates.is_empty() {
            report.created = creates;
            report.changed = true;
            if !options.simulate {
                self.gateway.submit_create(session, &report.created).await?;
                info!(count = report.created.len(), "created policies");
            }
        }

        Ok(())
    }
}

fn reject_duplicates(desired: &[PolicyRecord]) -> EngineResult<()> {
    let mut seen = HashSet::new();
    for record in desired {
        if !seen.insert(record.name.as_str()) {
            return Err(EngineError::DuplicatePolicy {
                name: record.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_duplicates() {
        let records = vec![
            PolicyRecord::new("p1"),
            PolicyRecord::new("p2"),
            PolicyRecord::new("p1"),
        ];
        let err = reject_duplicates(&records).unwrap_err();
        assert!(matches!(err, EngineError::DuplicatePolicy { name } if name == "p1"));

        assert!(reject_duplicates(&records[..2]).is_ok());
    }
}
