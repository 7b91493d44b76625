//! # Reconciliation engine
//!
//! Converges a declared set of packet-filter policies to the live state
//! of one switch. A run is one of three mutually exclusive modes:
//!
//! - **Apply**: join declared records to current records by name, diff
//!   the matches, create the rest.
//! - **Activate**: drive the small activation state machine for one
//!   policy name.
//! - **Delete**: remove the named policies that actually exist.
//!
//! The [`Reconciler`] owns the whole run lifecycle: authenticate, fetch
//! and normalize current state, compute batches, submit anything
//! non-empty (unless simulating), and release the session on every exit
//! path after login. The outcome is a [`RunReport`].

pub mod activation;
pub mod diff;
pub mod error;
pub mod reconcile;
pub mod report;
pub mod request;

pub use activation::{plan_activation, ActivationOutcome, ActivationState};
pub use error::{EngineError, EngineResult};
pub use reconcile::Reconciler;
pub use report::{PolicyDiff, RunReport};
pub use request::{ActivationRequest, DeletionRequest, RunOptions, RunRequest};
