//! Engine error types.

use thiserror::Error;

use sanpol_gateway::GatewayError;
use sanpol_policy::PolicyError;

/// Error that aborts a reconciliation run.
///
/// Logical outcomes such as "policy not found" or "nothing to do" are
/// not errors; they are reported through
/// [`crate::RunReport`](crate::report::RunReport) fields.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The declared input names the same policy more than once.
    #[error("policy '{name}' is declared more than once")]
    DuplicatePolicy { name: String },

    /// A remote call failed.
    #[error("management call failed: {0}")]
    Gateway(#[from] GatewayError),

    /// Current state could not be decoded or a declared record could not
    /// be translated for submission.
    #[error("policy data error: {0}")]
    Policy(#[from] PolicyError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
