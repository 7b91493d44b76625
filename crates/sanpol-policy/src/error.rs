//! Policy data errors.

use thiserror::Error;

/// Error produced while decoding or translating policy records.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The response body did not have the expected shape.
    #[error("unexpected response shape: {message}")]
    Decode { message: String },

    /// A policy record carried no `name` identity.
    #[error("policy record is missing its name")]
    MissingName,

    /// An attribute could not be translated to the wire format.
    #[error("cannot translate attribute '{attribute}': {message}")]
    Translation { attribute: String, message: String },
}

impl PolicyError {
    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        PolicyError::Decode {
            message: message.into(),
        }
    }

    /// Create a translation error for a named attribute.
    pub fn translation(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        PolicyError::Translation {
            attribute: attribute.into(),
            message: message.into(),
        }
    }
}

/// Result type for policy data operations.
pub type PolicyResult<T> = Result<T, PolicyError>;
