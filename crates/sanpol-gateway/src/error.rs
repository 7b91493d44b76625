//! Gateway error types.

use thiserror::Error;

/// Error from a management API call.
///
/// There is no transient class here: the interface contract makes any
/// remote failure fatal to the run, so no caller retries.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Login was rejected or the session token is no longer valid.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The request never produced an HTTP response.
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The switch refused service (5xx, overload).
    #[error("switch unavailable: {message}")]
    Unavailable { message: String },

    /// The requested resource does not exist on the switch.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// The switch rejected the operation.
    #[error("operation failed (HTTP {status}): {message}")]
    OperationFailed { status: u16, message: String },

    /// The response body could not be understood.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// The gateway configuration is unusable.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl GatewayError {
    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        GatewayError::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with its underlying cause.
    pub fn network_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        GatewayError::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        GatewayError::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        GatewayError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
