//! CLI error types and exit codes

use thiserror::Error;

use sanpol_engine::EngineError;
use sanpol_gateway::GatewayError;
use sanpol_policy::PolicyError;

/// Exit codes for the CLI
/// - 0: Success
/// - 1: General error
/// - 2: Authentication failure
/// - 3: Network error
/// - 4: Validation error or logical run failure
/// - 5: Switch/server error
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Switch error: {0}")]
    Server(String),

    #[error("Switch rejected the request (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Run failed: {0}")]
    RunFailed(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Input error: {0}")]
    Input(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation(_) | CliError::RunFailed(_) => 4,
            CliError::Authentication(_) => 2,
            CliError::Network(_) => 3,
            CliError::Server(_) => 5,
            CliError::Api { status, .. } => {
                if *status >= 500 {
                    5
                } else if *status == 401 || *status == 403 {
                    2
                } else {
                    4
                }
            }
            CliError::Io(_) | CliError::Input(_) => 1,
        }
    }

    /// Print the error to stderr with appropriate formatting
    pub fn print(&self) {
        let use_color = std::env::var("NO_COLOR").is_err();

        if use_color {
            eprintln!("\x1b[31mError:\x1b[0m {}", self);
        } else {
            eprintln!("Error: {}", self);
        }

        if let Some(suggestion) = self.suggestion() {
            if use_color {
                eprintln!("\n\x1b[33mSuggestion:\x1b[0m {}", suggestion);
            } else {
                eprintln!("\nSuggestion: {}", suggestion);
            }
        }
    }

    /// Get a suggested action for this error
    fn suggestion(&self) -> Option<&'static str> {
        match self {
            CliError::Authentication(_) => {
                Some("Check the switch credentials, or set SANPOL_PASSWORD.")
            }
            CliError::Network(_) => {
                Some("Check connectivity to the switch management interface and the transport security mode.")
            }
            _ => None,
        }
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::DuplicatePolicy { .. } => CliError::Validation(e.to_string()),
            EngineError::Gateway(gateway) => gateway.into(),
            EngineError::Policy(policy) => policy.into(),
        }
    }
}

impl From<GatewayError> for CliError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::AuthenticationFailed => CliError::Authentication(e.to_string()),
            GatewayError::Network { .. } => CliError::Network(e.to_string()),
            GatewayError::Unavailable { .. } | GatewayError::MalformedResponse { .. } => {
                CliError::Server(e.to_string())
            }
            GatewayError::NotFound { ref resource } => CliError::Api {
                status: 404,
                message: resource.clone(),
            },
            GatewayError::OperationFailed { status, ref message } => CliError::Api {
                status,
                message: message.clone(),
            },
            GatewayError::InvalidConfiguration { .. } => CliError::Validation(e.to_string()),
        }
    }
}

impl From<PolicyError> for CliError {
    fn from(e: PolicyError) -> Self {
        match e {
            // A record that cannot be translated is bad declared input.
            PolicyError::Translation { .. } => CliError::Validation(e.to_string()),
            // A listing that cannot be decoded is the switch's fault.
            PolicyError::Decode { .. } | PolicyError::MissingName => {
                CliError::Server(e.to_string())
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(format!("JSON error: {}", e))
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(e: dialoguer::Error) -> Self {
        CliError::Input(format!("Dialog error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_validation() {
        assert_eq!(CliError::Validation("test".to_string()).exit_code(), 4);
        assert_eq!(CliError::RunFailed("test".to_string()).exit_code(), 4);
    }

    #[test]
    fn test_exit_code_authentication() {
        assert_eq!(CliError::Authentication("test".to_string()).exit_code(), 2);
    }

    #[test]
    fn test_exit_code_network() {
        assert_eq!(CliError::Network("test".to_string()).exit_code(), 3);
    }

    #[test]
    fn test_exit_code_api_by_status() {
        let api = |status| CliError::Api {
            status,
            message: "test".to_string(),
        };
        assert_eq!(api(500).exit_code(), 5);
        assert_eq!(api(401).exit_code(), 2);
        assert_eq!(api(400).exit_code(), 4);
    }

    #[test]
    fn test_engine_errors_map_to_exit_codes() {
        let err: CliError = EngineError::Gateway(GatewayError::AuthenticationFailed).into();
        assert_eq!(err.exit_code(), 2);

        let err: CliError = EngineError::DuplicatePolicy {
            name: "p1".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 4);

        let err: CliError =
            EngineError::Policy(PolicyError::translation("bad", "invalid name")).into();
        assert_eq!(err.exit_code(), 4);
    }
}
