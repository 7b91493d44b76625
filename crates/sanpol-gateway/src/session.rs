//! Authenticated management session.

use std::fmt;

/// A live session on the management API.
///
/// Holds the opaque token returned at login; exactly one session exists
/// per run and it must be released through
/// [`crate::PolicyGateway::deauthenticate`] on every exit path after a
/// successful login.
#[derive(Clone)]
pub struct Session {
    token: String,
    api_version: Option<String>,
}

impl Session {
    /// Create a session from a login response.
    pub fn new(token: impl Into<String>, api_version: Option<String>) -> Self {
        Self {
            token: token.into(),
            api_version,
        }
    }

    /// The opaque session token sent on every subsequent call.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// API version advertised at login, when the switch reports one.
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"***REDACTED***")
            .field("api_version", &self.api_version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_never_debug_prints() {
        let session = Session::new("Custom_Basic abc123", Some("2.0".to_string()));
        let printed = format!("{session:?}");
        assert!(!printed.contains("abc123"));
        assert!(printed.contains("2.0"));
    }
}
