//! Gateway configuration: endpoint, credentials, transport security.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{GatewayError, GatewayResult};

/// Scope identifier addressing a switch without virtual fabrics enabled.
pub const UNSCOPED_VF_ID: i32 = -1;

/// Default virtual fabric scope when the caller gives none.
pub const DEFAULT_VF_ID: i32 = 128;

/// Login credentials for the management API.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Login user name.
    pub username: String,
    /// Login password.
    pub password: String,
}

impl Credentials {
    /// Create a new credential bundle.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create a redacted copy for logging and display.
    pub fn redacted(&self) -> Self {
        Self {
            username: self.username.clone(),
            password: "***REDACTED***".to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***REDACTED***")
            .finish()
    }
}

/// Transport security mode for the management connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportSecurity {
    /// Plain HTTP.
    Http,
    /// HTTPS with certificate verification.
    Https,
    /// HTTPS against a self-signed certificate (verification disabled).
    SelfSigned,
}

impl TransportSecurity {
    /// URL scheme for this mode.
    pub fn scheme(&self) -> &'static str {
        match self {
            TransportSecurity::Http => "http",
            TransportSecurity::Https | TransportSecurity::SelfSigned => "https",
        }
    }

    /// Whether server certificates are verified.
    pub fn verifies_certificates(&self) -> bool {
        !matches!(self, TransportSecurity::SelfSigned)
    }

    /// String form accepted back by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportSecurity::Http => "http",
            TransportSecurity::Https => "https",
            TransportSecurity::SelfSigned => "self-signed",
        }
    }
}

impl fmt::Display for TransportSecurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransportSecurity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(TransportSecurity::Http),
            "https" => Ok(TransportSecurity::Https),
            "self-signed" | "self" => Ok(TransportSecurity::SelfSigned),
            _ => Err(format!(
                "unknown transport security '{s}', expected one of: http, https, self-signed"
            )),
        }
    }
}

/// Configuration for a [`crate::RestGateway`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Management address of the switch (host or host:port).
    pub endpoint: String,

    /// Login credentials.
    pub credentials: Credentials,

    /// Transport security mode.
    pub security: TransportSecurity,

    /// Virtual fabric to target; [`UNSCOPED_VF_ID`] for switches without
    /// virtual fabrics.
    pub vf_id: i32,

    /// Optional delay inserted before every management call.
    pub throttle: Option<Duration>,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Per-request read timeout.
    pub read_timeout: Duration,
}

impl GatewayConfig {
    /// Create a configuration with default scope, security, and timeouts.
    pub fn new(endpoint: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            endpoint: endpoint.into(),
            credentials,
            security: TransportSecurity::Https,
            vf_id: DEFAULT_VF_ID,
            throttle: None,
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(60),
        }
    }

    /// Set the transport security mode.
    pub fn with_security(mut self, security: TransportSecurity) -> Self {
        self.security = security;
        self
    }

    /// Set the virtual fabric scope.
    pub fn with_vf_id(mut self, vf_id: i32) -> Self {
        self.vf_id = vf_id;
        self
    }

    /// Set the inter-call throttle delay.
    pub fn with_throttle(mut self, delay: Duration) -> Self {
        self.throttle = Some(delay);
        self
    }

    /// Base URL for the management API.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.security.scheme(), self.endpoint)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> GatewayResult<()> {
        if self.endpoint.is_empty() {
            return Err(GatewayError::invalid_configuration("endpoint is empty"));
        }
        if self.endpoint.contains("://") {
            return Err(GatewayError::invalid_configuration(
                "endpoint must be a host, not a URL; transport is chosen by the security mode",
            ));
        }
        if self.credentials.username.is_empty() {
            return Err(GatewayError::invalid_configuration("username is empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_parse_and_display() {
        for mode in [
            TransportSecurity::Http,
            TransportSecurity::Https,
            TransportSecurity::SelfSigned,
        ] {
            let parsed: TransportSecurity = mode.as_str().parse().unwrap();
            assert_eq!(parsed, mode);
        }
        assert_eq!(
            "self".parse::<TransportSecurity>().unwrap(),
            TransportSecurity::SelfSigned
        );
        assert!("tls".parse::<TransportSecurity>().is_err());
    }

    #[test]
    fn test_self_signed_disables_verification() {
        assert!(TransportSecurity::Https.verifies_certificates());
        assert!(!TransportSecurity::SelfSigned.verifies_certificates());
        assert_eq!(TransportSecurity::SelfSigned.scheme(), "https");
    }

    #[test]
    fn test_base_url() {
        let config = GatewayConfig::new("10.10.1.1", Credentials::new("admin", "secret"))
            .with_security(TransportSecurity::Http);
        assert_eq!(config.base_url(), "http://10.10.1.1");
    }

    #[test]
    fn test_validate_rejects_url_endpoint() {
        let config = GatewayConfig::new("https://10.10.1.1", Credentials::new("admin", "secret"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_never_debug_print_password() {
        let creds = Credentials::new("admin", "fibranne");
        let printed = format!("{creds:?}");
        assert!(!printed.contains("fibranne"));
        assert_eq!(creds.redacted().password, "***REDACTED***");
    }
}
