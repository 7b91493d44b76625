//! REST implementation of the gateway.
//!
//! Speaks the switch's REST management interface: `POST /rest/login`
//! with HTTP Basic credentials yields an opaque token in the
//! `Authorization` response header, which every subsequent call echoes
//! back; `POST /rest/logout` releases it. The policy collection lives at
//! `/rest/running/security/filter-policy`, scoped by the `vf-id` query
//! parameter, and is mutated with PATCH (updates, activation), POST
//! (creation), and DELETE (removal) carrying a `filter-policy` envelope.

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::session::Session;
use crate::traits::PolicyGateway;

/// Gateway over the switch's REST management interface.
pub struct RestGateway {
    config: GatewayConfig,
    client: Client,
}

impl std::fmt::Debug for RestGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestGateway")
            .field("endpoint", &self.config.endpoint)
            .field("security", &self.config.security)
            .field("vf_id", &self.config.vf_id)
            .finish()
    }
}

impl RestGateway {
    /// Create a gateway from a validated configuration.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .timeout(config.read_timeout)
            .connect_timeout(config.connect_timeout);

        if !config.security.verifies_certificates() {
            warn!(
                target: "security",
                endpoint = %config.endpoint,
                "certificate verification disabled for self-signed switch certificate"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|e| {
            GatewayError::invalid_configuration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self { config, client })
    }

    fn login_url(&self) -> String {
        format!("{}/rest/login", self.config.base_url())
    }

    fn logout_url(&self) -> String {
        format!("{}/rest/logout", self.config.base_url())
    }

    fn policy_url(&self) -> String {
        format!(
            "{}/rest/running/security/filter-policy",
            self.config.base_url()
        )
    }

    /// Honor the configured inter-call delay, if any.
    async fn throttle(&self) {
        if let Some(delay) = self.config.throttle {
            debug!(delay_ms = delay.as_millis() as u64, "throttling before call");
            tokio::time::sleep(delay).await;
        }
    }

    fn scoped(&self, method: Method, url: &str, session: &Session) -> RequestBuilder {
        self.client
            .request(method, url)
            .query(&[("vf-id", self.config.vf_id)])
            .header(header::AUTHORIZATION, session.token())
            .header(header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> GatewayResult<Response> {
        request.send().await.map_err(|e| {
            GatewayError::network_with_source(format!("request to {url} failed"), e)
        })
    }

    /// Map a non-success response to the matching error.
    async fn response_error(&self, response: Response) -> GatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                GatewayError::AuthenticationFailed
            }
            StatusCode::NOT_FOUND => GatewayError::NotFound { resource: message },
            status if status.is_server_error() => GatewayError::Unavailable { message },
            status => GatewayError::OperationFailed {
                status: status.as_u16(),
                message,
            },
        }
    }

    async fn submit(
        &self,
        method: Method,
        session: &Session,
        batch: &[Value],
        operation: &'static str,
    ) -> GatewayResult<()> {
        self.throttle().await;

        let url = self.policy_url();
        debug!(
            operation,
            url = %url,
            batch_len = batch.len(),
            "submitting policy batch"
        );

        let request = self
            .scoped(method, &url, session)
            .json(&json!({ "filter-policy": batch }));
        let response = self.send(request, &url).await?;

        if !response.status().is_success() {
            return Err(self.response_error(response).await);
        }
        Ok(())
    }
}

/// Pull the device's error message out of a response body, falling back
/// to the raw text.
fn extract_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<Value>(body) {
        if let Some(message) = parsed
            .pointer("/errors/error/0/error-message")
            .and_then(Value::as_str)
        {
            return message.to_string();
        }
    }
    body.trim().to_string()
}

#[async_trait]
impl PolicyGateway for RestGateway {
    async fn authenticate(&self) -> GatewayResult<Session> {
        self.throttle().await;

        let url = self.login_url();
        debug!(url = %url, username = %self.config.credentials.username, "logging in");

        let request = self.client.post(&url).basic_auth(
            &self.config.credentials.username,
            Some(&self.config.credentials.password),
        );
        let response = self.send(request, &url).await?;

        if !response.status().is_success() {
            return Err(match self.response_error(response).await {
                // A login rejection of any shape is an authentication failure.
                GatewayError::OperationFailed { .. } | GatewayError::NotFound { .. } => {
                    GatewayError::AuthenticationFailed
                }
                other => other,
            });
        }

        let token = response
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                GatewayError::malformed("login response carries no Authorization token")
            })?;

        let api_version = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("version").and_then(Value::as_str).map(str::to_string));

        debug!(api_version = api_version.as_deref().unwrap_or("unknown"), "login succeeded");
        Ok(Session::new(token, api_version))
    }

    async fn fetch_policies(&self, session: &Session) -> GatewayResult<Value> {
        self.throttle().await;

        let url = self.policy_url();
        debug!(url = %url, vf_id = self.config.vf_id, "fetching current policies");

        let request = self.scoped(Method::GET, &url, session);
        let response = self.send(request, &url).await?;

        if !response.status().is_success() {
            return Err(self.response_error(response).await);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| GatewayError::malformed(format!("policy listing is not JSON: {e}")))
    }

    async fn submit_update(&self, session: &Session, batch: &[Value]) -> GatewayResult<()> {
        self.submit(Method::PATCH, session, batch, "update").await
    }

    async fn submit_create(&self, session: &Session, batch: &[Value]) -> GatewayResult<()> {
        self.submit(Method::POST, session, batch, "create").await
    }

    async fn submit_delete(&self, session: &Session, batch: &[Value]) -> GatewayResult<()> {
        self.submit(Method::DELETE, session, batch, "delete").await
    }

    async fn submit_activate(&self, session: &Session, batch: &[Value]) -> GatewayResult<()> {
        // Activation is a PATCH on the same collection; the payload's
        // `action` field is what flips the active policy.
        self.submit(Method::PATCH, session, batch, "activate").await
    }

    async fn deauthenticate(&self, session: &Session) -> GatewayResult<()> {
        self.throttle().await;

        let url = self.logout_url();
        debug!(url = %url, "logging out");

        let request = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, session.token());
        let response = self.send(request, &url).await?;

        if !response.status().is_success() {
            return Err(self.response_error(response).await);
        }
        Ok(())
    }
}
