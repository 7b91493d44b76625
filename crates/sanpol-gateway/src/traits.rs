//! Gateway trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::GatewayResult;
use crate::session::Session;

/// Remote operations a reconciliation run needs from the switch.
///
/// Implementations speak one concrete transport; the engine only ever
/// sees this contract. Calls are strictly sequential within a run and
/// a batch is only ever submitted non-empty.
#[async_trait]
pub trait PolicyGateway: Send + Sync {
    /// Log in and obtain a session.
    ///
    /// A failure here aborts the run before anything else happens; no
    /// logout is owed for a session that never existed.
    async fn authenticate(&self) -> GatewayResult<Session>;

    /// Fetch the raw policy listing for the configured scope.
    async fn fetch_policies(&self, session: &Session) -> GatewayResult<Value>;

    /// Submit attribute updates for existing policies.
    async fn submit_update(&self, session: &Session, batch: &[Value]) -> GatewayResult<()>;

    /// Submit new policies.
    async fn submit_create(&self, session: &Session, batch: &[Value]) -> GatewayResult<()>;

    /// Submit policy deletions.
    async fn submit_delete(&self, session: &Session, batch: &[Value]) -> GatewayResult<()>;

    /// Submit an activation request.
    async fn submit_activate(&self, session: &Session, batch: &[Value]) -> GatewayResult<()>;

    /// Release the session.
    ///
    /// Called on every exit path after a successful login, including
    /// failures; errors from here are logged by callers but never
    /// override the run outcome.
    async fn deauthenticate(&self, session: &Session) -> GatewayResult<()>;
}
