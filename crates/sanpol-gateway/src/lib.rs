//! # Management API gateway
//!
//! The remote side of a reconciliation run: session login/logout, the
//! current-state fetch, and the four mutating batch submissions, behind
//! the [`PolicyGateway`] trait so the engine never touches HTTP directly.
//!
//! [`RestGateway`] is the production implementation over the switch's
//! REST management interface. One gateway holds one credential bundle
//! and hands out one [`Session`] per run; callers are responsible for
//! releasing the session on every exit path after authentication.

pub mod config;
pub mod error;
pub mod rest;
pub mod session;
pub mod traits;

pub use config::{Credentials, GatewayConfig, TransportSecurity, DEFAULT_VF_ID};
pub use error::{GatewayError, GatewayResult};
pub use rest::RestGateway;
pub use session::Session;
pub use traits::PolicyGateway;
