//! Seam between LIPA and the hosted identity provider.
//!
//! The provider owns password hashing, email confirmation and token issuance.
//! LIPA only ever calls [`AuthGateway::register`] and
//! [`AuthGateway::authenticate`] and treats everything behind them as opaque.

pub mod supabase;
pub use self::supabase::SupabaseGateway;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Profile metadata attached to an account at signup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Account record as the gateway reports it.
///
/// Provider fields LIPA does not model are kept in `extra` so the relay can
/// hand the object back to callers untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayUser {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySession {
    pub access_token: String,
}

/// Successful password login: the account plus a bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authenticated {
    pub user: GatewayUser,
    pub session: GatewaySession,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway answered and said no. The message is the gateway's own.
    #[error("{0}")]
    Rejected(String),

    #[error("auth gateway unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed auth gateway response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Create an account. The gateway sends the confirmation email.
    async fn register(
        &self,
        email: &str,
        password: &SecretString,
        full_name: &str,
    ) -> Result<GatewayUser, GatewayError>;

    /// Exchange email and password for a bearer token.
    async fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Authenticated, GatewayError>;
}

/// Pull a human readable message out of an error body.
///
/// Hosted auth APIs are not consistent about the field name, so the first of
/// `msg`, `error_description`, `message`, `error` holding a string wins.
#[must_use]
pub fn error_message(body: &Value) -> Option<String> {
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}
