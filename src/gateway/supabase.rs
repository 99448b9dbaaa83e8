//! Supabase GoTrue client used by the relay.
//!
//! Only the two auth primitives LIPA needs are implemented: password signup
//! and password grant. Both authenticate with the project's service key.

use super::{error_message, AuthGateway, Authenticated, GatewayError, GatewaySession, GatewayUser};
use crate::APP_USER_AGENT;
use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use tracing::{debug, error, instrument};

#[derive(Clone)]
pub struct SupabaseGateway {
    http_client: reqwest::Client,
    api_url: String,
    service_key: SecretString,
}

impl std::fmt::Debug for SupabaseGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseGateway")
            .field("api_url", &self.api_url)
            .field("service_key", &"***")
            .finish()
    }
}

impl SupabaseGateway {
    /// Create a client for the project at `api_url` (e.g. `https://xyz.supabase.co`).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_url: impl Into<String>, service_key: SecretString) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            service_key,
        })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.api_url, path)
    }

    async fn post(&self, url: &str, body: &Value) -> Result<(StatusCode, Value), GatewayError> {
        let key = self.service_key.expose_secret();
        let response = self
            .http_client
            .post(url)
            .header("apikey", key)
            .bearer_auth(key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        // Error bodies are not always JSON; an unparseable one still carries a status.
        let payload = serde_json::from_str(&text).unwrap_or(Value::Null);

        Ok((status, payload))
    }
}

fn rejection(status: StatusCode, payload: &Value) -> GatewayError {
    let message =
        error_message(payload).unwrap_or_else(|| format!("Auth gateway returned {status}"));

    debug!(status = %status, "Auth gateway rejected request");

    GatewayError::Rejected(message)
}

fn parse_user(value: Value) -> Result<GatewayUser, GatewayError> {
    serde_json::from_value(value).map_err(|err| {
        error!("Failed to parse gateway user: {}", err);
        GatewayError::Malformed(err.to_string())
    })
}

#[async_trait]
impl AuthGateway for SupabaseGateway {
    #[instrument(skip(self, password, full_name))]
    async fn register(
        &self,
        email: &str,
        password: &SecretString,
        full_name: &str,
    ) -> Result<GatewayUser, GatewayError> {
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
            "data": {
                "full_name": full_name,
            }
        });

        let (status, mut payload) = self.post(&self.auth_url("signup"), &body).await?;

        if !status.is_success() {
            return Err(rejection(status, &payload));
        }

        // With email confirmation enabled the user object is the whole body;
        // with auto-confirm it is wrapped next to a session.
        let user = if payload.get("user").is_some_and(Value::is_object) {
            payload["user"].take()
        } else {
            payload
        };

        parse_user(user)
    }

    #[instrument(skip(self, password))]
    async fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Authenticated, GatewayError> {
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let (status, mut payload) = self
            .post(&self.auth_url("token?grant_type=password"), &body)
            .await?;

        if !status.is_success() {
            return Err(rejection(status, &payload));
        }

        let access_token = payload
            .get("access_token")
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| GatewayError::Malformed("missing access_token".to_string()))?;

        let user = payload
            .get_mut("user")
            .map(Value::take)
            .filter(Value::is_object)
            .ok_or_else(|| GatewayError::Malformed("missing user".to_string()))?;

        Ok(Authenticated {
            user: parse_user(user)?,
            session: GatewaySession { access_token },
        })
    }
}
