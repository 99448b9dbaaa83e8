//! HTTP client for the relay's auth routes. Keeps request setup in one place
//! so the session store never builds URLs or bodies itself. Nothing here logs
//! passwords or tokens.

use crate::gateway::{error_message, Authenticated};
use crate::APP_USER_AGENT;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success status; `message` is the server's `{error}` when present.
    #[error("request rejected ({status})")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Registered {
    pub message: String,
    #[serde(default)]
    pub user: Value,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<reqwest::Response, ApiError> {
        let response = self.http_client.post(self.url(path)).json(body).send().await?;

        let status = response.status();
        debug!(status = %status, path, "Relay responded");

        if status.is_success() {
            return Ok(response);
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);

        Err(ApiError::Rejected {
            status,
            message: error_message(&body),
        })
    }

    /// `POST /api/auth/login`
    ///
    /// # Errors
    /// `Rejected` on any non-success status, `Transport` when the relay cannot
    /// be reached, `Malformed` when a success body is not `{user, session}`.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Authenticated, ApiError> {
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        self.post("/api/auth/login", &body)
            .await?
            .json()
            .await
            .map_err(|err| ApiError::Malformed(err.to_string()))
    }

    /// `POST /api/auth/register`
    ///
    /// # Errors
    /// Same as [`ApiClient::login`].
    #[instrument(skip(self, name, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<Registered, ApiError> {
        let body = json!({
            "name": name,
            "email": email,
            "password": password.expose_secret(),
        });

        self.post("/api/auth/register", &body)
            .await?
            .json()
            .await
            .map_err(|err| ApiError::Malformed(err.to_string()))
    }
}
