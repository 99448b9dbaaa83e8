//! Relay route handlers and the response shapes they share.

pub mod health;
pub mod login;
pub mod register;
pub mod root;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic message for relay-internal faults. Details stay in the logs.
pub const INTERNAL_ERROR: &str = "An internal error occurred.";

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

pub(crate) fn error_response(status: StatusCode, error: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorBody {
            error: error.into(),
        }),
    )
        .into_response()
}

pub(crate) fn relay_fault() -> axum::response::Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
}
