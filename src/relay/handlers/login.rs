use super::{error_response, relay_fault, ErrorBody};
use crate::gateway::{AuthGateway, GatewayError};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Default)]
#[serde(default)]
pub struct UserLogin {
    email: String,
    #[schema(format = Password)]
    password: String,
}

impl std::fmt::Debug for UserLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserLogin")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[utoipa::path(
    post,
    path= "/api/auth/login",
    request_body = UserLogin,
    responses (
        (status = 200, description = "Credentials accepted: `{user, session: {access_token}}`", content_type = "application/json"),
        (status = 400, description = "Rejected by the auth gateway", body = ErrorBody),
        (status = 500, description = "Relay fault", body = ErrorBody),
    ),
    tag= "auth"
)]
// axum handler for login
#[instrument(skip(gateway, payload))]
pub async fn login(
    gateway: Extension<Arc<dyn AuthGateway>>,
    payload: Result<Json<UserLogin>, JsonRejection>,
) -> Response {
    let user = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            debug!("Unreadable login payload: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    debug!("user: {:?}", user);

    let password = SecretString::from(user.password);

    match gateway.authenticate(&user.email, &password).await {
        Ok(authenticated) => {
            info!("Login accepted by auth gateway");

            (StatusCode::OK, Json(authenticated)).into_response()
        }
        Err(GatewayError::Rejected(message)) => {
            debug!("Login rejected: {}", message);

            error_response(StatusCode::BAD_REQUEST, message)
        }
        Err(err) => {
            error!("Login relay fault: {}", err);

            relay_fault()
        }
    }
}
