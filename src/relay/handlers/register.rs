use super::{error_response, relay_fault, ErrorBody};
use crate::gateway::{AuthGateway, GatewayError, GatewayUser};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

pub const CONFIRMATION_MESSAGE: &str =
    "User created successfully. Please check your email to confirm.";

// Fields default to empty: the relay forwards whatever it got and lets the
// gateway decide what is acceptable.
#[derive(ToSchema, Deserialize, Default)]
#[serde(default)]
pub struct UserRegister {
    name: String,
    email: String,
    #[schema(format = Password)]
    password: String,
}

impl std::fmt::Debug for UserRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRegister")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Debug)]
pub struct Registered {
    message: String,
    #[schema(value_type = Object)]
    user: GatewayUser,
}

#[utoipa::path(
    post,
    path= "/api/auth/register",
    request_body = UserRegister,
    responses (
        (status = 201, description = "Account created, confirmation email sent", body = Registered, content_type = "application/json"),
        (status = 400, description = "Rejected by the auth gateway", body = ErrorBody),
        (status = 500, description = "Relay fault", body = ErrorBody),
    ),
    tag= "auth"
)]
// axum handler for register
#[instrument(skip(gateway, payload))]
pub async fn register(
    gateway: Extension<Arc<dyn AuthGateway>>,
    payload: Result<Json<UserRegister>, JsonRejection>,
) -> Response {
    let user = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            debug!("Unreadable registration payload: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    debug!("user: {:?}", user);

    let password = SecretString::from(user.password);

    match gateway.register(&user.email, &password, &user.name).await {
        Ok(created) => {
            info!("Registration accepted by auth gateway");

            (
                StatusCode::CREATED,
                Json(Registered {
                    message: CONFIRMATION_MESSAGE.to_string(),
                    user: created,
                }),
            )
                .into_response()
        }
        Err(GatewayError::Rejected(message)) => {
            debug!("Registration rejected: {}", message);

            error_response(StatusCode::BAD_REQUEST, message)
        }
        Err(err) => {
            error!("Registration relay fault: {}", err);

            relay_fault()
        }
    }
}
