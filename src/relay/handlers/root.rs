use axum::Json;

pub async fn root() -> String {
    format!(
        "{} {} - payment links relay",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::relay::openapi())
}
