use axum::{
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Json},
};
use serde_json::json;
use tracing::debug;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API status and version information")
    ),
    tag = "health",
)]
// axum handler for the root status endpoint
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "Transflow Backend API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/docs",
    }))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health status")
    ),
    tag = "health",
)]
// axum handler for health
pub async fn health() -> impl IntoResponse {
    let body = Json(json!({"status": "healthy"}));

    let headers = format!("{}:{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        .parse::<HeaderValue>()
        .map(|x_app_header_value| {
            let mut headers = HeaderMap::new();
            headers.insert("X-App", x_app_header_value);
            headers
        })
        .map_err(|err| {
            debug!("Failed to parse X-App header: {}", err);
        })
        .unwrap_or_else(|()| HeaderMap::new());

    (headers, body)
}
