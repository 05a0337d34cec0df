pub mod handlers;
pub mod models;

use crate::{
    appwrite::{AccountProvider, AppwriteClient},
    cli::settings::Settings,
};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Method, Request},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::root,
        handlers::health::health,
        handlers::signup::signup,
        handlers::signin::signin,
        handlers::signout::signout,
    ),
    components(schemas(
        models::SignupRequest,
        models::SigninRequest,
        models::AuthResponse,
        models::UserRecord,
        models::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Signup, signin and signout against the Appwrite account API"),
        (name = "health", description = "Liveness endpoints")
    )
)]
struct ApiDoc;

/// Build the application router.
///
/// Settings and the provider ride along as extensions so handlers stay free
/// of construction logic and tests can inject doubles.
///
/// # Errors
/// Returns an error if a configured CORS origin is not a valid header value.
pub fn router(settings: Arc<Settings>, provider: Arc<dyn AccountProvider>) -> Result<Router> {
    let cors = cors_layer(&settings.cors_origins)?;

    let app = Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/signin", post(handlers::signin))
        .route("/auth/signout", post(handlers::signout))
        .route("/docs", get(openapi_json))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &Request<Body>| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(settings))
                .layer(Extension(provider)),
        );

    Ok(app)
}

/// Bind and serve until the process is stopped.
///
/// # Errors
/// Returns an error if the Appwrite client cannot be built or the listener
/// fails to bind.
pub async fn new(settings: Settings) -> Result<()> {
    let settings = Arc::new(settings);

    let provider: Arc<dyn AccountProvider> = Arc::new(
        AppwriteClient::new(&settings).context("Failed to build the Appwrite client")?,
    );

    let app = router(Arc::clone(&settings), provider)?;

    let listener = TcpListener::bind(format!("{}:{}", settings.host, settings.port)).await?;

    info!("Listening on {}:{}", settings.host, settings.port);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

// Serve the generated OpenAPI document; the root payload points here.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    // Credentials are allowed, so the wildcard is off the table for headers;
    // mirroring the request preserves the allow-anything contract.
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request()))
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, request_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_layer_accepts_configured_origins() {
        let origins = vec![
            "http://localhost:3000".to_string(),
            "https://app.transflow.dev".to_string(),
        ];
        assert!(cors_layer(&origins).is_ok());
    }

    #[test]
    fn cors_layer_rejects_garbage_origins() {
        let origins = vec!["http://\nbad".to_string()];
        assert!(cors_layer(&origins).is_err());
    }

    #[test]
    fn openapi_document_covers_auth_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/auth/signup"));
        assert!(paths.contains_key("/auth/signin"));
        assert!(paths.contains_key("/auth/signout"));
        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/"));
    }
}
