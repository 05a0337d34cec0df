use crate::api::handlers::removal_cookie;
use crate::api::models::AuthResponse;
use crate::cli::settings::Settings;
use axum::{extract::Extension, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/auth/signout",
    responses(
        (status = 200, description = "Session cookie cleared", body = AuthResponse),
    ),
    tag = "auth",
)]
/// Clear the session cookie.
///
/// The provider-side session is left alive: nothing reads the inbound cookie
/// and no delete-session call is made, so only the browser forgets the
/// secret. Idempotent by construction.
// TODO: read the session secret from the request cookie and call
// `AccountProvider::delete_current_session` before clearing, so signout also
// invalidates the session at the provider.
#[instrument(skip_all)]
pub async fn signout(
    Extension(settings): Extension<Arc<Settings>>,
    jar: CookieJar,
) -> (StatusCode, CookieJar, Json<AuthResponse>) {
    let jar = jar.add(removal_cookie(&settings.cookie));

    (
        StatusCode::OK,
        jar,
        Json(AuthResponse {
            message: "User signed out successfully".to_string(),
            user: None,
        }),
    )
}
