use crate::api::handlers::{error_response, session_cookie, AuthResult};
use crate::api::models::{AuthResponse, ErrorResponse, SigninRequest, UserRecord};
use crate::appwrite::AccountProvider;
use crate::cli::settings::Settings;
use axum::{extract::Extension, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use std::sync::Arc;
use tracing::{debug, error, instrument};

#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "User signed in", body = AuthResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse),
    ),
    tag = "auth",
)]
/// Authenticate with email and password, creating a session.
///
/// Session creation does not return account fields, so a second call fetches
/// the account using the fresh session secret before responding.
#[instrument(skip_all)]
pub async fn signin(
    Extension(settings): Extension<Arc<Settings>>,
    Extension(provider): Extension<Arc<dyn AccountProvider>>,
    jar: CookieJar,
    payload: Option<Json<SigninRequest>>,
) -> AuthResult {
    let Some(Json(request)) = payload else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Missing or malformed JSON payload",
        ));
    };

    if let Err(violations) = request.validate() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            violations.join(", "),
        ));
    }

    let session = provider
        .create_email_session(&request.email, &request.password)
        .await
        .map_err(|err| {
            if err.is_invalid_credentials() {
                error_response(StatusCode::UNAUTHORIZED, "Invalid email or password")
            } else {
                error!("Session creation failed: {err}");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to sign in: {err}"),
                )
            }
        })?;

    // An auth-shaped failure here gets the same 401 as a rejected password;
    // the caller cannot tell which of the two calls the provider refused.
    let account = provider
        .get_account(&session.secret)
        .await
        .map_err(|err| {
            if err.is_invalid_credentials() {
                error_response(StatusCode::UNAUTHORIZED, "Invalid email or password")
            } else {
                error!("Account lookup after signin failed: {err}");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to sign in: {err}"),
                )
            }
        })?;

    debug!("Signed in account {}", account.id);

    let jar = jar.add(session_cookie(&settings.cookie, session.secret));

    Ok((
        StatusCode::OK,
        jar,
        Json(AuthResponse {
            message: "User signed in successfully".to_string(),
            user: Some(UserRecord::from(account)),
        }),
    ))
}
