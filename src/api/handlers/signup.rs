use crate::api::handlers::{error_response, session_cookie, AuthResult};
use crate::api::models::{AuthResponse, ErrorResponse, SignupRequest, UserRecord};
use crate::appwrite::AccountProvider;
use crate::cli::settings::Settings;
use axum::{extract::Extension, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use std::sync::Arc;
use tracing::{debug, error, instrument};
use ulid::Ulid;

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created and signed in", body = AuthResponse),
        (status = 400, description = "Validation failure or duplicate account", body = ErrorResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse),
    ),
    tag = "auth",
)]
/// Register a new account and sign it in.
///
/// Creates the account under a fresh unique id, then opens an email session
/// for the same credentials and sets the session cookie. If session creation
/// fails the account stays created with no session; there is no rollback.
#[instrument(skip_all)]
pub async fn signup(
    Extension(settings): Extension<Arc<Settings>>,
    Extension(provider): Extension<Arc<dyn AccountProvider>>,
    jar: CookieJar,
    payload: Option<Json<SignupRequest>>,
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

    let user_id = Ulid::new().to_string().to_lowercase();

    let account = provider
        .create_account(&user_id, &request.email, &request.password, &request.name)
        .await
        .map_err(|err| {
            if err.is_user_exists() {
                error_response(
                    StatusCode::BAD_REQUEST,
                    "A user with this email already exists",
                )
            } else {
                error!("Account creation failed: {err}");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to create user: {err}"),
                )
            }
        })?;

    // The account above stays created if this call fails; known gap.
    let session = provider
        .create_email_session(&request.email, &request.password)
        .await
        .map_err(|err| {
            error!("Session creation after signup failed: {err}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create user: {err}"),
            )
        })?;

    debug!("Created account {}", account.id);

    let jar = jar.add(session_cookie(&settings.cookie, session.secret));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse {
            message: "User created and signed in successfully".to_string(),
            user: Some(UserRecord::from(account)),
        }),
    ))
}
