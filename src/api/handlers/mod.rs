pub mod health;

pub mod signup;
pub use self::signup::signup;

pub mod signin;
pub use self::signin::signin;

pub mod signout;
pub use self::signout::signout;

// common functions for the handlers
use crate::api::models::{AuthResponse, ErrorResponse};
use crate::cli::settings::CookiePolicy;
use axum::{http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use regex::Regex;
use std::sync::LazyLock;
use time::Duration;

/// Handler result: success carries the cookie jar so `Set-Cookie` headers
/// land on the response; failure is a status plus the single-message body.
pub type AuthResult =
    Result<(StatusCode, CookieJar, Json<AuthResponse>), (StatusCode, Json<ErrorResponse>)>;

// Compiled once; the pattern is a literal, so a failure here is a bug.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub(crate) fn error_response(
    status: StatusCode,
    detail: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
}

/// Session cookie carrying the provider-issued secret.
pub fn session_cookie(policy: &CookiePolicy, secret: String) -> Cookie<'static> {
    Cookie::build((policy.name.clone(), secret))
        .path("/")
        .max_age(Duration::seconds(policy.max_age))
        .http_only(policy.http_only)
        .secure(policy.secure)
        .same_site(policy.same_site)
        .build()
}

/// Expired twin of the session cookie, used to clear it on signout.
pub fn removal_cookie(policy: &CookiePolicy) -> Cookie<'static> {
    let mut cookie = Cookie::build((policy.name.clone(), ""))
        .path("/")
        .http_only(policy.http_only)
        .secure(policy.secure)
        .same_site(policy.same_site)
        .build();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::SameSite;

    fn policy() -> CookiePolicy {
        CookiePolicy {
            name: "transflow_session".to_string(),
            max_age: 604_800,
            http_only: true,
            secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[test]
    fn test_valid_email() {
        assert!(valid_email("user@example.com"));
        assert!(valid_email("a@b.co"));
        assert!(!valid_email("user@example"));
        assert!(!valid_email("userexample.com"));
        assert!(!valid_email("user @example.com"));
        assert!(!valid_email(""));
    }

    #[test]
    fn session_cookie_applies_policy() {
        let cookie = session_cookie(&policy(), "secret-token".to_string());
        let rendered = cookie.to_string();

        assert!(rendered.starts_with("transflow_session=secret-token"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=604800"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn session_cookie_honors_secure_and_samesite() {
        let mut policy = policy();
        policy.secure = true;
        policy.same_site = SameSite::Strict;

        let rendered = session_cookie(&policy, "secret".to_string()).to_string();
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=Strict"));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let cookie = removal_cookie(&policy());
        let rendered = cookie.to_string();

        assert!(rendered.starts_with("transflow_session="));
        assert!(rendered.contains("Max-Age=0"));
    }
}
