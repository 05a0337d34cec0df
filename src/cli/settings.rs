use axum_extra::extract::cookie::SameSite;
use secrecy::SecretString;
use url::Url;

/// Process-wide configuration, resolved once at startup and read-only after.
///
/// The API key is held in a [`SecretString`] so accidental `Debug` output
/// stays redacted.
#[derive(Debug, Clone)]
pub struct Settings {
    pub appwrite_endpoint: Url,
    pub appwrite_project_id: String,
    pub appwrite_api_key: SecretString,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub cookie: CookiePolicy,
}

/// Attributes applied to every session cookie this service emits.
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub name: String,
    /// Seconds until the cookie expires. Default is 7 days.
    pub max_age: i64,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
}
