use crate::cli::{
    actions::{server, Action},
    settings::{CookiePolicy, Settings},
};
use anyhow::{Context, Result};
use axum_extra::extract::cookie::SameSite;
use secrecy::SecretString;
use url::Url;

/// Turn parsed arguments into a validated [`Settings`] and the action to run.
///
/// # Errors
/// Returns an error if required arguments are missing or malformed.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let endpoint = matches
        .get_one::<String>("appwrite-endpoint")
        .cloned()
        .context("missing required argument: --appwrite-endpoint")?;
    let appwrite_endpoint = Url::parse(&endpoint).context("invalid APPWRITE_ENDPOINT")?;

    let appwrite_project_id = matches
        .get_one::<String>("appwrite-project-id")
        .cloned()
        .context("missing required argument: --appwrite-project-id")?;

    let appwrite_api_key = matches
        .get_one::<String>("appwrite-api-key")
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --appwrite-api-key")?;

    let host = matches
        .get_one::<String>("host")
        .cloned()
        .unwrap_or_else(|| "0.0.0.0".to_string());
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8000);

    let cors_origins = parse_origins(
        matches
            .get_one::<String>("cors-origins")
            .map_or("http://localhost:3000", String::as_str),
    );

    let same_site = parse_same_site(
        matches
            .get_one::<String>("cookie-samesite")
            .map_or("lax", String::as_str),
    )?;

    let cookie = CookiePolicy {
        name: matches
            .get_one::<String>("cookie-name")
            .cloned()
            .unwrap_or_else(|| "transflow_session".to_string()),
        max_age: matches
            .get_one::<i64>("cookie-max-age")
            .copied()
            .unwrap_or(604_800),
        http_only: matches
            .get_one::<bool>("cookie-httponly")
            .copied()
            .unwrap_or(true),
        secure: matches
            .get_one::<bool>("cookie-secure")
            .copied()
            .unwrap_or(false),
        same_site,
    };

    Ok(Action::Server(server::Args {
        settings: Settings {
            appwrite_endpoint,
            appwrite_project_id,
            appwrite_api_key,
            host,
            port,
            cors_origins,
            cookie,
        },
    }))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_same_site(raw: &str) -> Result<SameSite> {
    match raw.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" => Ok(SameSite::None),
        other => anyhow::bail!("invalid SESSION_COOKIE_SAMESITE: {other}"),
    }
}
