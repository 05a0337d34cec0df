use crate::{api, cli::settings::Settings};
use anyhow::Result;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub settings: Settings,
}

/// Execute the server action.
///
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_settings(&args.settings);

    api::new(args.settings).await
}

// The API key is intentionally absent here; secrets never reach the logs.
fn log_startup_settings(settings: &Settings) {
    let entries = [
        ("listen", format!("{}:{}", settings.host, settings.port)),
        (
            "appwrite_endpoint",
            settings.appwrite_endpoint.to_string(),
        ),
        (
            "appwrite_project_id",
            settings.appwrite_project_id.clone(),
        ),
        ("cors_origins", settings.cors_origins.join(",")),
        ("cookie_name", settings.cookie.name.clone()),
        ("cookie_max_age", settings.cookie.max_age.to_string()),
        ("cookie_httponly", settings.cookie.http_only.to_string()),
        ("cookie_secure", settings.cookie.secure.to_string()),
        (
            "cookie_samesite",
            format!("{:?}", settings.cookie.same_site).to_lowercase(),
        ),
    ];

    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = String::from("Startup configuration:");
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ = std::fmt::Write::write_fmt(
            &mut message,
            format_args!("\n  {key}:{padding} {value}"),
        );
    }

    info!("{message}");
}
