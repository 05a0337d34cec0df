use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("transflow")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("appwrite-endpoint")
                .long("appwrite-endpoint")
                .help("Appwrite API endpoint URL")
                .env("APPWRITE_ENDPOINT")
                .required(true),
        )
        .arg(
            Arg::new("appwrite-project-id")
                .long("appwrite-project-id")
                .help("Appwrite project identifier")
                .env("APPWRITE_PROJECT_ID")
                .required(true),
        )
        .arg(
            Arg::new("appwrite-api-key")
                .long("appwrite-api-key")
                .help("Appwrite API key with account scope")
                .env("APPWRITE_API_KEY")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .help("Address to bind to")
                .default_value("0.0.0.0")
                .env("API_HOST"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8000")
                .env("API_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("cors-origins")
                .long("cors-origins")
                .help("Comma-separated list of allowed CORS origins")
                .default_value("http://localhost:3000")
                .env("CORS_ORIGINS"),
        )
        .arg(
            Arg::new("cookie-name")
                .long("cookie-name")
                .help("Session cookie name")
                .default_value("transflow_session")
                .env("SESSION_COOKIE_NAME"),
        )
        .arg(
            Arg::new("cookie-max-age")
                .long("cookie-max-age")
                .help("Session cookie max age in seconds")
                .default_value("604800")
                .env("SESSION_COOKIE_MAX_AGE")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new("cookie-httponly")
                .long("cookie-httponly")
                .help("Mark the session cookie HttpOnly")
                .default_value("true")
                .env("SESSION_COOKIE_HTTPONLY")
                .value_parser(clap::value_parser!(bool)),
        )
        .arg(
            Arg::new("cookie-secure")
                .long("cookie-secure")
                .help("Mark the session cookie Secure")
                .default_value("false")
                .env("SESSION_COOKIE_SECURE")
                .value_parser(clap::value_parser!(bool)),
        )
        .arg(
            Arg::new("cookie-samesite")
                .long("cookie-samesite")
                .help("Session cookie SameSite policy: lax, strict or none")
                .default_value("lax")
                .env("SESSION_COOKIE_SAMESITE"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .action(ArgAction::Count),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "transflow");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_flags_and_defaults() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "transflow",
            "--appwrite-endpoint",
            "https://cloud.appwrite.io/v1",
            "--appwrite-project-id",
            "transflow",
            "--appwrite-api-key",
            "standard_abc123",
        ]);

        assert_eq!(
            matches.get_one::<String>("appwrite-endpoint").cloned(),
            Some("https://cloud.appwrite.io/v1".to_string())
        );
        assert_eq!(
            matches.get_one::<String>("appwrite-project-id").cloned(),
            Some("transflow".to_string())
        );
        assert_eq!(matches.get_one::<u16>("port").copied(), Some(8000));
        assert_eq!(
            matches.get_one::<String>("host").cloned(),
            Some("0.0.0.0".to_string())
        );
        assert_eq!(
            matches.get_one::<String>("cors-origins").cloned(),
            Some("http://localhost:3000".to_string())
        );
        assert_eq!(
            matches.get_one::<String>("cookie-name").cloned(),
            Some("transflow_session".to_string())
        );
        assert_eq!(
            matches.get_one::<i64>("cookie-max-age").copied(),
            Some(604_800)
        );
        assert_eq!(
            matches.get_one::<bool>("cookie-httponly").copied(),
            Some(true)
        );
        assert_eq!(
            matches.get_one::<bool>("cookie-secure").copied(),
            Some(false)
        );
        assert_eq!(
            matches.get_one::<String>("cookie-samesite").cloned(),
            Some("lax".to_string())
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("APPWRITE_ENDPOINT", Some("https://appwrite.internal/v1")),
                ("APPWRITE_PROJECT_ID", Some("transflow-prod")),
                ("APPWRITE_API_KEY", Some("standard_env_key")),
                ("API_HOST", Some("127.0.0.1")),
                ("API_PORT", Some("9000")),
                ("CORS_ORIGINS", Some("https://app.transflow.dev")),
                ("SESSION_COOKIE_NAME", Some("tf_session")),
                ("SESSION_COOKIE_SECURE", Some("true")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["transflow"]);

                assert_eq!(
                    matches.get_one::<String>("appwrite-endpoint").cloned(),
                    Some("https://appwrite.internal/v1".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>("appwrite-project-id").cloned(),
                    Some("transflow-prod".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>("appwrite-api-key").cloned(),
                    Some("standard_env_key".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>("host").cloned(),
                    Some("127.0.0.1".to_string())
                );
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(9000));
                assert_eq!(
                    matches.get_one::<String>("cors-origins").cloned(),
                    Some("https://app.transflow.dev".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>("cookie-name").cloned(),
                    Some("tf_session".to_string())
                );
                assert_eq!(
                    matches.get_one::<bool>("cookie-secure").copied(),
                    Some(true)
                );
            },
        );
    }

    #[test]
    fn test_missing_required_args() {
        let command = new();
        let result = command.try_get_matches_from(vec!["transflow"]);
        assert!(result.is_err());
    }
}
