use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::Result;
use tracing::Level;

/// Parse the command line, initialize logging, and return the action to run.
///
/// # Errors
/// Returns an error if logging setup fails or required arguments are missing.
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    let verbosity_level = match matches.get_one::<u8>("verbosity").map_or(0, |&v| v) {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };

    telemetry::init(Some(verbosity_level))?;

    dispatch::handler(&matches)
}
