use crate::cli::actions::{server::Args, Action};
use crate::gate::config::{parse_origin, DEFAULT_BYPASS_PREFIX};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::time::Duration;

/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let origin = matches
        .get_one::<String>("origin")
        .context("missing required argument: --origin")?;
    let origin = parse_origin(origin).context("invalid PORTAL_GATE_ORIGIN")?;

    let password = SecretString::from(
        matches
            .get_one::<String>("password")
            .cloned()
            .unwrap_or_default(),
    );

    let bypass_prefix = matches
        .get_one::<String>("bypass-prefix")
        .cloned()
        .unwrap_or_else(|| DEFAULT_BYPASS_PREFIX.to_string());

    let origin_timeout = Duration::from_secs(
        matches
            .get_one::<u64>("origin-timeout")
            .copied()
            .unwrap_or(30),
    );

    let args = Args {
        port,
        origin,
        password,
        bypass_prefix,
        origin_timeout,
    };

    // Refuse to start rather than answer every request with 500.
    args.gate_config()
        .validate()
        .context("invalid gate configuration")?;

    Ok(Action::Server(args))
}
