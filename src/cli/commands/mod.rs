use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("portal-gate")
        .about("Password gate in front of a private web portal")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("PORTAL_GATE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("origin")
                .short('o')
                .long("origin")
                .help("Base URL of the protected site, example: http://127.0.0.1:3000")
                .env("PORTAL_GATE_ORIGIN")
                .required(true),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .help("Shared password that unlocks the portal")
                .env("VPN_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new("bypass-prefix")
                .long("bypass-prefix")
                .help("Path prefix forwarded without a session")
                .default_value(crate::gate::config::DEFAULT_BYPASS_PREFIX)
                .env("PORTAL_GATE_BYPASS_PREFIX"),
        )
        .arg(
            Arg::new("origin-timeout")
                .long("origin-timeout")
                .help("Timeout in seconds for requests to the origin")
                .default_value("30")
                .env("PORTAL_GATE_ORIGIN_TIMEOUT")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("PORTAL_GATE_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "portal-gate");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Password gate in front of a private web portal"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_args() {
        temp_env::with_vars(
            [
                ("VPN_PASSWORD", None::<&str>),
                ("PORTAL_GATE_BYPASS_PREFIX", None),
                ("PORTAL_GATE_ORIGIN_TIMEOUT", None),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec![
                    "portal-gate",
                    "--port",
                    "9090",
                    "--origin",
                    "http://127.0.0.1:3000",
                    "--password",
                    "hunter2",
                ]);

                assert_eq!(matches.get_one::<u16>("port").copied(), Some(9090));
                assert_eq!(
                    matches.get_one::<String>("origin").map(String::as_str),
                    Some("http://127.0.0.1:3000")
                );
                assert_eq!(
                    matches.get_one::<String>("password").map(String::as_str),
                    Some("hunter2")
                );
                assert_eq!(
                    matches.get_one::<String>("bypass-prefix").map(String::as_str),
                    Some("/.netlify")
                );
                assert_eq!(matches.get_one::<u64>("origin-timeout").copied(), Some(30));
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("PORTAL_GATE_PORT", Some("443")),
                ("PORTAL_GATE_ORIGIN", Some("https://portal.internal")),
                ("VPN_PASSWORD", Some("from-env")),
                ("PORTAL_GATE_BYPASS_PREFIX", Some("/_static")),
                ("PORTAL_GATE_ORIGIN_TIMEOUT", Some("5")),
                ("PORTAL_GATE_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["portal-gate"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>("origin").map(String::as_str),
                    Some("https://portal.internal")
                );
                assert_eq!(
                    matches.get_one::<String>("password").map(String::as_str),
                    Some("from-env")
                );
                assert_eq!(
                    matches.get_one::<String>("bypass-prefix").map(String::as_str),
                    Some("/_static")
                );
                assert_eq!(matches.get_one::<u64>("origin-timeout").copied(), Some(5));
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_missing_origin() {
        temp_env::with_vars([("PORTAL_GATE_ORIGIN", None::<&str>)], || {
            let result = new().try_get_matches_from(vec!["portal-gate", "--password", "x"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_password_optional_at_parse_time() {
        temp_env::with_vars([("VPN_PASSWORD", None::<&str>)], || {
            let matches = new()
                .try_get_matches_from(vec!["portal-gate", "--origin", "http://origin"])
                .unwrap();
            assert!(matches.get_one::<String>("password").is_none());
        });
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = new().try_get_matches_from(vec![
            "portal-gate",
            "--origin",
            "http://origin",
            "--origin-timeout",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("PORTAL_GATE_LOG_LEVEL", Some(level)),
                    ("PORTAL_GATE_ORIGIN", Some("http://127.0.0.1:3000")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["portal-gate"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").copied(),
                        Some(index as u8)
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("PORTAL_GATE_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "portal-gate".to_string(),
                    "--origin".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();

                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    Some(index as u8)
                );
            });
        }
    }
}
