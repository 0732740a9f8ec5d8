use thiserror::Error;

/// Configuration problems that stop the gate from deciding anything.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("VPN_PASSWORD is not set")]
    MissingSecret,
    #[error("invalid origin url: {0}")]
    InvalidOrigin(String),
    #[error("bypass prefix must start with '/': {0}")]
    InvalidBypassPrefix(String),
}
