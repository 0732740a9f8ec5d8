use super::error::ConfigError;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Path prefix that skips the gate unless configured otherwise.
pub const DEFAULT_BYPASS_PREFIX: &str = "/.netlify";

/// Extensions served without a session.
pub const WHITELISTED_EXTENSIONS: [&str; 6] = [".css", ".js", ".png", ".svg", ".ico", ".jpg"];

/// Read-only gate settings shared by every request.
#[derive(Debug, Clone)]
pub struct GateConfig {
    secret: SecretString,
    bypass_prefix: String,
}

impl GateConfig {
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            bypass_prefix: DEFAULT_BYPASS_PREFIX.to_string(),
        }
    }

    #[must_use]
    pub fn with_bypass_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.bypass_prefix = prefix.into();
        self
    }

    /// The configured secret, or `None` when it is empty.
    pub(crate) fn secret(&self) -> Option<&str> {
        let secret = self.secret.expose_secret();
        if secret.is_empty() {
            None
        } else {
            Some(secret)
        }
    }

    #[must_use]
    pub fn bypass_prefix(&self) -> &str {
        &self.bypass_prefix
    }

    /// Check the settings once, before any request is served.
    /// # Errors
    /// Returns an error if the secret is empty or the bypass prefix is not an absolute path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret().is_none() {
            return Err(ConfigError::MissingSecret);
        }

        if !self.bypass_prefix.starts_with('/') {
            return Err(ConfigError::InvalidBypassPrefix(self.bypass_prefix.clone()));
        }

        Ok(())
    }
}

/// Parse and check the origin base URL.
/// # Errors
/// Returns an error unless the value is an absolute `http` or `https` URL.
pub fn parse_origin(origin: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(origin).map_err(|e| ConfigError::InvalidOrigin(format!("{origin}: {e}")))?;

    if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() {
        Ok(url)
    } else {
        Err(ConfigError::InvalidOrigin(origin.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_is_missing() {
        let config = GateConfig::new(SecretString::default());
        assert!(config.secret().is_none());
        assert_eq!(config.validate(), Err(ConfigError::MissingSecret));
    }

    #[test]
    fn test_validate_ok() {
        let config = GateConfig::new(SecretString::from("hunter2"));
        assert_eq!(config.secret(), Some("hunter2"));
        assert_eq!(config.bypass_prefix(), DEFAULT_BYPASS_PREFIX);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bypass_prefix() {
        let config = GateConfig::new(SecretString::from("hunter2")).with_bypass_prefix("assets");
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidBypassPrefix("assets".to_string()))
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = GateConfig::new(SecretString::from("hunter2"));
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn test_parse_origin() {
        assert!(parse_origin("http://127.0.0.1:3000").is_ok());
        assert!(parse_origin("https://portal.internal/base/").is_ok());
        assert!(parse_origin("ftp://portal.internal").is_err());
        assert!(parse_origin("portal.internal").is_err());
        assert!(parse_origin("").is_err());
    }
}
