//! Session cookie handling.
//!
//! The cookie carries a fixed sentinel value; only an exact `true` counts as a session.

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};

pub const SESSION_COOKIE_NAME: &str = "vpn_portal_auth";
pub const SESSION_COOKIE_VALUE: &str = "true";

/// One week.
pub const SESSION_MAX_AGE_SECONDS: u64 = 60 * 60 * 24 * 7;

/// Build the `Set-Cookie` value issued after a successful login.
/// # Errors
/// Returns an error if the cookie is not a valid header value.
pub fn session_cookie() -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={SESSION_COOKIE_VALUE}; Path=/; HttpOnly; Secure; SameSite=Strict; Max-Age={SESSION_MAX_AGE_SECONDS}"
    ))
}

/// Build the `Set-Cookie` value that removes the session.
/// # Errors
/// Returns an error if the cookie is not a valid header value.
pub fn clear_session_cookie() -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; Secure; SameSite=Strict; Max-Age=0"
    ))
}

/// Value of the session cookie, if the client sent one.
/// When the name appears more than once, the last occurrence wins.
#[must_use]
pub fn extract_session(headers: &HeaderMap) -> Option<String> {
    let mut session = None;
    // Browsers may send several Cookie headers over HTTP/2.
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            let Some(key) = parts.next() else {
                continue;
            };
            if key.trim() == SESSION_COOKIE_NAME {
                session = Some(parts.next().unwrap_or_default().trim().to_string());
            }
        }
    }
    session
}

/// Whether the cookie value grants access.
#[must_use]
pub fn is_authorized(session: Option<&str>) -> bool {
    session == Some(SESSION_COOKIE_VALUE)
}
