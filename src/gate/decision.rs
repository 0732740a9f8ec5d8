//! The access decision.
//!
//! A pure function over the parts of a request the gate cares about. Nothing
//! here touches the network, so every branch is testable without a server.

use super::{
    config::{GateConfig, WHITELISTED_EXTENSIONS},
    cookie,
};
use axum::http::Method;

pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
pub const HOME_PATH: &str = "/";

/// What the gate knows about an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateRequest {
    pub method: Method,
    pub path: String,
    /// Raw value of the session cookie, if present.
    pub session: Option<String>,
    /// Submitted password; only read for login submissions.
    pub password: Option<String>,
}

/// Outcome of evaluating a request. Exactly one per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// No secret configured (500).
    MissingSecret,
    /// Forward to the origin untouched.
    PassThrough,
    /// Clear the session and redirect home.
    Logout,
    /// Password matched: set the session and redirect home.
    LoginAccepted,
    /// Password did not match (401, plaintext).
    LoginRejected,
    /// No valid session: render the login form (401, HTML).
    LoginForm,
}

/// Whether the request is a login form submission, the only case that needs the body.
#[must_use]
pub fn is_login_submission(method: &Method, path: &str) -> bool {
    *method == Method::POST && path == LOGIN_PATH
}

/// Static assets and the reserved prefix skip the session check.
/// This looks at the path only, not at what the origin actually serves.
#[must_use]
pub fn is_bypassed(path: &str, config: &GateConfig) -> bool {
    WHITELISTED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        || path.starts_with(config.bypass_prefix())
}

/// Evaluate a request, first match wins.
#[must_use]
pub fn decide(request: &GateRequest, config: &GateConfig) -> Decision {
    let Some(secret) = config.secret() else {
        return Decision::MissingSecret;
    };

    if is_bypassed(&request.path, config) {
        return Decision::PassThrough;
    }

    if request.path == LOGOUT_PATH {
        return Decision::Logout;
    }

    if is_login_submission(&request.method, &request.path) {
        return if request.password.as_deref() == Some(secret) {
            Decision::LoginAccepted
        } else {
            Decision::LoginRejected
        };
    }

    if cookie::is_authorized(request.session.as_deref()) {
        return Decision::PassThrough;
    }

    Decision::LoginForm
}
