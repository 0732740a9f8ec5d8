use super::{
    config::GateConfig,
    cookie,
    decision::{decide, is_bypassed, is_login_submission, Decision, GateRequest, HOME_PATH},
    origin::Origin,
    page::LOGIN_PAGE,
};
use crate::git_commit_hash;
use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, Request, StatusCode,
    },
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Plaintext body returned while no password is configured.
pub const MISSING_SECRET_MESSAGE: &str = "Security Error: VPN_PASSWORD is not set.";

pub const INVALID_PASSWORD_MESSAGE: &str = "Invalid password";

/// Login forms are tiny; anything larger is not a login attempt.
const LOGIN_BODY_LIMIT: usize = 16 * 1024;

/// Shared, read-only state for the gate handler.
#[derive(Debug)]
pub struct GateState<O> {
    pub config: Arc<GateConfig>,
    pub origin: O,
}

impl<O: Clone> Clone for GateState<O> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            origin: self.origin.clone(),
        }
    }
}

/// Catch-all handler: every request goes through the access decision.
#[instrument(skip_all, fields(method = %request.method(), path = %request.uri().path()))]
pub async fn gate<O: Origin>(State(state): State<GateState<O>>, request: Request<Body>) -> Response {
    let mut gate_request = GateRequest {
        method: request.method().clone(),
        path: request.uri().path().to_string(),
        session: cookie::extract_session(request.headers()),
        password: None,
    };

    let request = if is_login_submission(&gate_request.method, &gate_request.path)
        && !is_bypassed(&gate_request.path, &state.config)
    {
        let (parts, body) = request.into_parts();
        let bytes = to_bytes(body, LOGIN_BODY_LIMIT).await.unwrap_or_else(|e| {
            debug!("unreadable login body: {e}");
            Default::default()
        });
        gate_request.password = form_password(&bytes);
        Request::from_parts(parts, Body::from(bytes))
    } else {
        request
    };

    let decision = decide(&gate_request, &state.config);
    debug!(?decision, "access decision");

    match decision {
        Decision::MissingSecret => missing_secret(),
        Decision::PassThrough => state.origin.forward(request).await,
        // Always clear the cookie, even without a session.
        Decision::Logout => match cookie::clear_session_cookie() {
            Ok(cookie) => {
                let mut headers = redirect_home();
                headers.insert(SET_COOKIE, cookie);
                (StatusCode::FOUND, headers, "Logged out").into_response()
            }
            Err(e) => {
                error!("failed to build logout cookie: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        Decision::LoginAccepted => match cookie::session_cookie() {
            Ok(cookie) => {
                info!("login accepted");
                let mut headers = redirect_home();
                headers.insert(SET_COOKIE, cookie);
                (StatusCode::FOUND, headers).into_response()
            }
            Err(e) => {
                error!("failed to build session cookie: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        Decision::LoginRejected => {
            info!("login rejected");
            (StatusCode::UNAUTHORIZED, INVALID_PASSWORD_MESSAGE).into_response()
        }
        Decision::LoginForm => (StatusCode::UNAUTHORIZED, Html(LOGIN_PAGE)).into_response(),
    }
}

/// `password` field of an urlencoded form body.
/// `multipart/form-data` is not parsed; the login page always posts urlencoded.
fn form_password(body: &[u8]) -> Option<String> {
    url::form_urlencoded::parse(body)
        .find(|(key, _)| key == "password")
        .map(|(_, value)| value.into_owned())
}

fn missing_secret() -> Response {
    error!("VPN_PASSWORD is not configured, refusing request");
    (StatusCode::INTERNAL_SERVER_ERROR, MISSING_SECRET_MESSAGE).into_response()
}

fn redirect_home() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(LOCATION, HeaderValue::from_static(HOME_PATH));
    headers
}

// axum handler for health; fails like every other path while no password is set
pub async fn health<O: Origin>(State(state): State<GateState<O>>) -> Response {
    if state.config.secret().is_none() {
        return missing_secret();
    }

    let commit = git_commit_hash();
    let body = Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "build": commit,
    }));

    let short_hash = if commit.len() > 7 { &commit[0..7] } else { commit };

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!(
        "{}:{}:{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_hash
    )) {
        headers.insert("X-App", value);
    }

    (headers, body).into_response()
}
