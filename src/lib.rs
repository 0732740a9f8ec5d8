//! # Portal Gate
//!
//! `portal-gate` is a small reverse proxy that puts a single shared password in
//! front of a private web portal. Every request is evaluated by the access gate:
//!
//! 1. If no password is configured, the request fails with `500`.
//! 2. Static assets (by extension) and the reserved prefix go straight to the origin.
//! 3. `/logout` clears the session cookie and redirects to `/`.
//! 4. `POST /login` checks the submitted password and, on a match, sets the
//!    session cookie and redirects to `/`.
//! 5. Requests carrying `vpn_portal_auth=true` are forwarded to the origin.
//! 6. Everything else gets the login form.
//!
//! ## Session cookie
//!
//! The session is the cookie itself (`vpn_portal_auth=true`). There is no
//! server-side session store and the value is not signed, so anyone able to
//! set cookies for the site can forge it. This gate is meant for low-stakes
//! protection only.

pub mod cli;
pub mod gate;

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// Commit the binary was built from, or `unknown` outside a git checkout.
#[must_use]
pub fn git_commit_hash() -> &'static str {
    built_info::GIT_COMMIT_HASH.unwrap_or("unknown")
}

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
