//! Forwarding to the protected origin.

use crate::APP_USER_AGENT;
use axum::{
    body::{Body, HttpBody},
    http::{header, HeaderMap, HeaderName, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use reqwest::{redirect::Policy, Client};
use std::{future::Future, time::Duration};
use tracing::{debug, warn};
use url::Url;

/// Hop-by-hop headers are meaningful for a single connection only.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// The "continue to origin" capability handed to the gate.
pub trait Origin: Clone + Send + Sync + 'static {
    /// Forward the request and return whatever the origin answered.
    fn forward(&self, request: Request<Body>) -> impl Future<Output = Response> + Send;
}

/// Reverse proxy to a single origin base URL.
#[derive(Debug, Clone)]
pub struct OriginProxy {
    client: Client,
    base: Url,
}

impl OriginProxy {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base })
    }

    /// Origin URL for an inbound request: base path + request path, request query.
    #[must_use]
    pub fn upstream_url(&self, uri: &Uri) -> Url {
        let mut url = self.base.clone();
        let base_path = self.base.path().trim_end_matches('/');
        url.set_path(&format!("{base_path}{}", uri.path()));
        url.set_query(uri.query());
        url
    }

    async fn proxy(&self, request: Request<Body>) -> Result<Response, reqwest::Error> {
        let (parts, body) = request.into_parts();
        let url = self.upstream_url(&parts.uri);

        let mut headers = parts.headers;
        strip_hop_by_hop(&mut headers);
        headers.remove(header::HOST);

        debug!(method = %parts.method, %url, "forwarding to origin");

        let mut upstream = self.client.request(parts.method, url).headers(headers);
        if !body.is_end_stream() {
            upstream = upstream.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }
        let upstream = upstream.send().await?;

        let status = upstream.status();
        let mut response_headers = upstream.headers().clone();
        strip_hop_by_hop(&mut response_headers);

        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;

        Ok(response)
    }
}

impl Origin for OriginProxy {
    async fn forward(&self, request: Request<Body>) -> Response {
        match self.proxy(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("origin request failed: {e}");
                (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response()
            }
        }
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    // Headers named in `Connection` are hop-by-hop too.
    let named: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in named.iter().chain(HOP_BY_HOP.iter()) {
        headers.remove(name);
    }
}
