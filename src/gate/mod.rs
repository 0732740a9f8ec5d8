pub mod config;
pub mod cookie;
pub mod decision;
pub mod error;
pub mod handlers;
pub mod origin;
pub mod page;

pub use self::config::GateConfig;
pub use self::decision::{decide, Decision, GateRequest};
pub use self::error::ConfigError;
pub use self::origin::{Origin, OriginProxy};

use self::handlers::{gate, health, GateState};
use anyhow::Result;
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;

/// Served by the gate itself; still 500 while no password is configured.
pub const HEALTH_PATH: &str = "/.gate/health";

/// Build the gate router: health probe plus the catch-all gate.
pub fn router<O: Origin>(config: Arc<GateConfig>, origin: O) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health::<O>))
        .fallback(gate::<O>)
        .with_state(GateState { config, origin })
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span)),
        )
}

/// Serve the gate on `[::]:port` until SIGINT/SIGTERM.
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails
pub async fn new<O: Origin>(port: u16, config: Arc<GateConfig>, origin: O) -> Result<()> {
    let app = router(config, origin);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let method = request.method();
    let path = request.uri().path();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", %method, path, request_id)
}
