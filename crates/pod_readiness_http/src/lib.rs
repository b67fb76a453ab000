//! HTTP surface for [`pod_readiness`].
//!
//! [`router`] exposes the liveness and readiness endpoints over a
//! [`ReadinessStore`]; [`app`] adds the host concerns (metrics, body limit,
//! request timeout) used by the `pod-readiness` binary.

use std::future::Future;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use pod_readiness::ReadinessStore;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod shutdown;

pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use handlers::{ReadinessBody, ReadinessQuery};

/// Readiness routes only, with the store injected as state.
pub fn router(store: ReadinessStore) -> Router {
    Router::new()
        .route("/healthy", get(handlers::healthy))
        .route(
            "/pod/readiness",
            get(handlers::get_readiness).patch(handlers::patch_readiness),
        )
        .with_state(store)
}

/// Full application: readiness routes plus `/metrics` and host layers.
pub fn app(store: ReadinessStore, metrics_handle: PrometheusHandle, config: &Config) -> Router {
    router(store)
        .route(
            "/metrics",
            get(observability::metrics_endpoint).with_state(metrics_handle),
        )
        .layer(middleware::from_fn(observability::track_requests))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(request_timeout(config))
}

/// Requests running longer than `config.request_timeout` get a 408.
pub fn request_timeout(config: &Config) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.request_timeout)
}

/// Serve `app` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
}
