use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use metrics_exporter_prometheus::PrometheusHandle;

pub const HTTP_REQUESTS_TOTAL: &str = "pod_readiness_http_requests_total";

/// `GET /metrics`
pub async fn metrics_endpoint(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    let body = handle.render();
    ([("content-type", "text/plain; version=0.0.4")], body)
}

/// Count every routed request by method, route template and status.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;

    metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method,
        "path" => path,
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);

    response
}
