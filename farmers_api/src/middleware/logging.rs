//! Request logging middleware configuration

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::trace::TraceLayer;
use tracing::info_span;
use uuid::Uuid;

/// Wraps `router` in a `TraceLayer` that emits one event per completed request:
/// method and path on the span, status and latency on the event.
pub fn with_request_logging<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<Body>| {
                info_span!(
                    "http_request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    path = %request.uri().path(),
                    query = ?request.uri().query(),
                )
            })
            .on_request(())
            .on_response(|response: &Response<Body>, latency: Duration, _span: &tracing::Span| {
                let status = response.status().as_u16();
                let latency_ms = latency.as_millis();

                if response.status().is_server_error() {
                    tracing::error!(status, latency_ms, "request completed");
                } else if response.status().is_client_error() {
                    tracing::warn!(status, latency_ms, "request completed");
                } else {
                    tracing::info!(status, latency_ms, "request completed");
                }
            })
            .on_failure(
                |error: ServerErrorsFailureClass, latency: Duration, _span: &tracing::Span| {
                    tracing::error!(
                        latency_ms = latency.as_millis(),
                        error = %error,
                        "request failed"
                    );
                },
            ),
    )
}
