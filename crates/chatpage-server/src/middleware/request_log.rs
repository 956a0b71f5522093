use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

/// Request logging middleware.
///
/// Runs the request inside a span carrying a fresh request id, then logs
/// one structured `api_request` event with the outcome.
pub async fn request_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();
    let request_id = uuid::Uuid::new_v4();
    let started = Instant::now();

    let response = next
        .run(req)
        .instrument(tracing::info_span!("request", %request_id))
        .await;

    let status = response.status().as_u16();
    tracing::info!(
        %request_id,
        method = %method,
        path = %uri,
        status = status,
        latency_ms = started.elapsed().as_millis() as u64,
        "api_request"
    );

    response
}
