// Request logging middleware
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Log every request with a generated id, its status and duration
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().simple().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    tracing::info!(%request_id, %method, %uri, "Request received");

    let response = next.run(request).await;

    tracing::info!(
        %request_id,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}
