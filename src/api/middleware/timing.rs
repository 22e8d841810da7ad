//! Request timing middleware.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// Log how long each request took to handle.
pub async fn timing_middleware(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        "Request \"{}\": {} ms",
        path,
        started.elapsed().as_millis()
    );
    response
}
