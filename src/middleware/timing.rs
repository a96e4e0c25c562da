use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Tower-compatible middleware that tags every response with:
///
///   X-Request-Id        — fresh UUID v4, also attached to the log line
///   X-Response-Time-Us  — total handler wall time in microseconds
///   Server-Timing       — same value in the standard Server-Timing format
pub async fn timing_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let request_id = Uuid::new_v4();

    let start = Instant::now();
    let mut response = next.run(req).await;
    let elapsed = start.elapsed();
    let us = elapsed.as_micros() as u64;

    // ── Inject response headers ─────────────────────────────────
    let headers = response.headers_mut();
    if let Ok(val) = HeaderValue::from_str(&request_id.to_string()) {
        headers.insert("x-request-id", val);
    }
    if let Ok(val) = HeaderValue::from_str(&us.to_string()) {
        headers.insert("x-response-time-us", val);
    }
    let server_timing = format!("total;dur={:.3}", elapsed.as_secs_f64() * 1000.0);
    if let Ok(val) = HeaderValue::from_str(&server_timing) {
        headers.insert("server-timing", val);
    }

    // ── Log line ────────────────────────────────────────────────
    let status = response.status().as_u16();
    if response.status().is_success() {
        info!(%request_id, %method, %path, status, us, "request");
    } else {
        warn!(%request_id, %method, %path, status, us, "request");
    }

    response
}
