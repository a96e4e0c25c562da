use axum::{
    http::{HeaderName, Method},
    middleware as axum_mw,
    routing::post,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers;
use crate::middleware::timing;
use crate::AppState;

/// Builds the Axum `Router`: a single `POST /` endpoint plus middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Any origin, POST only; preflights are answered here
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static("server-timing"),
            HeaderName::from_static("x-response-time-us"),
            HeaderName::from_static("x-request-id"),
        ]);

    Router::new()
        .route(
            "/",
            post(handlers::latency::region_stats)
                .fallback(handlers::latency::method_not_allowed),
        )
        .with_state(state)
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn(timing::timing_middleware))
        // Request spans stay at DEBUG; the timing middleware owns the INFO line
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(cors)
}
