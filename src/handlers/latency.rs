use axum::{body::Bytes, extract::State, Json};
use serde_json::error::Category;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::telemetry::{aggregate, Query, RegionReport};
use crate::AppState;

use super::AppError;

// ─── POST / ──────────────────────────────────────────────────────

/// Parses the body into a `Query`, then summarises the requested regions.
pub async fn region_stats(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<RegionReport>, AppError> {
    let query = parse_query(&body)?;
    let store = state
        .telemetry
        .as_ref()
        .map_err(|e| AppError::DataUnavailable(e.to_string()))?;

    let report = aggregate(&query, store);
    debug!(
        requested = query.regions.len(),
        reported = report.len(),
        threshold_ms = query.threshold_ms,
        "aggregated"
    );

    Ok(Json(report))
}

// ─── Anything but POST / ─────────────────────────────────────────

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

// ─── Helpers ─────────────────────────────────────────────────────

/// Explicit validation step: raw bytes → typed `Query`.
/// Syntax errors and shape errors get different messages.
pub fn parse_query(body: &[u8]) -> Result<Query, AppError> {
    serde_json::from_slice::<Query>(body).map_err(|e| {
        warn!(error = %e, "rejected request body");
        match e.classify() {
            Category::Data => AppError::InvalidQuery,
            Category::Syntax | Category::Eof | Category::Io => AppError::MalformedJson,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_query() {
        let q = parse_query(br#"{"regions": ["us-east", "eu-west"], "threshold_ms": 150}"#).unwrap();
        assert_eq!(q.regions, vec!["us-east", "eu-west"]);
        assert_eq!(q.threshold_ms, 150.0);
    }

    #[test]
    fn syntax_errors_are_malformed_json() {
        for body in [&b""[..], b"{", b"not json", br#"{"regions": [}"#] {
            assert!(matches!(parse_query(body), Err(AppError::MalformedJson)));
        }
    }

    #[test]
    fn shape_errors_are_invalid_query() {
        for body in [
            &br#"{"regions": ["a"]}"#[..],
            br#"{"threshold_ms": 1}"#,
            br#"{"regions": "a", "threshold_ms": 1}"#,
            br#"{"regions": [1], "threshold_ms": 1}"#,
            br#"{"regions": ["a"], "threshold_ms": "fast"}"#,
            b"[]",
        ] {
            assert!(matches!(parse_query(body), Err(AppError::InvalidQuery)));
        }
    }
}
