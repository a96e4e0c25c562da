use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::TelemetryRecord;

/// Why the telemetry file could not be turned into a store.
/// Every variant names the path so the 500 body is actionable.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Telemetry file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Cannot read telemetry file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed telemetry file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid record #{index} in {}: {reason}", path.display())]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        reason: &'static str,
    },
}

/// Read-only snapshot of every telemetry record, loaded once at start-up.
#[derive(Debug, Clone, Default)]
pub struct TelemetryStore {
    records: Vec<TelemetryRecord>,
}

impl TelemetryStore {
    /// Load the flat JSON array at `path`.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let records: Vec<TelemetryRecord> =
            serde_json::from_slice(&raw).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        for (index, rec) in records.iter().enumerate() {
            if let Some(reason) = validate(rec) {
                return Err(StoreError::InvalidRecord {
                    path: path.to_path_buf(),
                    index,
                    reason,
                });
            }
        }

        debug!(path = %path.display(), records = records.len(), "telemetry file parsed");
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<TelemetryRecord>) -> Self {
        Self { records }
    }

    /// All records tagged `region`, in store order. Linear scan.
    pub fn records_for_region<'a>(
        &'a self,
        region: &'a str,
    ) -> impl Iterator<Item = &'a TelemetryRecord> + 'a {
        self.records.iter().filter(move |r| r.region == region)
    }

    /// Distinct region names in first-seen order.
    pub fn regions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for rec in &self.records {
            if !seen.contains(&rec.region.as_str()) {
                seen.push(&rec.region);
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn validate(rec: &TelemetryRecord) -> Option<&'static str> {
    if !rec.latency_ms.is_finite() || rec.latency_ms < 0.0 {
        return Some("latency_ms must be a non-negative number");
    }
    if !rec.uptime_pct.is_finite() {
        return Some("uptime_pct must be a finite number");
    }
    None
}
