pub mod aggregator;
pub mod percentiles;
pub mod store;

pub use aggregator::{aggregate, Query, RegionReport};
pub use store::{StoreError, TelemetryStore};

use serde::{Deserialize, Serialize};

/// One latency/uptime observation for a region.
/// This is the on-disk shape: the data file is a flat JSON array of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// e.g. "us-east", shared by many records
    pub region: String,
    /// Observed latency in milliseconds (≥ 0)
    pub latency_ms: f64,
    /// Uptime percentage, conventionally 0–100
    pub uptime_pct: f64,
}
