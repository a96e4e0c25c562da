use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use super::percentiles::{nearest_rank, round_to, P95};
use super::TelemetryStore;

// ─── Input ───────────────────────────────────────────────────────

/// A validated request: which regions to summarise and the breach line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Query {
    /// May repeat names or mention regions the store has never seen
    pub regions: Vec<String>,
    /// A record breaches when `latency_ms > threshold_ms`
    pub threshold_ms: f64,
}

// ─── Output ──────────────────────────────────────────────────────

/// Summary for one region. The three averages are `None` (JSON `null`)
/// when the region has no records; `breaches` is always a number.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RegionStats {
    pub avg_latency: Option<f64>,
    pub p95_latency: Option<f64>,
    pub avg_uptime: Option<f64>,
    pub breaches: u64,
}

impl RegionStats {
    /// Block reported for a region with no matching records.
    pub const EMPTY: Self = Self {
        avg_latency: None,
        p95_latency: None,
        avg_uptime: None,
        breaches: 0,
    };
}

/// Region → stats, one entry per distinct requested region, in the
/// order each region was first requested. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionReport {
    entries: Vec<(String, RegionStats)>,
}

impl RegionReport {
    #[cfg(test)]
    pub fn get(&self, region: &str) -> Option<&RegionStats> {
        self.entries
            .iter()
            .find(|(name, _)| name == region)
            .map(|(_, stats)| stats)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Serialize for RegionReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (region, stats) in &self.entries {
            map.serialize_entry(region, stats)?;
        }
        map.end()
    }
}

// ─── Aggregation ─────────────────────────────────────────────────

/// Summarise every requested region against `store`. Pure and infallible.
pub fn aggregate(query: &Query, store: &TelemetryStore) -> RegionReport {
    let mut entries: Vec<(String, RegionStats)> = Vec::with_capacity(query.regions.len());

    for region in &query.regions {
        // Duplicates would compute identical stats; keep the first slot
        if entries.iter().any(|(name, _)| name == region) {
            continue;
        }
        let stats = region_stats(store, region, query.threshold_ms);
        entries.push((region.clone(), stats));
    }

    RegionReport { entries }
}

fn region_stats(store: &TelemetryStore, region: &str, threshold_ms: f64) -> RegionStats {
    let mut latencies = Vec::new();
    let mut uptime_sum = 0.0;
    for rec in store.records_for_region(region) {
        latencies.push(rec.latency_ms);
        uptime_sum += rec.uptime_pct;
    }

    if latencies.is_empty() {
        return RegionStats::EMPTY;
    }

    let n = latencies.len() as f64;
    let latency_sum: f64 = latencies.iter().sum();
    let breaches = latencies.iter().filter(|&&v| v > threshold_ms).count() as u64;

    RegionStats {
        avg_latency: Some(round_to(latency_sum / n, 2)),
        p95_latency: nearest_rank(&latencies, P95).map(|v| round_to(v, 2)),
        avg_uptime: Some(round_to(uptime_sum / n, 3)),
        breaches,
    }
}
