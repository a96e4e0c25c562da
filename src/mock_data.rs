use anyhow::Context;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::path::Path;
use tracing::info;

use crate::telemetry::TelemetryRecord;

// ─── Region pool ─────────────────────────────────────────────────

/// (region, typical latency ms) pairs the demo file is drawn from.
static REGIONS: &[(&str, f64)] = &[
    ("us-east", 120.0),
    ("us-west", 140.0),
    ("eu-west", 160.0),
    ("eu-central", 170.0),
    ("ap-south", 210.0),
    ("ap-northeast", 190.0),
];

// ─── Generation ──────────────────────────────────────────────────

/// Build a deterministic telemetry set: same seed, same records.
pub fn generate(records_per_region: usize, seed: u64) -> Vec<TelemetryRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(REGIONS.len() * records_per_region);

    for _ in 0..records_per_region {
        for &(region, base) in REGIONS {
            // Mostly near the base, with an occasional slow outlier
            let jitter: f64 = rng.gen_range(-0.4..0.4);
            let spike = if rng.gen_bool(0.08) { rng.gen_range(1.5..2.5) } else { 1.0 };
            let latency_ms = (base * (1.0 + jitter) * spike * 100.0).round() / 100.0;
            let uptime_pct = (rng.gen_range(97.0..100.0_f64) * 1000.0).round() / 1000.0;

            records.push(TelemetryRecord {
                region: region.to_string(),
                latency_ms,
                uptime_pct,
            });
        }
    }

    records
}

/// Generate and write the demo file as pretty JSON.
pub fn write(path: &Path, records_per_region: usize, seed: u64) -> anyhow::Result<()> {
    let records = generate(records_per_region, seed);
    let json = serde_json::to_vec_pretty(&records).context("serializing demo telemetry")?;
    std::fs::write(path, json)
        .with_context(|| format!("writing demo telemetry to {}", path.display()))?;

    info!(
        path = %path.display(),
        records = records.len(),
        regions = REGIONS.len(),
        "demo telemetry written"
    );
    Ok(())
}
