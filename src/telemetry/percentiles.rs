/// Percentile used for the `p95_latency` field.
pub const P95: f64 = 0.95;

/// Nearest-rank percentile: picks an observed value, never interpolates.
///
/// Sorts a copy of `values`, takes 0-based index `ceil(p * n) - 1`
/// clamped into `[0, n - 1]`. Returns `None` for an empty slice.
pub fn nearest_rank(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let rank = (p * n as f64).ceil() as i64 - 1;
    let idx = rank.clamp(0, n as i64 - 1) as usize;
    Some(sorted[idx])
}

/// Round to `places` decimal digits, ties to even on the exact binary value.
///
/// Goes through the decimal formatter so that e.g. `98.95` stays `98.95`
/// instead of picking up multiply-then-divide noise.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.places$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_percentile() {
        assert_eq!(nearest_rank(&[], P95), None);
    }

    #[test]
    fn p95_of_five_values_is_the_maximum() {
        // sorted [90, 100, 120, 150, 180], ceil(4.75) - 1 = 4
        let v = [100.0, 150.0, 120.0, 180.0, 90.0];
        assert_eq!(nearest_rank(&v, P95), Some(180.0));
    }

    #[test]
    fn p95_of_twenty_values_does_not_interpolate() {
        // ceil(19.0) - 1 = 18 → the 19th smallest value
        let v: Vec<f64> = (1..=20).map(|i| i as f64 * 10.0).collect();
        assert_eq!(nearest_rank(&v, P95), Some(190.0));

        // an interpolating estimator would land between 190 and 200 here
        let v: Vec<f64> = (1..=21).map(|i| i as f64).collect();
        // ceil(19.95) - 1 = 19
        assert_eq!(nearest_rank(&v, P95), Some(20.0));
    }

    #[test]
    fn single_value_is_every_percentile() {
        assert_eq!(nearest_rank(&[42.5], P95), Some(42.5));
        assert_eq!(nearest_rank(&[42.5], 0.0), Some(42.5));
    }

    #[test]
    fn rank_is_clamped_at_both_ends() {
        let v = [3.0, 1.0, 2.0];
        // ceil(0) - 1 = -1 → clamped to 0
        assert_eq!(nearest_rank(&v, 0.0), Some(1.0));
        // ceil(3.3) - 1 = 3 → clamped to 2
        assert_eq!(nearest_rank(&v, 1.1), Some(3.0));
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = [5.0, 1.0, 4.0, 2.0, 3.0];
        let b = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(nearest_rank(&a, 0.5), nearest_rank(&b, 0.5));
        assert_eq!(nearest_rank(&a, 0.5), Some(3.0));
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(200.0, 2), 200.0);
        assert_eq!(round_to(98.95, 3), 98.95);
        assert_eq!(round_to(123.456_78, 2), 123.46);
        assert_eq!(round_to(99.123_44, 3), 99.123);
        assert_eq!(round_to(1.0 / 3.0, 3), 0.333);
    }
}
