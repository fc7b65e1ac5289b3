//! Per-digit anomaly detection against a deviation threshold.
//!
//! A digit is anomalous when its observed share differs from the
//! Benford expectation by strictly more than the caller's threshold
//! (in percentage points). An empty anomaly set is a normal outcome,
//! not an error.
//!
//! # Example
//!
//! ```
//! use benford_insight::anomaly::detect_anomalies;
//! use benford_insight::reference::expected_percentages;
//!
//! // All mass on digit 1: digit 1 is over-represented, the rest under.
//! let mut observed = [0.0; 9];
//! observed[0] = 100.0;
//! let anomalies = detect_anomalies(&observed, expected_percentages(), 5.0);
//! assert!(anomalies.contains(&1));
//! ```

/// Default anomaly threshold in percentage points.
pub const DEFAULT_THRESHOLD: f64 = 5.0;

/// Whether a single digit's deviation exceeds the threshold (strict).
pub fn is_anomalous(observed_pct: f64, expected_pct: f64, threshold_pct: f64) -> bool {
    (observed_pct - expected_pct).abs() > threshold_pct
}

/// Returns the digits whose |observed − expected| exceeds
/// `threshold_pct`, in ascending digit order.
///
/// The threshold is taken as supplied; it is never clamped. A
/// threshold of 100 can never be exceeded by a percentage gap, so it
/// always yields an empty set.
pub fn detect_anomalies(
    observed_pct: &[f64; 9],
    expected_pct: &[f64; 9],
    threshold_pct: f64,
) -> Vec<u8> {
    observed_pct
        .iter()
        .zip(expected_pct.iter())
        .enumerate()
        .filter(|(_, (obs, exp))| is_anomalous(**obs, **exp, threshold_pct))
        .map(|(i, _)| (i + 1) as u8)
        .collect()
}
