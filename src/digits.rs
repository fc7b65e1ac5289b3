//! Leading-digit extraction and frequency aggregation.
//!
//! The leading significant digit of a value is the first nonzero digit
//! of its decimal representation. Extraction must hold across the full
//! `f64` range: fixed-precision decimal formatting truncates or pads at
//! extreme magnitudes (1e21 renders as `100000000000000000000000`,
//! 1e-7 as `0.0000001` or worse), so extraction goes through shortest
//! round-trip scientific notation, whose mantissa is normalized to
//! [1, 10).
//!
//! # Example
//!
//! ```
//! use benford_insight::digits::{aggregate, leading_digit};
//!
//! assert_eq!(leading_digit(123.0), Some(1));
//! assert_eq!(leading_digit(0.0042), Some(4));
//! assert_eq!(leading_digit(1e21), Some(1));
//! assert_eq!(leading_digit(0.0), None);
//!
//! let histogram = aggregate(&[123.0, 45.0, 6.0, 7.0, 89.0]);
//! assert_eq!(histogram.total(), 5);
//! assert_eq!(histogram.count(1), 1);
//! assert_eq!(histogram.count(2), 0);
//! ```

/// Extracts the leading significant digit of a value.
///
/// Returns a digit in 1..=9, or `None` for zero and non-finite values.
/// Sign is ignored.
pub fn leading_digit(value: f64) -> Option<u8> {
    let magnitude = value.abs();
    if !magnitude.is_finite() || magnitude == 0.0 {
        return None;
    }

    // Shortest round-trip scientific notation: the mantissa is in
    // [1, 10), so the first character is the leading significant digit
    // at any magnitude, subnormals included.
    let formatted = format!("{magnitude:e}");
    match formatted.as_bytes()[0] {
        b @ b'1'..=b'9' => Some(b - b'0'),
        _ => None,
    }
}

/// Dense histogram of leading-digit occurrences for digits 1..=9.
///
/// All nine bins are always present, even at zero count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitHistogram {
    counts: [usize; 9],
}

impl DigitHistogram {
    /// Creates an empty histogram with all nine bins at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the bin for `digit`. Digits outside 1..=9 are ignored.
    pub fn record(&mut self, digit: u8) {
        if (1..=9).contains(&digit) {
            self.counts[(digit - 1) as usize] += 1;
        }
    }

    /// Occurrence count for `digit` (0 for digits outside 1..=9).
    pub fn count(&self, digit: u8) -> usize {
        if (1..=9).contains(&digit) {
            self.counts[(digit - 1) as usize]
        } else {
            0
        }
    }

    /// The nine bin counts, indexed by digit − 1.
    pub fn counts(&self) -> &[usize; 9] {
        &self.counts
    }

    /// Total number of recorded digits (sum over all bins).
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Observed percentage per digit. All zeros when the histogram is empty.
    pub fn observed_percentages(&self) -> [f64; 9] {
        let total = self.total();
        if total == 0 {
            return [0.0; 9];
        }
        let mut pct = [0.0; 9];
        for (slot, &count) in pct.iter_mut().zip(self.counts.iter()) {
            *slot = count as f64 / total as f64 * 100.0;
        }
        pct
    }
}

/// Builds the leading-digit histogram for a sequence of values.
///
/// Values without a leading digit (zero, non-finite) are silently
/// excluded; the histogram total reflects only values that yielded a
/// digit. Callers treat `total() == 0` as "no analyzable data".
pub fn aggregate(values: &[f64]) -> DigitHistogram {
    let mut histogram = DigitHistogram::new();
    for &value in values {
        if let Some(digit) = leading_digit(value) {
            histogram.record(digit);
        }
    }
    histogram
}
