//! Benford reference model: the theoretical leading-digit distribution.
//!
//! Benford's Law predicts that in many naturally occurring datasets the
//! leading significant digit d appears with probability log10(1 + 1/d).
//! The expected percentages are a fixed table: computed once on first
//! access and shared immutably by every analysis afterwards.
//!
//! # Example
//!
//! ```
//! use benford_insight::reference::{expected_for, expected_percentages};
//!
//! let table = expected_percentages();
//! assert!((table[0] - 30.103).abs() < 0.001); // digit 1 leads ~30.1% of the time
//! assert!(expected_for(9).unwrap() < expected_for(1).unwrap());
//! ```

use std::sync::OnceLock;

static EXPECTED: OnceLock<[f64; 9]> = OnceLock::new();

/// Expected percentage per leading digit: log10(1 + 1/d) × 100 for d in 1..=9.
///
/// Computed once; subsequent calls return the same table. The nine
/// entries sum to 100 (within floating-point tolerance).
pub fn expected_percentages() -> &'static [f64; 9] {
    EXPECTED.get_or_init(|| {
        let mut table = [0.0; 9];
        for (i, slot) in table.iter_mut().enumerate() {
            let d = (i + 1) as f64;
            *slot = (1.0 + 1.0 / d).log10() * 100.0;
        }
        table
    })
}

/// Expected percentage for a single digit, or `None` for digits outside 1..=9.
///
/// ```
/// use benford_insight::reference::expected_for;
///
/// assert!(expected_for(1).is_some());
/// assert!(expected_for(0).is_none());
/// assert!(expected_for(10).is_none());
/// ```
pub fn expected_for(digit: u8) -> Option<f64> {
    if (1..=9).contains(&digit) {
        Some(expected_percentages()[(digit - 1) as usize])
    } else {
        None
    }
}
