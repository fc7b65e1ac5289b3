//! Input normalization: free-form text to valid positive numbers.
//!
//! Benford leading-digit analysis is defined only for positive
//! magnitudes, so normalization is strict: a token either yields a
//! finite value > 0 or is rejected. Rejection is a normal outcome,
//! never a fault — callers accumulate rejects and fail only when the
//! accepted set ends up empty.
//!
//! # Example
//!
//! ```
//! use benford_insight::normalize::{clean_number, tokenize};
//!
//! assert_eq!(clean_number("$1,234.56"), Some(1234.56));
//! assert_eq!(clean_number("45%"), Some(45.0));
//! assert_eq!(clean_number("-3"), None);
//! assert_eq!(clean_number("abc"), None);
//!
//! let tokens = tokenize("123, 45\t6\n7");
//! assert_eq!(tokens, vec!["123", "45", "6", "7"]);
//! ```

/// Characters stripped from tokens before parsing (besides whitespace).
const STRIP_CHARS: &[char] = &['$', ',', '%'];

/// Cleans a raw token and parses it as a strictly positive number.
///
/// Strips currency symbols, thousands separators, percent signs, and
/// whitespace, then parses the remainder as `f64`. Returns `None` when
/// parsing fails or the value is non-finite or ≤ 0. `NaN` and `inf`
/// parse successfully in Rust, so non-finite values are rejected
/// explicitly rather than propagated.
pub fn clean_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !STRIP_CHARS.contains(c) && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    Some(value)
}

/// Splits free-form input on comma, tab, and newline boundaries.
///
/// Tokens are trimmed; empty tokens are dropped. This is the entry
/// point for pasted text; CSV column input goes through
/// [`csv_parser`](crate::csv_parser) instead.
pub fn tokenize(input: &str) -> Vec<&str> {
    input
        .split(|c| matches!(c, ',' | '\t' | '\n' | '\r'))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Normalizes a stream of tokens, returning accepted values and the
/// number of rejected tokens.
///
/// ```
/// use benford_insight::normalize::clean_numbers;
///
/// let (values, rejected) = clean_numbers(["$10", "oops", "20", "-5"]);
/// assert_eq!(values, vec![10.0, 20.0]);
/// assert_eq!(rejected, 2);
/// ```
pub fn clean_numbers<'a, I>(tokens: I) -> (Vec<f64>, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut accepted = Vec::new();
    let mut rejected = 0;
    for token in tokens {
        match clean_number(token) {
            Some(value) => accepted.push(value),
            None => rejected += 1,
        }
    }
    (accepted, rejected)
}
