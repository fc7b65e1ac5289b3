//! Synthetic Benford-conforming dataset generation.
//!
//! Leading digits are drawn by inverse-transform sampling over the
//! cumulative Benford probability mass, which reproduces the reference
//! distribution exactly in expectation. Trailing digits are uniform,
//! building the full magnitude of each record.
//!
//! Randomness comes from a seedable LCG so tests can be deterministic;
//! an unseeded config derives its seed from the system clock.
//!
//! # Example
//!
//! ```
//! use benford_insight::generator::{generate, GeneratorConfig, NumberFormat};
//!
//! let config = GeneratorConfig::default().count(50).seed(Some(7));
//! let tokens = generate(&config).unwrap();
//! assert_eq!(tokens.len(), 50);
//!
//! // Seeded generation is reproducible.
//! assert_eq!(tokens, generate(&config).unwrap());
//!
//! // Currency format renders two fixed decimals.
//! let config = config.format(NumberFormat::Currency);
//! assert!(generate(&config).unwrap()[0].contains('.'));
//! ```

use crate::error::BenfordError;
use crate::reference::expected_percentages;

/// Minimum number of records per generation request.
pub const MIN_RECORDS: usize = 10;
/// Maximum number of records per generation request.
pub const MAX_RECORDS: usize = 10_000;

/// Upper bound (exclusive) for the uniform trailing-digit block.
const TRAILING_RANGE: usize = 1_000_000;

// ── Configuration ─────────────────────────────────────────────────────

/// Output format for generated numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// Whole numbers, plain integer text.
    #[default]
    Integer,
    /// Magnitude divided by 100, two fixed decimal places.
    Currency,
    /// Magnitude divided by 100, two fixed decimal places.
    Decimal,
}

/// Configuration for synthetic data generation.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// Number of records to generate. Must be in [10, 10000]. Default: 500.
    pub count: usize,
    /// Output format. Default: `Integer`.
    pub format: NumberFormat,
    /// Random seed. `None` derives a seed from the system clock. Default: None.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 500,
            format: NumberFormat::Integer,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Sets the record count.
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

// ── Generation ────────────────────────────────────────────────────────

/// Generates a Benford-conforming dataset as formatted text tokens.
///
/// Rejects counts outside [[`MIN_RECORDS`], [`MAX_RECORDS`]] before any
/// sampling occurs; out-of-range counts are never clamped.
///
/// ```
/// use benford_insight::generator::{generate, GeneratorConfig};
///
/// // 9 is rejected, 10 is the accepted boundary.
/// assert!(generate(&GeneratorConfig::default().count(9)).is_err());
/// assert!(generate(&GeneratorConfig::default().count(10).seed(Some(1))).is_ok());
/// ```
pub fn generate(config: &GeneratorConfig) -> Result<Vec<String>, BenfordError> {
    if !(MIN_RECORDS..=MAX_RECORDS).contains(&config.count) {
        return Err(BenfordError::InvalidParameter {
            name: "count".into(),
            message: format!(
                "must be in [{MIN_RECORDS}, {MAX_RECORDS}], got {}",
                config.count
            ),
        });
    }

    let expected = expected_percentages();
    let mut state = config.seed.unwrap_or_else(clock_seed);
    let mut tokens = Vec::with_capacity(config.count);

    for _ in 0..config.count {
        let digit = sample_digit(expected, lcg_next_f64(&mut state));
        let trailing = lcg_next_usize(&mut state, TRAILING_RANGE);

        // Leading digit concatenated with the trailing block forms the
        // full magnitude.
        let magnitude: f64 = format!("{digit}{trailing}").parse().unwrap_or(digit as f64);

        let token = match config.format {
            NumberFormat::Integer => format!("{}", magnitude.trunc() as u64),
            NumberFormat::Currency | NumberFormat::Decimal => {
                format!("{:.2}", magnitude / 100.0)
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

/// Serializes generated tokens as a single-column CSV with a `Number` header.
pub fn to_csv(tokens: &[String]) -> String {
    let mut out = String::from("Number\n");
    out.push_str(&tokens.join("\n"));
    out
}

/// Inverse-transform sampling: first digit whose cumulative Benford
/// mass reaches `r` (r in [0, 1)).
fn sample_digit(expected_pct: &[f64; 9], r: f64) -> u8 {
    let mut cumulative = 0.0;
    for (i, pct) in expected_pct.iter().enumerate() {
        cumulative += pct / 100.0;
        if r <= cumulative {
            return (i + 1) as u8;
        }
    }
    // Cumulative mass sums to 1; only float rounding can land here.
    9
}

// ── RNG helpers ───────────────────────────────────────────────────────

/// LCG random: returns [0, 1).
fn lcg_next_f64(state: &mut u64) -> f64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    (*state >> 33) as f64 / (1u64 << 31) as f64
}

/// LCG random: returns [0, max).
fn lcg_next_usize(state: &mut u64, max: usize) -> usize {
    (lcg_next_f64(state) * max as f64) as usize % max
}

/// Clock-derived seed for unseeded configs.
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E3779B97F4A7C15)
}
