//! Goodness-of-fit tests against the Benford reference distribution.
//!
//! Two independent pure tests over the nine (observed %, expected %)
//! pairs:
//!
//! - **Chi-squared** — count-based test with 8 degrees of freedom,
//!   banded against fixed critical values rather than a continuous
//!   p-value.
//! - **MAD** — mean absolute deviation with the Nigrini conformity
//!   tiers used in forensic accounting. The tier cutoffs are
//!   regulatory-style constants calibrated on proportion scale and are
//!   preserved exactly; they are not tunable.
//!
//! # Example
//!
//! ```
//! use benford_insight::reference::expected_percentages;
//! use benford_insight::stats::{chi_squared_test, mad_test, ConformityTier};
//!
//! let expected = expected_percentages();
//! // A perfectly conforming sample.
//! let chi = chi_squared_test(expected, expected, 1000);
//! assert!(!chi.is_significant);
//! let mad = mad_test(expected, expected);
//! assert_eq!(mad.conformity, ConformityTier::High);
//! ```

use std::fmt;

/// Degrees of freedom for the nine-category test (9 − 1).
pub const DEGREES_OF_FREEDOM: usize = 8;

/// Chi-squared critical value at p = 0.05 with 8 degrees of freedom.
pub const CRITICAL_P05: f64 = 15.507;
/// Chi-squared critical value at p = 0.01 with 8 degrees of freedom.
pub const CRITICAL_P01: f64 = 20.090;
/// Chi-squared critical value at p = 0.001 with 8 degrees of freedom.
pub const CRITICAL_P001: f64 = 26.125;

// ── Chi-squared test ──────────────────────────────────────────────────

/// P-value band reached by the chi-squared statistic.
///
/// The statistic is compared against fixed critical values; the band is
/// the highest (most extreme) significance tier it clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PValueBand {
    /// Statistic below all critical values: not significant.
    GreaterThan005,
    /// Statistic above 15.507: significant at 95% confidence.
    LessThan005,
    /// Statistic above 20.090: significant at 99% confidence.
    LessThan001,
    /// Statistic above 26.125: significant at 99.9% confidence.
    LessThan0001,
}

impl fmt::Display for PValueBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::GreaterThan005 => "> 0.05",
            Self::LessThan005 => "< 0.05",
            Self::LessThan001 => "< 0.01",
            Self::LessThan0001 => "< 0.001",
        };
        f.write_str(s)
    }
}

/// Result of the chi-squared goodness-of-fit test.
#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquaredResult {
    /// Test statistic Σ (observed − expected)² / expected over counts.
    pub statistic: f64,
    /// Always 8 (9 digit categories − 1).
    pub degrees_of_freedom: usize,
    /// P-value band reached.
    pub p_value: PValueBand,
    /// Significance level cleared (0.05, 0.01, or 0.001), or `None`.
    pub significance: Option<f64>,
    /// Whether any significance tier was reached.
    pub is_significant: bool,
    /// Fixed interpretation text for the band reached.
    pub interpretation: &'static str,
}

/// Runs the chi-squared goodness-of-fit test over percentage
/// distributions and the total sample size.
///
/// Percentages are converted back to counts before summing; bins with
/// a non-positive expected count are skipped (division guard — with the
/// Benford reference every expected count is positive, but the guard
/// holds for arbitrary expected distributions).
///
/// ```
/// use benford_insight::reference::expected_percentages;
/// use benford_insight::stats::chi_squared_test;
///
/// // Everything in one digit: extreme deviation.
/// let mut observed = [0.0; 9];
/// observed[0] = 100.0;
/// let result = chi_squared_test(&observed, expected_percentages(), 1000);
/// assert!(result.is_significant);
/// assert_eq!(result.significance, Some(0.001));
/// ```
pub fn chi_squared_test(
    observed_pct: &[f64; 9],
    expected_pct: &[f64; 9],
    total: usize,
) -> ChiSquaredResult {
    let total = total as f64;
    let mut statistic = 0.0;

    for (obs, exp) in observed_pct.iter().zip(expected_pct.iter()) {
        let observed_count = obs / 100.0 * total;
        let expected_count = exp / 100.0 * total;
        if expected_count > 0.0 {
            let diff = observed_count - expected_count;
            statistic += diff * diff / expected_count;
        }
    }

    let (p_value, significance) = if statistic > CRITICAL_P001 {
        (PValueBand::LessThan0001, Some(0.001))
    } else if statistic > CRITICAL_P01 {
        (PValueBand::LessThan001, Some(0.01))
    } else if statistic > CRITICAL_P05 {
        (PValueBand::LessThan005, Some(0.05))
    } else {
        (PValueBand::GreaterThan005, None)
    };

    ChiSquaredResult {
        statistic,
        degrees_of_freedom: DEGREES_OF_FREEDOM,
        p_value,
        significance,
        is_significant: significance.is_some(),
        interpretation: interpret_chi_squared(significance),
    }
}

fn interpret_chi_squared(significance: Option<f64>) -> &'static str {
    match significance {
        None => "Data is consistent with Benford's Law (no significant deviation detected)",
        Some(s) if s == 0.05 => {
            "Data shows significant deviation from Benford's Law (95% confidence)"
        }
        Some(s) if s == 0.01 => {
            "Data shows highly significant deviation from Benford's Law (99% confidence)"
        }
        _ => "Data shows extremely significant deviation from Benford's Law (99.9% confidence)",
    }
}

// ── MAD test ──────────────────────────────────────────────────────────

/// Conformity tier for the MAD test, by ascending deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConformityTier {
    /// MAD ≤ 0.006: close conformity.
    High,
    /// MAD ≤ 0.012: acceptable conformity.
    Moderate,
    /// MAD ≤ 0.015: marginal conformity.
    Marginal,
    /// MAD > 0.015: nonconformity.
    Low,
}

impl fmt::Display for ConformityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Marginal => "Marginal",
            Self::Low => "Low",
        };
        f.write_str(s)
    }
}

/// The fixed MAD tier cutoffs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MadThresholds {
    /// Values at or below this suggest close conformity.
    pub acceptable: f64,
    /// Values at or below this suggest marginal conformity.
    pub marginal: f64,
    /// Values above this suggest nonconformity.
    pub nonconforming: f64,
}

/// Tier cutoffs on proportion scale. Strict `>` moves to the next tier.
pub const MAD_THRESHOLDS: MadThresholds = MadThresholds {
    acceptable: 0.006,
    marginal: 0.012,
    nonconforming: 0.015,
};

/// Result of the MAD conformity test.
#[derive(Debug, Clone, PartialEq)]
pub struct MadResult {
    /// Mean absolute deviation over the nine digits.
    pub value: f64,
    /// Conformity tier the value falls in.
    pub conformity: ConformityTier,
    /// Fixed interpretation text for the tier.
    pub interpretation: &'static str,
    /// The cutoff table used.
    pub thresholds: MadThresholds,
}

/// Runs the MAD conformity test over percentage distributions.
///
/// value = mean over the nine digits of |observed − expected|. The tier
/// cutoffs are compared against this value as-is; boundary values fall
/// in the better tier (≤ is conforming, strict > demotes).
///
/// ```
/// use benford_insight::reference::expected_percentages;
/// use benford_insight::stats::{mad_test, ConformityTier};
///
/// let mut observed = [0.0; 9];
/// observed[0] = 100.0;
/// let result = mad_test(&observed, expected_percentages());
/// assert_eq!(result.conformity, ConformityTier::Low);
/// ```
pub fn mad_test(observed_pct: &[f64; 9], expected_pct: &[f64; 9]) -> MadResult {
    let total_deviation: f64 = observed_pct
        .iter()
        .zip(expected_pct.iter())
        .map(|(obs, exp)| (obs - exp).abs())
        .sum();
    let value = total_deviation / observed_pct.len() as f64;

    let (conformity, interpretation) = if value > MAD_THRESHOLDS.nonconforming {
        (
            ConformityTier::Low,
            "Data significantly deviates from Benford's Law",
        )
    } else if value > MAD_THRESHOLDS.marginal {
        (
            ConformityTier::Marginal,
            "Data shows some deviation from Benford's Law",
        )
    } else if value > MAD_THRESHOLDS.acceptable {
        (
            ConformityTier::Moderate,
            "Data reasonably follows Benford's Law",
        )
    } else {
        (ConformityTier::High, "Data closely follows Benford's Law")
    };

    MadResult {
        value,
        conformity,
        interpretation,
        thresholds: MAD_THRESHOLDS,
    }
}
