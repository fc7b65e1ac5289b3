//! Analysis orchestration: raw input to a self-contained outcome.
//!
//! One call to [`analyze`] runs the whole pipeline — tokenize →
//! normalize → aggregate → per-digit results → anomaly detection →
//! chi-squared + MAD — and returns a single [`AnalysisOutcome`]. The
//! outcome owns everything a presentation layer needs; re-analysis
//! replaces it wholesale, so there is no shared mutable state between
//! runs and independent calls are safe to run concurrently.
//!
//! # Example
//!
//! ```
//! use benford_insight::analysis::{analyze, AnalysisConfig};
//!
//! let outcome = analyze("123, 45, 6, 7, 89", &AnalysisConfig::default()).unwrap();
//! assert_eq!(outcome.total, 5);
//! assert_eq!(outcome.digits[0].count, 1); // digit 1 from "123"
//! assert!(outcome.small_sample); // fewer than 10 valid numbers
//! ```

use crate::anomaly::{self, DEFAULT_THRESHOLD};
use crate::csv_parser;
use crate::digits;
use crate::error::BenfordError;
use crate::normalize;
use crate::reference::expected_percentages;
use crate::stats::{chi_squared_test, mad_test, ChiSquaredResult, MadResult};

/// Fewer valid numbers than this triggers the small-sample advisory.
pub const SMALL_SAMPLE_LIMIT: usize = 10;

// ── Configuration ─────────────────────────────────────────────────────

/// Configuration for one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// Anomaly threshold in percentage points. Default: 5.0.
    pub threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl AnalysisConfig {
    /// Sets the anomaly threshold.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

// ── Result types ──────────────────────────────────────────────────────

/// Per-digit comparison record. Derived once per run, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitResult {
    /// The leading digit (1..=9).
    pub digit: u8,
    /// Occurrence count.
    pub count: usize,
    /// Observed share in percent.
    pub observed_pct: f64,
    /// Benford expected share in percent.
    pub expected_pct: f64,
    /// |observed − expected| in percentage points.
    pub difference_pct: f64,
    /// Whether the difference exceeds the run's threshold.
    pub is_anomaly: bool,
}

/// Aggregate deviation metrics over the nine digits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationSummary {
    /// Largest per-digit deviation in percentage points.
    pub max_deviation_pct: f64,
    /// Mean per-digit deviation in percentage points.
    pub mean_deviation_pct: f64,
    /// Simple conformity score: max(0, 100 − mean deviation × 10).
    pub conformity_score: f64,
}

/// Complete result of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    /// One record per digit 1..=9, in order.
    pub digits: [DigitResult; 9],
    /// Number of values that yielded a valid leading digit.
    pub total: usize,
    /// Digits flagged as anomalous, ascending.
    pub anomalies: Vec<u8>,
    /// Threshold the anomaly flags were computed against.
    pub threshold: f64,
    /// Advisory: fewer than [`SMALL_SAMPLE_LIMIT`] valid numbers.
    pub small_sample: bool,
    /// Chi-squared goodness-of-fit result.
    pub chi_squared: ChiSquaredResult,
    /// MAD conformity result.
    pub mad: MadResult,
    /// Aggregate deviation metrics.
    pub deviation: DeviationSummary,
}

impl AnalysisOutcome {
    /// Whether any digit was flagged.
    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }

    /// Serializes the per-digit table as CSV, values rounded to one
    /// decimal place.
    ///
    /// ```
    /// use benford_insight::analysis::{analyze, AnalysisConfig};
    ///
    /// let outcome = analyze("111, 222, 333", &AnalysisConfig::default()).unwrap();
    /// let csv = outcome.to_csv();
    /// assert!(csv.starts_with("Digit,Count,Observed %,Expected %,Difference %\n"));
    /// assert_eq!(csv.lines().count(), 10); // header + nine digits
    /// ```
    pub fn to_csv(&self) -> String {
        let mut rows = vec!["Digit,Count,Observed %,Expected %,Difference %".to_string()];
        for r in &self.digits {
            rows.push(format!(
                "{},{},{:.1},{:.1},{:.1}",
                r.digit, r.count, r.observed_pct, r.expected_pct, r.difference_pct
            ));
        }
        rows.join("\n")
    }

    /// Running cumulative sums of (observed, expected) percentages, for
    /// cumulative-distribution rendering.
    pub fn cumulative(&self) -> (Vec<f64>, Vec<f64>) {
        let mut observed = Vec::with_capacity(9);
        let mut expected = Vec::with_capacity(9);
        let (mut obs_sum, mut exp_sum) = (0.0, 0.0);
        for r in &self.digits {
            obs_sum += r.observed_pct;
            exp_sum += r.expected_pct;
            observed.push(obs_sum);
            expected.push(exp_sum);
        }
        (observed, expected)
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────

/// Analyzes free-form delimited text (comma, tab, or newline separated).
///
/// Unparseable tokens are silently excluded; the run fails only when
/// nothing is analyzable.
///
/// # Errors
///
/// - [`BenfordError::EmptyInput`] when the input has no tokens at all
/// - [`BenfordError::NoValidNumbers`] when every token is rejected
/// - [`BenfordError::NoValidDigits`] when no valid leading digit results
pub fn analyze(raw: &str, config: &AnalysisConfig) -> Result<AnalysisOutcome, BenfordError> {
    let tokens = normalize::tokenize(raw);
    if tokens.is_empty() {
        return Err(BenfordError::EmptyInput);
    }

    let (values, _rejected) = normalize::clean_numbers(tokens.iter().copied());
    if values.is_empty() {
        return Err(BenfordError::NoValidNumbers {
            parsed: tokens.len(),
        });
    }

    analyze_values(&values, config)
}

/// Analyzes one column of CSV input.
///
/// The column's raw cells feed the same normalization as free-form
/// text, so a header row is excluded naturally (it fails numeric
/// normalization) rather than by position.
///
/// # Errors
///
/// As [`analyze`], plus [`BenfordError::CsvParse`] for structurally
/// broken CSV.
pub fn analyze_csv(
    input: &str,
    column: usize,
    config: &AnalysisConfig,
) -> Result<AnalysisOutcome, BenfordError> {
    let rows = csv_parser::parse_rows(input)?;
    let tokens = csv_parser::column_tokens(&rows, column);
    if tokens.is_empty() {
        return Err(BenfordError::EmptyInput);
    }

    let (values, _rejected) = normalize::clean_numbers(tokens.iter().map(String::as_str));
    if values.is_empty() {
        return Err(BenfordError::NoValidNumbers {
            parsed: tokens.len(),
        });
    }

    analyze_values(&values, config)
}

/// Analyzes pre-parsed numeric values.
///
/// Values without a leading digit (zero, non-finite) are excluded from
/// the histogram; the run fails with [`BenfordError::NoValidDigits`]
/// if none remain.
pub fn analyze_values(
    values: &[f64],
    config: &AnalysisConfig,
) -> Result<AnalysisOutcome, BenfordError> {
    if values.is_empty() {
        return Err(BenfordError::EmptyInput);
    }

    let histogram = digits::aggregate(values);
    let total = histogram.total();
    if total == 0 {
        return Err(BenfordError::NoValidDigits);
    }

    let observed = histogram.observed_percentages();
    let expected = expected_percentages();
    let anomalies = anomaly::detect_anomalies(&observed, expected, config.threshold);

    let digits: [DigitResult; 9] = std::array::from_fn(|i| {
        let difference_pct = (observed[i] - expected[i]).abs();
        DigitResult {
            digit: (i + 1) as u8,
            count: histogram.counts()[i],
            observed_pct: observed[i],
            expected_pct: expected[i],
            difference_pct,
            is_anomaly: difference_pct > config.threshold,
        }
    });

    let max_deviation_pct = digits.iter().map(|r| r.difference_pct).fold(0.0, f64::max);
    let mean_deviation_pct =
        digits.iter().map(|r| r.difference_pct).sum::<f64>() / digits.len() as f64;
    let conformity_score = (100.0 - mean_deviation_pct * 10.0).max(0.0);

    Ok(AnalysisOutcome {
        digits,
        total,
        anomalies,
        threshold: config.threshold,
        small_sample: total < SMALL_SAMPLE_LIMIT,
        chi_squared: chi_squared_test(&observed, expected, total),
        mad: mad_test(&observed, expected),
        deviation: DeviationSummary {
            max_deviation_pct,
            mean_deviation_pct,
            conformity_score,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{ConformityTier, CRITICAL_P001};

    // ── Pipeline scenarios ───────────────────────────────────────

    #[test]
    fn scenario_five_distinct_digits() {
        let outcome = analyze("123,45,6,7,89", &AnalysisConfig::default()).unwrap();
        assert_eq!(outcome.total, 5);

        for (digit, count) in [(1usize, 1usize), (4, 1), (6, 1), (7, 1), (8, 1), (2, 0), (9, 0)] {
            assert_eq!(outcome.digits[digit - 1].count, count, "digit {digit}");
        }
        // Each present digit holds 20% observed share.
        assert!((outcome.digits[0].observed_pct - 20.0).abs() < 1e-9);
        assert!((outcome.digits[1].observed_pct).abs() < 1e-9);
        assert!(outcome.chi_squared.statistic > 0.0);
    }

    #[test]
    fn scenario_nine_copies_of_one_hundred() {
        let input = vec!["100"; 9].join("\n");
        let outcome = analyze(&input, &AnalysisConfig::default()).unwrap();

        let d1 = outcome.digits[0];
        assert_eq!(d1.count, 9);
        assert!((d1.observed_pct - 100.0).abs() < 1e-9);
        assert!((d1.expected_pct - 30.103).abs() < 0.001);
        assert!((d1.difference_pct - 69.897).abs() < 0.001);
        assert!(d1.is_anomaly);
        assert!(outcome.anomalies.contains(&1));
        assert!(outcome.has_anomalies());
    }

    #[test]
    fn mixed_garbage_is_excluded_not_fatal() {
        // Tokenizing splits "$2,000" into "$2" and "000": the former is
        // accepted as 2, the latter rejected as non-positive.
        let outcome = analyze("100, oops, $2,000, -5, 30", &AnalysisConfig::default()).unwrap();
        assert_eq!(outcome.total, 3); // 100, 2, 30
        assert_eq!(outcome.digits[0].count, 1);
        assert_eq!(outcome.digits[1].count, 1);
        assert_eq!(outcome.digits[2].count, 1);
    }

    #[test]
    fn empty_input_errors() {
        assert_eq!(
            analyze("", &AnalysisConfig::default()).unwrap_err(),
            BenfordError::EmptyInput
        );
        assert_eq!(
            analyze("  \n\t ", &AnalysisConfig::default()).unwrap_err(),
            BenfordError::EmptyInput
        );
    }

    #[test]
    fn all_tokens_rejected_errors() {
        let err = analyze("a, b, c", &AnalysisConfig::default()).unwrap_err();
        assert_eq!(err, BenfordError::NoValidNumbers { parsed: 3 });
    }

    #[test]
    fn small_sample_advisory() {
        let small = analyze("1,2,3,4,5,6,7,8,9", &AnalysisConfig::default()).unwrap();
        assert!(small.small_sample);

        let input = (10..=19).map(|i| i.to_string()).collect::<Vec<_>>().join(",");
        let enough = analyze(&input, &AnalysisConfig::default()).unwrap();
        assert!(!enough.small_sample);
    }

    // ── Invariants ───────────────────────────────────────────────

    #[test]
    fn counts_sum_to_total_and_percentages_to_one_hundred() {
        let input = "11,22,33,44,55,66,77,88,99,12,23,34";
        let outcome = analyze(input, &AnalysisConfig::default()).unwrap();

        let count_sum: usize = outcome.digits.iter().map(|r| r.count).sum();
        assert_eq!(count_sum, outcome.total);

        let pct_sum: f64 = outcome.digits.iter().map(|r| r.observed_pct).sum();
        assert!((pct_sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn anomaly_flags_consistent_with_anomaly_list() {
        let input = vec!["900"; 20].join(",");
        let outcome = analyze(&input, &AnalysisConfig::default()).unwrap();
        for r in &outcome.digits {
            assert_eq!(r.is_anomaly, outcome.anomalies.contains(&r.digit));
        }
    }

    #[test]
    fn threshold_one_hundred_flags_nothing() {
        let input = vec!["900"; 20].join(",");
        let outcome = analyze(&input, &AnalysisConfig::default().threshold(100.0)).unwrap();
        assert!(outcome.anomalies.is_empty());
        assert!(!outcome.has_anomalies());
        assert_eq!(outcome.threshold, 100.0);
    }

    #[test]
    fn outcome_is_replaced_wholesale() {
        let config = AnalysisConfig::default();
        let first = analyze("100,200,300", &config).unwrap();
        let second = analyze("900,900,900", &config).unwrap();
        // Independent outcomes: the first run is untouched by the second.
        assert_eq!(first.digits[0].count, 1);
        assert_eq!(second.digits[8].count, 3);
    }

    // ── analyze_values ───────────────────────────────────────────

    #[test]
    fn values_pipeline_skips_digit_less_entries() {
        let outcome =
            analyze_values(&[100.0, 0.0, f64::NAN, 250.0], &AnalysisConfig::default()).unwrap();
        assert_eq!(outcome.total, 2); // only 100 and 250 yield digits
        assert_eq!(outcome.digits[0].count, 1);
        assert_eq!(outcome.digits[1].count, 1);
    }

    #[test]
    fn values_pipeline_no_digits_errors() {
        let err = analyze_values(&[0.0, f64::NAN], &AnalysisConfig::default()).unwrap_err();
        assert_eq!(err, BenfordError::NoValidDigits);
    }

    #[test]
    fn values_pipeline_empty_errors() {
        assert_eq!(
            analyze_values(&[], &AnalysisConfig::default()).unwrap_err(),
            BenfordError::EmptyInput
        );
    }

    // ── analyze_csv ──────────────────────────────────────────────

    #[test]
    fn csv_column_pipeline() {
        let csv = "amount,label\n\"1,500\",a\n230.5,b\n$45,c\nnot-a-number,d\n";
        let outcome = analyze_csv(csv, 0, &AnalysisConfig::default()).unwrap();
        // Header and "not-a-number" are rejected; 1500, 230.5, 45 remain.
        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.digits[0].count, 1); // 1500
        assert_eq!(outcome.digits[1].count, 1); // 230.5
        assert_eq!(outcome.digits[3].count, 1); // 45
    }

    #[test]
    fn csv_non_numeric_column_errors() {
        let csv = "amount,label\n100,a\n200,b\n";
        let err = analyze_csv(csv, 1, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, BenfordError::NoValidNumbers { .. }));
    }

    #[test]
    fn csv_out_of_range_column_errors() {
        let csv = "amount\n100\n";
        let err = analyze_csv(csv, 7, &AnalysisConfig::default()).unwrap_err();
        assert_eq!(err, BenfordError::EmptyInput);
    }

    #[test]
    fn csv_structural_error_propagates() {
        let err = analyze_csv("\"oops\n", 0, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, BenfordError::CsvParse { .. }));
    }

    // ── Conformity of generated data ─────────────────────────────

    #[test]
    fn generated_dataset_conforms() {
        use crate::generator::{generate, GeneratorConfig};

        let tokens = generate(&GeneratorConfig::default().count(10_000).seed(Some(42))).unwrap();
        let input = tokens.join("\n");
        let outcome = analyze(&input, &AnalysisConfig::default()).unwrap();

        assert_eq!(outcome.total, 10_000);
        assert!(
            outcome.chi_squared.statistic < CRITICAL_P001,
            "chi² = {}",
            outcome.chi_squared.statistic
        );
        assert!(outcome.anomalies.is_empty());
        // MAD tiers are calibrated on proportion scale while the inputs
        // are percentages, so even a conforming sample lands in Low.
        assert_eq!(outcome.mad.conformity, ConformityTier::Low);
    }

    // ── CSV export ───────────────────────────────────────────────

    #[test]
    fn csv_export_round_trips() {
        let input = "123,45,6,7,89,123,23,34,45,56";
        let outcome = analyze(input, &AnalysisConfig::default()).unwrap();
        let csv = outcome.to_csv();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Digit,Count,Observed %,Expected %,Difference %"
        );
        for (row, r) in lines.zip(outcome.digits.iter()) {
            let fields: Vec<&str> = row.split(',').collect();
            assert_eq!(fields[0].parse::<u8>().unwrap(), r.digit);
            assert_eq!(fields[1].parse::<usize>().unwrap(), r.count);
            // One-decimal rounding: re-parsed values match within 0.05.
            let observed: f64 = fields[2].parse().unwrap();
            let expected: f64 = fields[3].parse().unwrap();
            let difference: f64 = fields[4].parse().unwrap();
            assert!((observed - r.observed_pct).abs() <= 0.05 + 1e-12);
            assert!((expected - r.expected_pct).abs() <= 0.05 + 1e-12);
            assert!((difference - r.difference_pct).abs() <= 0.05 + 1e-12);
        }
    }

    // ── Cumulative curves ────────────────────────────────────────

    #[test]
    fn cumulative_curves_end_at_one_hundred() {
        let input = "11,22,33,44,55,66,77,88,99,10";
        let outcome = analyze(input, &AnalysisConfig::default()).unwrap();
        let (observed, expected) = outcome.cumulative();

        assert_eq!(observed.len(), 9);
        assert_eq!(expected.len(), 9);
        assert!((observed[8] - 100.0).abs() < 1e-6);
        assert!((expected[8] - 100.0).abs() < 1e-6);
        for w in observed.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    // ── Deviation summary ────────────────────────────────────────

    #[test]
    fn deviation_summary_fields() {
        let input = vec!["100"; 9].join(",");
        let outcome = analyze(&input, &AnalysisConfig::default()).unwrap();
        let dev = outcome.deviation;

        assert!((dev.max_deviation_pct - 69.897).abs() < 0.001);
        assert!(dev.mean_deviation_pct > 0.0);
        assert!(dev.max_deviation_pct >= dev.mean_deviation_pct);
        // Mean deviation here is ~15.5 points, so the score bottoms out.
        assert_eq!(dev.conformity_score, 0.0);
    }

    #[test]
    fn conformity_score_stays_in_bounds() {
        let input = "11,22,33,44,55,66,77,88,99";
        let outcome = analyze(input, &AnalysisConfig::default()).unwrap();
        assert!(outcome.deviation.conformity_score >= 0.0);
        assert!(outcome.deviation.conformity_score <= 100.0);
    }
}
