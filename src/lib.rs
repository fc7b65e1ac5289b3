//! # benford-insight
//!
//! Benford's Law conformity engine for numeric datasets.
//!
//! benford-insight extracts leading significant digits from raw input,
//! compares their empirical distribution against the theoretical
//! Benford distribution, runs two goodness-of-fit tests (chi-squared
//! and Mean Absolute Deviation), flags per-digit anomalies against a
//! configurable threshold, and generates synthetic Benford-conforming
//! datasets via inverse-transform sampling.
//!
//! The whole engine is pure and synchronous: each analysis call builds
//! one self-contained [`analysis::AnalysisOutcome`], with no shared
//! mutable state between runs. The only side effect anywhere is the
//! generator reading its entropy source, and that is seedable.
//!
//! ## Modules
//!
//! - [`normalize`] — free-form text to strictly positive numbers
//! - [`digits`] — leading-digit extraction and frequency aggregation
//! - [`reference`] — the theoretical Benford distribution, computed once
//! - [`stats`] — chi-squared and MAD goodness-of-fit tests
//! - [`anomaly`] — per-digit threshold-based anomaly detection
//! - [`generator`] — synthetic Benford-conforming data, seedable
//! - [`analysis`] — pipeline orchestration and result assembly
//! - [`csv_parser`] — quote-aware CSV splitting for column input
//! - [`error`] — error types
//!
//! ## Quick Start
//!
//! ```
//! use benford_insight::analysis::{analyze, AnalysisConfig};
//!
//! let input = "120, 180, 1100, 250, 3400, 160, 420, 510, 190, 2200";
//! let outcome = analyze(input, &AnalysisConfig::default()).unwrap();
//!
//! assert_eq!(outcome.total, 10);
//! assert_eq!(outcome.digits.len(), 9);
//! assert_eq!(outcome.chi_squared.degrees_of_freedom, 8);
//!
//! // Digit 1 leads five of the ten values.
//! assert_eq!(outcome.digits[0].count, 5);
//! ```

pub mod analysis;
pub mod anomaly;
pub mod csv_parser;
pub mod digits;
pub mod error;
pub mod generator;
pub mod normalize;
pub mod reference;
pub mod stats;
