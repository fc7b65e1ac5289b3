//! Error types for benford-insight.

use std::fmt;

/// All errors produced by benford-insight operations.
#[derive(Debug, Clone, PartialEq)]
pub enum BenfordError {
    /// No input data supplied at all.
    EmptyInput,
    /// Every supplied token was rejected by normalization.
    NoValidNumbers { parsed: usize },
    /// Valid numbers yielded no leading digit (defensive; should not occur
    /// when values come through normalization).
    NoValidDigits,
    /// A caller-supplied parameter is out of range.
    InvalidParameter { name: String, message: String },
    /// CSV input is structurally broken.
    CsvParse { line: usize, message: String },
}

impl fmt::Display for BenfordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "no data provided to analyze"),
            Self::NoValidNumbers { parsed } => {
                write!(f, "no valid positive numbers among {parsed} tokens")
            }
            Self::NoValidDigits => write!(f, "no valid leading digits found"),
            Self::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Self::CsvParse { line, message } => {
                write!(f, "CSV parse error at line {line}: {message}")
            }
        }
    }
}

impl std::error::Error for BenfordError {}
