//! Quote-aware CSV splitting for column-based input.
//!
//! Presentation layers feed one selected column of a CSV file into the
//! analysis pipeline. This module does only the structural work: it
//! splits text into rows of string fields, honoring double-quoted
//! fields, `""` escapes, CRLF line endings, and a leading BOM. Type
//! interpretation is left to [`normalize`](crate::normalize) — a
//! header cell is simply a token that fails numeric normalization.
//!
//! # Example
//!
//! ```
//! use benford_insight::csv_parser::{column_tokens, parse_rows};
//!
//! let csv = "amount,label\n\"1,500\",a\n230,b\n";
//! let rows = parse_rows(csv).unwrap();
//! assert_eq!(rows.len(), 3);
//! assert_eq!(column_tokens(&rows, 0), vec!["amount", "1,500", "230"]);
//! ```

use crate::error::BenfordError;

/// Parses CSV text into rows of string fields.
///
/// Handles quoted fields (commas and newlines inside quotes), escaped
/// quotes (`""`), `\r\n` and bare `\r` line endings, and a UTF-8 BOM.
/// Trailing empty rows are dropped. Rows may be ragged; missing cells
/// are the caller's concern.
///
/// # Errors
///
/// [`BenfordError::CsvParse`] when a quoted field is left unterminated.
pub fn parse_rows(input: &str) -> Result<Vec<Vec<String>>, BenfordError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut current_row: Vec<String> = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut quote_open_line = 0;
    let mut line = 1;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current_field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                if c == '\n' {
                    line += 1;
                }
                current_field.push(c);
            }
        } else if c == '"' && current_field.is_empty() {
            in_quotes = true;
            quote_open_line = line;
        } else if c == ',' {
            current_row.push(std::mem::take(&mut current_field));
        } else if c == '\n' {
            if current_field.ends_with('\r') {
                current_field.truncate(current_field.len() - 1);
            }
            current_row.push(std::mem::take(&mut current_field));
            rows.push(std::mem::take(&mut current_row));
            line += 1;
        } else if c == '\r' && chars.peek() != Some(&'\n') {
            // Bare \r (old Mac style) acts as a newline.
            current_row.push(std::mem::take(&mut current_field));
            rows.push(std::mem::take(&mut current_row));
            line += 1;
        } else if c != '\r' {
            current_field.push(c);
        }
    }

    if in_quotes {
        return Err(BenfordError::CsvParse {
            line: quote_open_line,
            message: "unterminated quoted field".into(),
        });
    }

    // Last row without a trailing newline.
    if !current_field.is_empty() || !current_row.is_empty() {
        current_row.push(current_field);
        rows.push(current_row);
    }

    while rows
        .last()
        .is_some_and(|r| r.iter().all(|f| f.trim().is_empty()))
    {
        rows.pop();
    }

    Ok(rows)
}

/// Splits a single CSV line into fields, quote-aware.
///
/// ```
/// use benford_insight::csv_parser::split_line;
///
/// assert_eq!(split_line("a,b,c"), vec!["a", "b", "c"]);
/// assert_eq!(split_line("\"1,500\",x"), vec!["1,500", "x"]);
/// assert_eq!(split_line("\"say \"\"hi\"\"\""), vec!["say \"hi\""]);
/// ```
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' && current.is_empty() {
            in_quotes = true;
        } else if c == ',' {
            fields.push(std::mem::take(&mut current).trim().to_string());
        } else {
            current.push(c);
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Number of columns in the widest row.
pub fn column_count(rows: &[Vec<String>]) -> usize {
    rows.iter().map(Vec::len).max().unwrap_or(0)
}

/// Extracts one column's non-empty cells as trimmed tokens.
///
/// Rows without the column (ragged input) are skipped silently, as are
/// empty cells. An out-of-range index yields an empty vector.
pub fn column_tokens(rows: &[Vec<String>], index: usize) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get(index))
        .map(|cell| cell.trim().to_string())
        .filter(|cell| !cell.is_empty())
        .collect()
}
