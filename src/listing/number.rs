//! Numeric token parsing
//!
//! Marketplace text mixes decimal commas and thousands separators. One rule
//! is applied to every token of the form `\d+([.,]\d+)*`:
//!
//! 1. Both `,` and `.` present: the separator appearing last is the decimal
//!    point, every occurrence of the other one is dropped
//!    (`1,366.59` and `1.366,59` are both 1366.59).
//! 2. A single separator occurring once is the decimal point, so `1,234`
//!    reads as 1.234, never 1234.
//! 3. A separator repeated more than once is a thousands separator
//!    (`1,234,567` is 1234567).

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a numeric token into a [`Decimal`]
///
/// Returns `None` for anything that is not digits joined by `.`/`,`.
pub fn parse_number(token: &str) -> Option<Decimal> {
    let token = token.trim();
    if !token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }
    // Separators only ever sit between digits
    if !token.starts_with(|c: char| c.is_ascii_digit())
        || !token.ends_with(|c: char| c.is_ascii_digit())
        || token.contains(",,")
        || token.contains("..")
        || token.contains(",.")
        || token.contains(".,")
    {
        return None;
    }

    let last_comma = token.rfind(',');
    let last_dot = token.rfind('.');

    let normalized = match (last_comma, last_dot) {
        (None, None) => token.to_string(),
        (Some(comma), Some(dot)) => {
            let (decimal, thousands) = if comma > dot { (',', '.') } else { ('.', ',') };
            token
                .chars()
                .filter(|&c| c != thousands)
                .map(|c| if c == decimal { '.' } else { c })
                .collect()
        }
        (Some(_), None) => single_separator(token, ','),
        (None, Some(_)) => single_separator(token, '.'),
    };

    Decimal::from_str(&normalized).ok()
}

fn single_separator(token: &str, sep: char) -> String {
    if token.matches(sep).count() == 1 {
        token.replace(sep, ".")
    } else {
        token.replace(sep, "")
    }
}
