//! Code point range expansion (`1F600..1F64F`).

use crate::model::hexcode::{self, Hexcode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const RANGE_DELIMITER: &str = "..";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    InvalidCodepoint(String),
    Reversed { start: String, end: String },
}

impl Display for RangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCodepoint(token) => write!(f, "invalid code point `{token}`"),
            Self::Reversed { start, end } => {
                write!(f, "range start {start} is greater than end {end}")
            }
        }
    }
}

impl Error for RangeError {}

/// Returns whether the token uses the `X..Y` range form.
pub fn is_range(token: &str) -> bool {
    token.contains(RANGE_DELIMITER)
}

/// Expands `X..Y` into every code point from X to Y inclusive, or returns the
/// single normalized code point for a plain token.
///
/// Output tokens are uppercase hex with a 4-digit minimum width, ascending.
pub fn expand_range(token: &str) -> Result<Vec<Hexcode>, RangeError> {
    let token = token.trim();
    let Some((start_raw, end_raw)) = token.split_once(RANGE_DELIMITER) else {
        let single = hexcode::normalize_token(token)
            .ok_or_else(|| RangeError::InvalidCodepoint(token.to_string()))?;
        return Ok(vec![single]);
    };

    let start = hexcode::parse_codepoint(start_raw)
        .ok_or_else(|| RangeError::InvalidCodepoint(start_raw.trim().to_string()))?;
    let end = hexcode::parse_codepoint(end_raw)
        .ok_or_else(|| RangeError::InvalidCodepoint(end_raw.trim().to_string()))?;

    if start > end {
        return Err(RangeError::Reversed {
            start: hexcode::format_codepoint(start),
            end: hexcode::format_codepoint(end),
        });
    }

    Ok((start..=end).map(hexcode::format_codepoint).collect())
}
