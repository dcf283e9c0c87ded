//! Line grammar shared by Unicode emoji property files.
//!
//! Grammar (whitespace around delimiters is insignificant):
//!
//! ```text
//! <codepoints-or-range> ; <property> [; <description>] # <version> [<count>] <glyph> <description>
//! ```
//!
//! `#`-prefixed lines and blank lines carry no record.
//!
//! # Invariants
//! - `parse_line` never fails; structural problems surface in
//!   `parse_property_line` as a `LineParseError` so callers can skip the line.

use crate::model::hexcode::{self, Hexcode};
use crate::model::property::Property;
use crate::parse::range::{self, RangeError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(E)?(\d+\.\d+)(?:\[\d+\])?$").expect("valid version regex"));
static CODEPOINT_ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\x\{([0-9A-Fa-f]{1,6})\}").expect("valid escape regex"));

/// Data fields and trailing comment of one non-comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub fields: Vec<String>,
    pub comment: String,
}

/// Version stamp read from the line comment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VersionStamp {
    /// `E13.0` style stamp.
    Emoji(f64),
    /// Bare stamp used by legacy files (`6.1`).
    Unicode(f64),
}

impl VersionStamp {
    pub fn value(self) -> f64 {
        match self {
            Self::Emoji(value) | Self::Unicode(value) => value,
        }
    }

    /// Unicode version when the file stamped one.
    pub fn unicode_version(self) -> Option<f64> {
        match self {
            Self::Emoji(_) => None,
            Self::Unicode(value) => Some(value),
        }
    }
}

/// One structured property record before range expansion into the table.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyLine {
    /// Expanded hexcodes (several for a range, one for a sequence).
    pub hexcodes: Vec<Hexcode>,
    pub property: Property,
    pub version: VersionStamp,
    pub description: String,
}

/// Reason a property line was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineParseError {
    MissingDelimiter,
    MissingProperty,
    UnknownProperty(String),
    InvalidCodepoints(String),
    InvalidRange(RangeError),
    MissingVersion,
}

impl Display for LineParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDelimiter => write!(f, "missing `;` field delimiter"),
            Self::MissingProperty => write!(f, "missing property label"),
            Self::UnknownProperty(label) => write!(f, "unknown property label `{label}`"),
            Self::InvalidCodepoints(raw) => write!(f, "invalid code points `{raw}`"),
            Self::InvalidRange(err) => write!(f, "{err}"),
            Self::MissingVersion => write!(f, "missing version stamp in comment"),
        }
    }
}

impl Error for LineParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRange(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RangeError> for LineParseError {
    fn from(value: RangeError) -> Self {
        Self::InvalidRange(value)
    }
}

/// Splits a raw line into `;`-separated fields and its `#` comment.
///
/// Returns `None` for blank and comment-only lines. Trailing empty fields
/// (from a dangling `;`) are dropped.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (body, comment) = match trimmed.split_once('#') {
        Some((body, comment)) => (body, comment.trim()),
        None => (trimmed, ""),
    };

    let mut fields: Vec<String> = body.split(';').map(|field| field.trim().to_string()).collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }

    Some(ParsedLine {
        fields,
        comment: comment.to_string(),
    })
}

/// Parses one property-file line into a structured record.
///
/// `Ok(None)` means the line carries no record (blank or comment).
pub fn parse_property_line(line: &str) -> Result<Option<PropertyLine>, LineParseError> {
    let Some(parsed) = parse_line(line) else {
        return Ok(None);
    };

    if parsed.fields.len() < 2 {
        return Err(LineParseError::MissingDelimiter);
    }

    let label = parsed.fields[1].as_str();
    if label.is_empty() {
        return Err(LineParseError::MissingProperty);
    }
    let property: Property = label
        .parse()
        .map_err(|_| LineParseError::UnknownProperty(label.to_string()))?;

    let hexcodes = expand_codepoints(&parsed.fields[0])?;
    let comment = split_comment(&parsed.comment);
    let version = comment.version.ok_or(LineParseError::MissingVersion)?;

    let description = match parsed.fields.get(2) {
        Some(field) if !field.is_empty() => decode_escapes(field),
        _ => comment.description,
    };

    Ok(Some(PropertyLine {
        hexcodes,
        property,
        version,
        description,
    }))
}

/// Expands the first field: a range, a single code point, or a
/// space-separated sequence.
pub fn expand_codepoints(field: &str) -> Result<Vec<Hexcode>, LineParseError> {
    if range::is_range(field) {
        return Ok(range::expand_range(field)?);
    }
    hexcode::from_codepoints(field)
        .map(|hexcode| vec![hexcode])
        .ok_or_else(|| LineParseError::InvalidCodepoints(field.to_string()))
}

/// Decodes `\x{23}` code point escapes used in sequence descriptions.
/// Escapes that do not name a valid character are kept verbatim.
pub fn decode_escapes(field: &str) -> String {
    CODEPOINT_ESCAPE_RE
        .replace_all(field, |captures: &regex::Captures<'_>| {
            hexcode::parse_codepoint(&captures[1])
                .and_then(char::from_u32)
                .map_or_else(|| captures[0].to_string(), String::from)
        })
        .into_owned()
}

#[derive(Debug, Clone, PartialEq)]
struct CommentParts {
    version: Option<VersionStamp>,
    description: String,
}

fn parse_version(token: &str) -> Option<VersionStamp> {
    let captures = VERSION_RE.captures(token)?;
    let value: f64 = captures.get(2)?.as_str().parse().ok()?;
    if captures.get(1).is_some() {
        Some(VersionStamp::Emoji(value))
    } else {
        Some(VersionStamp::Unicode(value))
    }
}

/// `E1.0 [80] (😀..🙏) grinning face..face with folded hands`
fn split_comment(comment: &str) -> CommentParts {
    let mut tokens = comment.split_whitespace().peekable();
    let version = tokens.peek().copied().and_then(parse_version);
    if version.is_some() {
        tokens.next();
    }

    if tokens
        .peek()
        .is_some_and(|token| token.starts_with('[') && token.ends_with(']'))
    {
        tokens.next();
    }

    let glyph = tokens.peek().copied();
    match glyph {
        Some(token) if token.starts_with('(') => {
            for token in tokens.by_ref() {
                if token.ends_with(')') {
                    break;
                }
            }
        }
        Some(token) if !token.is_ascii() => {
            tokens.next();
        }
        _ => {}
    }

    CommentParts {
        version,
        description: tokens.collect::<Vec<_>>().join(" "),
    }
}
