//! Hexcode identity helpers.
//!
//! # Responsibility
//! - Normalize code point tokens into the canonical hexcode spelling.
//! - Classify tokens (skin-tone modifiers, joiners, variation selectors).
//!
//! # Invariants
//! - Tokens are uppercase hex with a minimum width of 4 digits.
//! - Hexcodes join tokens with `-` and never contain empty tokens.

use crate::model::skin_tone::SkinTone;
use once_cell::sync::Lazy;
use regex::Regex;

/// Hyphen-joined uppercase code point sequence, e.g. `1F468-200D-1F4BB`.
pub type Hexcode = String;

pub const HEXCODE_DELIMITER: char = '-';
pub const ZERO_WIDTH_JOINER: &str = "200D";
pub const TEXT_VARIATION_SELECTOR: &str = "FE0E";
pub const EMOJI_VARIATION_SELECTOR: &str = "FE0F";

const MAX_CODEPOINT: u32 = 0x10FFFF;

static CODEPOINT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]{1,6}$").expect("valid codepoint regex"));
static SKIN_MODIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1F3F[B-F]$").expect("valid skin modifier regex"));
static SEQUENCE_REMOVAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(200D|FE0E|FE0F)$").expect("valid sequence removal regex"));

/// Formats one code point with the canonical 4-digit minimum width.
pub fn format_codepoint(codepoint: u32) -> String {
    format!("{codepoint:04X}")
}

/// Parses one hex token into a code point.
///
/// Returns `None` for non-hex input or values above U+10FFFF.
pub fn parse_codepoint(token: &str) -> Option<u32> {
    let trimmed = token.trim();
    if !CODEPOINT_RE.is_match(trimmed) {
        return None;
    }
    u32::from_str_radix(trimmed, 16)
        .ok()
        .filter(|value| *value <= MAX_CODEPOINT)
}

/// Re-encodes one token in canonical spelling (`1f600` -> `1F600`, `23` -> `0023`).
pub fn normalize_token(token: &str) -> Option<String> {
    parse_codepoint(token).map(format_codepoint)
}

/// Builds a hexcode from whitespace-separated code points as written in
/// Unicode data files (`1F468 200D 1F4BB`).
pub fn from_codepoints(raw: &str) -> Option<Hexcode> {
    let mut tokens = Vec::new();
    for token in raw.split_whitespace() {
        tokens.push(normalize_token(token)?);
    }
    if tokens.is_empty() {
        return None;
    }
    Some(join(tokens))
}

/// Splits a hexcode into its code point tokens.
pub fn split(hexcode: &str) -> impl Iterator<Item = &str> {
    hexcode
        .split(HEXCODE_DELIMITER)
        .filter(|token| !token.is_empty())
}

/// Joins tokens with the hexcode delimiter.
pub fn join<I, S>(tokens: I) -> Hexcode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hexcode = String::new();
    for token in tokens {
        if !hexcode.is_empty() {
            hexcode.push(HEXCODE_DELIMITER);
        }
        hexcode.push_str(token.as_ref());
    }
    hexcode
}

/// Returns whether the token is one of the 5 skin-tone modifiers.
pub fn is_skin_modifier(token: &str) -> bool {
    SKIN_MODIFIER_RE.is_match(token)
}

/// Returns whether the token is a joiner or variation selector that carries
/// no name of its own inside a sequence.
pub fn is_sequence_joiner(token: &str) -> bool {
    SEQUENCE_REMOVAL_RE.is_match(token)
}

/// Returns whether the token is `FE0E` or `FE0F`.
pub fn is_variation_selector(token: &str) -> bool {
    token == TEXT_VARIATION_SELECTOR || token == EMOJI_VARIATION_SELECTOR
}

/// Removes variation selectors, yielding the presentation-agnostic identity.
pub fn strip_variation_selectors(hexcode: &str) -> Hexcode {
    join(split(hexcode).filter(|token| !is_variation_selector(token)))
}

/// Removes skin-tone modifiers.
pub fn strip_skin_tones(hexcode: &str) -> Hexcode {
    join(split(hexcode).filter(|token| !is_skin_modifier(token)))
}

/// Returns the skin tones in order of appearance.
pub fn skin_tones(hexcode: &str) -> Vec<SkinTone> {
    split(hexcode).filter_map(SkinTone::from_token).collect()
}

/// Returns whether every token is a joiner or variation selector.
pub fn is_joiner_only(hexcode: &str) -> bool {
    let mut tokens = split(hexcode).peekable();
    tokens.peek().is_some() && tokens.all(is_sequence_joiner)
}
