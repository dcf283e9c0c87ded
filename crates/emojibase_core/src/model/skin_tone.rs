//! Skin-tone modifiers and the keys of the `modifications` map.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the 5 Fitzpatrick skin-tone modifiers (`1F3FB`..`1F3FF`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkinTone {
    Light,
    MediumLight,
    Medium,
    MediumDark,
    Dark,
}

impl SkinTone {
    pub const ALL: [SkinTone; 5] = [
        SkinTone::Light,
        SkinTone::MediumLight,
        SkinTone::Medium,
        SkinTone::MediumDark,
        SkinTone::Dark,
    ];

    /// 1-based tone index used in tone keys.
    pub fn index(self) -> u8 {
        match self {
            Self::Light => 1,
            Self::MediumLight => 2,
            Self::Medium => 3,
            Self::MediumDark => 4,
            Self::Dark => 5,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index).checked_sub(1)?).copied()
    }

    /// Modifier code point token, e.g. `1F3FD` for `Medium`.
    pub fn hexcode(self) -> &'static str {
        match self {
            Self::Light => "1F3FB",
            Self::MediumLight => "1F3FC",
            Self::Medium => "1F3FD",
            Self::MediumDark => "1F3FE",
            Self::Dark => "1F3FF",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tone| tone.hexcode() == token)
    }
}

/// Key of one derived record inside `modifications`.
///
/// Serialized as `"3"` for a single tone and `"1-4"` for a two-person pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToneKey {
    Single(SkinTone),
    Pair(SkinTone, SkinTone),
}

impl ToneKey {
    /// Tones in the order they are applied to the base sequence.
    pub fn tones(self) -> Vec<SkinTone> {
        match self {
            Self::Single(tone) => vec![tone],
            Self::Pair(first, second) => vec![first, second],
        }
    }

    pub fn is_pair(self) -> bool {
        matches!(self, Self::Pair(..))
    }

    /// Builds a key from tones found in a sourced sequence.
    pub fn from_tones(tones: &[SkinTone]) -> Option<Self> {
        match tones {
            [tone] => Some(Self::Single(*tone)),
            [first, second] => Some(Self::Pair(*first, *second)),
            _ => None,
        }
    }
}

impl Display for ToneKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(tone) => write!(f, "{}", tone.index()),
            Self::Pair(first, second) => write!(f, "{}-{}", first.index(), second.index()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseToneKeyError(pub String);

impl Display for ParseToneKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid tone key `{}`", self.0)
    }
}

impl Error for ParseToneKeyError {}

impl FromStr for ToneKey {
    type Err = ParseToneKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parse_tone = |part: &str| {
            part.parse::<u8>()
                .ok()
                .and_then(SkinTone::from_index)
                .ok_or_else(|| ParseToneKeyError(value.to_string()))
        };

        match value.split_once('-') {
            Some((first, second)) => Ok(Self::Pair(parse_tone(first)?, parse_tone(second)?)),
            None => Ok(Self::Single(parse_tone(value)?)),
        }
    }
}

impl Serialize for ToneKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ToneKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ToneKeyVisitor;

        impl Visitor<'_> for ToneKeyVisitor {
            type Value = ToneKey;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("a tone key such as `3` or `1-4`")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ToneKey, E> {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(ToneKeyVisitor)
    }
}
