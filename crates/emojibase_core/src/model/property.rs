//! Closed set of Unicode emoji property labels.
//!
//! # Invariants
//! - Labels round-trip exactly through `as_str`/`FromStr` and serde.
//! - Presentation and naming rules use the predicates here, never raw strings.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Property label attached to a code point or sequence by a Unicode data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Property {
    #[serde(rename = "Basic_Emoji")]
    BasicEmoji,
    #[serde(rename = "Emoji")]
    Emoji,
    #[serde(rename = "Emoji_Presentation")]
    EmojiPresentation,
    /// Modifies complex sequences (hair style, skin tone, joiners); never
    /// a stand-alone emoji.
    #[serde(rename = "Emoji_Component")]
    EmojiComponent,
    #[serde(rename = "Emoji_Modifier")]
    EmojiModifier,
    /// Can be followed by a skin-tone modifier.
    #[serde(rename = "Emoji_Modifier_Base")]
    EmojiModifierBase,
    #[serde(rename = "Emoji_Modifier_Sequence")]
    EmojiModifierSequence,
    #[serde(rename = "Emoji_Keycap_Sequence")]
    EmojiKeycapSequence,
    #[serde(rename = "Emoji_Flag_Sequence")]
    EmojiFlagSequence,
    #[serde(rename = "Emoji_Tag_Sequence")]
    EmojiTagSequence,
    #[serde(rename = "Emoji_ZWJ_Sequence")]
    EmojiZwjSequence,
    #[serde(rename = "Emoji_Combining_Sequence")]
    EmojiCombiningSequence,
    /// Reserved slots for future allocations.
    #[serde(rename = "Extended_Pictographic")]
    ExtendedPictographic,
    #[serde(rename = "Regional_Indicator")]
    RegionalIndicator,
    #[serde(rename = "RGI_Emoji_Flag_Sequence")]
    RgiEmojiFlagSequence,
    #[serde(rename = "RGI_Emoji_Modifier_Sequence")]
    RgiEmojiModifierSequence,
    #[serde(rename = "RGI_Emoji_Tag_Sequence")]
    RgiEmojiTagSequence,
    #[serde(rename = "RGI_Emoji_ZWJ_Sequence")]
    RgiEmojiZwjSequence,
}

const ALL_PROPERTIES: &[Property] = &[
    Property::BasicEmoji,
    Property::Emoji,
    Property::EmojiPresentation,
    Property::EmojiComponent,
    Property::EmojiModifier,
    Property::EmojiModifierBase,
    Property::EmojiModifierSequence,
    Property::EmojiKeycapSequence,
    Property::EmojiFlagSequence,
    Property::EmojiTagSequence,
    Property::EmojiZwjSequence,
    Property::EmojiCombiningSequence,
    Property::ExtendedPictographic,
    Property::RegionalIndicator,
    Property::RgiEmojiFlagSequence,
    Property::RgiEmojiModifierSequence,
    Property::RgiEmojiTagSequence,
    Property::RgiEmojiZwjSequence,
];

impl Property {
    pub fn all() -> &'static [Property] {
        ALL_PROPERTIES
    }

    /// Label as written in Unicode data files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BasicEmoji => "Basic_Emoji",
            Self::Emoji => "Emoji",
            Self::EmojiPresentation => "Emoji_Presentation",
            Self::EmojiComponent => "Emoji_Component",
            Self::EmojiModifier => "Emoji_Modifier",
            Self::EmojiModifierBase => "Emoji_Modifier_Base",
            Self::EmojiModifierSequence => "Emoji_Modifier_Sequence",
            Self::EmojiKeycapSequence => "Emoji_Keycap_Sequence",
            Self::EmojiFlagSequence => "Emoji_Flag_Sequence",
            Self::EmojiTagSequence => "Emoji_Tag_Sequence",
            Self::EmojiZwjSequence => "Emoji_ZWJ_Sequence",
            Self::EmojiCombiningSequence => "Emoji_Combining_Sequence",
            Self::ExtendedPictographic => "Extended_Pictographic",
            Self::RegionalIndicator => "Regional_Indicator",
            Self::RgiEmojiFlagSequence => "RGI_Emoji_Flag_Sequence",
            Self::RgiEmojiModifierSequence => "RGI_Emoji_Modifier_Sequence",
            Self::RgiEmojiTagSequence => "RGI_Emoji_Tag_Sequence",
            Self::RgiEmojiZwjSequence => "RGI_Emoji_ZWJ_Sequence",
        }
    }

    /// Whether the label names a sequence (ends in `Sequence`).
    pub fn is_sequence(self) -> bool {
        self.as_str().ends_with("Sequence")
    }

    /// Whether the label alone forces the `EMOJI` presentation.
    pub fn presents_as_emoji(self) -> bool {
        matches!(self, Self::BasicEmoji | Self::EmojiPresentation) || self.is_sequence()
    }

    /// Flag and tag sequences whose names come from the file description.
    pub fn is_flag_or_tag_sequence(self) -> bool {
        matches!(
            self,
            Self::EmojiFlagSequence
                | Self::RgiEmojiFlagSequence
                | Self::EmojiTagSequence
                | Self::RgiEmojiTagSequence
        )
    }
}

impl Display for Property {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPropertyError(pub String);

impl Display for UnknownPropertyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown emoji property `{}`", self.0)
    }
}

impl Error for UnknownPropertyError {}

impl FromStr for Property {
    type Err = UnknownPropertyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        ALL_PROPERTIES
            .iter()
            .copied()
            .find(|property| property.as_str() == trimmed)
            .ok_or_else(|| UnknownPropertyError(trimmed.to_string()))
    }
}
