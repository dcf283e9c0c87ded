//! Emoji record and joined lookup tables.
//!
//! # Responsibility
//! - Define the partial record produced by property-file parsers.
//! - Define the canonical record progressively enriched by build stages.
//!
//! # Invariants
//! - `property` is a set; joining the same label twice is a no-op.
//! - `presentation` is derived by the metadata stage, never sourced.
//! - A record inside `modifications` is never also a top-level key.

use crate::model::hexcode::Hexcode;
use crate::model::property::Property;
use crate::model::skin_tone::ToneKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Default presentation of an emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Presentation {
    /// Colorful pictograph.
    Emoji,
    /// Plain glyph.
    Text,
}

/// Placement from the official ordering file. All three values or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPlacement {
    pub group: u32,
    pub subgroup: u32,
    pub order: u32,
}

/// Text and emoji presentation forms of the same semantic emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiVariation {
    pub text: Hexcode,
    pub emoji: Hexcode,
    /// Labels of duplicate records folded into this pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<BTreeSet<Property>>,
}

impl EmojiVariation {
    pub fn new(text: impl Into<Hexcode>, emoji: impl Into<Hexcode>) -> Self {
        Self {
            text: text.into(),
            emoji: emoji.into(),
            property: None,
        }
    }

    /// Whether `hexcode` is either presentation form of this pair.
    pub fn targets(&self, hexcode: &str) -> bool {
        self.text == hexcode || self.emoji == hexcode
    }
}

/// Partial record parsed from one property file line.
#[derive(Debug, Clone, PartialEq)]
pub struct EmojiData {
    pub hexcode: Hexcode,
    pub description: String,
    pub property: BTreeSet<Property>,
    pub unicode_version: Option<f64>,
    pub version: f64,
}

impl EmojiData {
    pub fn new(hexcode: impl Into<Hexcode>, property: Property, version: f64) -> Self {
        Self {
            hexcode: hexcode.into(),
            description: String::new(),
            property: BTreeSet::from([property]),
            unicode_version: None,
            version,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Canonical record keyed by hexcode in the final artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emoji {
    pub hexcode: Hexcode,
    pub description: String,
    pub property: BTreeSet<Property>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub presentation: Option<Presentation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unicode_version: Option<f64>,
    pub version: f64,
    #[serde(flatten)]
    pub placement: Option<GroupPlacement>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variations: Option<EmojiVariation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoticon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifications: Option<BTreeMap<ToneKey, Emoji>>,
    /// Set only on derived records stored inside `modifications`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<ToneKey>,
    /// Populated by locale collaborators outside the build pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcodes: Option<Vec<String>>,
}

impl Emoji {
    /// Creates an identity-only record from parsed property data.
    pub fn from_data(data: &EmojiData) -> Self {
        Self {
            hexcode: data.hexcode.clone(),
            description: data.description.clone(),
            property: data.property.clone(),
            presentation: None,
            unicode_version: data.unicode_version,
            version: data.version,
            placement: None,
            name: String::new(),
            variations: None,
            emoticon: None,
            modifications: None,
            tone: None,
            shortcodes: None,
        }
    }

    pub fn has_property(&self, property: Property) -> bool {
        self.property.contains(&property)
    }

    /// Number of derived records stored under this base.
    pub fn modification_count(&self) -> usize {
        self.modifications.as_ref().map_or(0, BTreeMap::len)
    }
}

/// Final artifact: hexcode -> canonical record.
pub type EmojiMap = BTreeMap<Hexcode, Emoji>;
/// Parsed property file: hexcode -> partial record.
pub type EmojiDataMap = BTreeMap<Hexcode, EmojiData>;
/// Per-code-point official names.
pub type NamesMap = BTreeMap<Hexcode, String>;
pub type GroupMap = BTreeMap<Hexcode, GroupPlacement>;
/// Keyed by the base (selector-free) hexcode.
pub type VariationMap = BTreeMap<Hexcode, EmojiVariation>;
pub type EmoticonMap = BTreeMap<Hexcode, String>;
