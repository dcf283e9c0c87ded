//! Metadata Joiner: presentation, composite name, placement, variation pair,
//! and emoticon alias.
//!
//! # Invariants
//! - `presentation` is always set after this stage.
//! - An empty description is filled from the names table on an exact hit.
//! - Lookup misses omit the field; they never fail the build.

use crate::model::emoji::{
    Emoji, EmojiMap, EmoticonMap, GroupMap, NamesMap, Presentation, VariationMap,
};
use crate::model::hexcode::{self, Hexcode};
use crate::model::property::Property;
use crate::model::skin_tone::SkinTone;
use log::debug;
use std::collections::BTreeSet;

const NAME_SEPARATOR: &str = ", ";

/// Lookup tables consumed by [`join_metadata_to_data`].
#[derive(Debug, Clone, Copy)]
pub struct MetadataSources<'a> {
    pub names: &'a NamesMap,
    pub groups: &'a GroupMap,
    pub variations: &'a VariationMap,
    pub emoticons: &'a EmoticonMap,
}

/// `EMOJI` when any label implies emoji presentation, `TEXT` otherwise.
pub fn derive_presentation(property: &BTreeSet<Property>) -> Presentation {
    if property.iter().any(|label| label.presents_as_emoji()) {
        Presentation::Emoji
    } else {
        Presentation::Text
    }
}

/// Builds the display name of `hexcode` from per-code-point names.
///
/// Flag and tag sequences use their uppercased description. Otherwise
/// joiners are skipped and skin-tone names are moved to the end, so
/// `1F64B-1F3FD` reads `person raising hand, medium skin tone`.
pub fn assemble_name(
    hexcode: &str,
    property: &BTreeSet<Property>,
    description: &str,
    names: &NamesMap,
) -> String {
    if property.iter().any(|label| label.is_flag_or_tag_sequence()) {
        return description.to_uppercase();
    }

    let mut parts: Vec<&str> = Vec::new();
    let mut tones: Vec<SkinTone> = Vec::new();

    for token in hexcode::split(hexcode) {
        if hexcode::is_sequence_joiner(token) {
            continue;
        }
        if let Some(tone) = SkinTone::from_token(token) {
            if !tones.contains(&tone) {
                tones.push(tone);
            }
            continue;
        }
        if let Some(name) = names.get(token) {
            parts.push(name.as_str());
        }
    }

    for tone in tones {
        if let Some(name) = names.get(tone.hexcode()) {
            parts.push(name.as_str());
        }
    }

    parts.join(NAME_SEPARATOR)
}

/// Enriches every record in place with derived and looked-up metadata.
pub fn join_metadata_to_data(map: &mut EmojiMap, sources: &MetadataSources<'_>) {
    let mut unnamed: Vec<Hexcode> = Vec::new();

    for (hexcode, emoji) in map.iter_mut() {
        apply_metadata(hexcode, emoji, sources);
        if emoji.name.is_empty() {
            unnamed.push(hexcode.clone());
        }
    }

    if !unnamed.is_empty() {
        debug!(
            "event=join_metadata module=build status=partial unnamed={} first={}",
            unnamed.len(),
            unnamed[0]
        );
    }
}

pub(crate) fn apply_metadata(hexcode: &str, emoji: &mut Emoji, sources: &MetadataSources<'_>) {
    // Range members are sourced without a description of their own.
    if emoji.description.is_empty() {
        if let Some(name) = sources.names.get(hexcode) {
            emoji.description = name.clone();
        }
    }
    emoji.presentation = Some(derive_presentation(&emoji.property));
    emoji.name = assemble_name(hexcode, &emoji.property, &emoji.description, sources.names);

    if let Some(placement) = sources.groups.get(hexcode) {
        emoji.placement = Some(*placement);
    }
    if let Some(variation) = sources.variations.get(hexcode) {
        emoji.variations = Some(variation.clone());
    }
    if let Some(emoticon) = sources.emoticons.get(hexcode) {
        emoji.emoticon = Some(emoticon.clone());
    }
}
