//! Modifier Expander: skin-tone variants stored under their base record.
//!
//! # Responsibility
//! - Find modifier bases: single code points with `Emoji_Modifier_Base`,
//!   and sequences whose sourced toned variants strip back to them.
//! - Fill every base's `modifications` with one record per tone key.
//!
//! # Invariants
//! - Single-tone bases get exactly 5 variants; multi-person bases get
//!   `TonePairPolicy::pair_count()`.
//! - A sourced variant is moved under its base, never duplicated.
//! - Toned records whose base cannot be resolved stay top-level.

use crate::build::join_metadata::{apply_metadata, MetadataSources};
use crate::config::TonePairPolicy;
use crate::model::emoji::{Emoji, EmojiMap};
use crate::model::hexcode::{self, Hexcode, EMOJI_VARIATION_SELECTOR};
use crate::model::property::Property;
use crate::model::skin_tone::{SkinTone, ToneKey};
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseKind {
    SingleTone,
    MultiPerson,
}

impl BaseKind {
    fn tone_keys(self, policy: TonePairPolicy) -> Vec<ToneKey> {
        match self {
            Self::SingleTone => SkinTone::ALL.into_iter().map(ToneKey::Single).collect(),
            Self::MultiPerson => policy
                .pairs()
                .into_iter()
                .map(|(first, second)| ToneKey::Pair(first, second))
                .collect(),
        }
    }
}

/// Counters reported by [`join_modifiers_to_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierStats {
    pub bases: usize,
    /// Variants synthesized from the base hexcode.
    pub generated: usize,
    /// Sourced variants moved under their base.
    pub adopted: usize,
    /// Toned records left at the top level.
    pub unresolved: usize,
}

/// Expands skin-tone variants for every modifier base in `map`.
///
/// Runs after the metadata stage so adopted records already carry names
/// and placement; generated ones get theirs from `sources`.
pub fn join_modifiers_to_data(
    map: &mut EmojiMap,
    sources: &MetadataSources<'_>,
    policy: TonePairPolicy,
) -> ModifierStats {
    let mut stats = ModifierStats::default();

    let modifier_bases = single_modifier_bases(map);
    let targets = variation_targets(map);
    let index = base_index(map, &targets);

    let mut kinds: BTreeMap<Hexcode, BaseKind> = modifier_bases
        .iter()
        .map(|hexcode| (hexcode.clone(), BaseKind::SingleTone))
        .collect();
    let mut sourced: BTreeMap<(Hexcode, ToneKey), Hexcode> = BTreeMap::new();

    for (hexcode, tones) in toned_records(map) {
        let Some(key) = ToneKey::from_tones(&tones) else {
            stats.unresolved += 1;
            warn!(
                "event=modifier_unresolved module=build status=skipped hexcode={} reason=too_many_tones tones={}",
                hexcode,
                tones.len()
            );
            continue;
        };

        let stripped = hexcode::strip_variation_selectors(&hexcode::strip_skin_tones(&hexcode));
        let Some(base) = index.get(&stripped) else {
            stats.unresolved += 1;
            debug!(
                "event=modifier_unresolved module=build status=skipped hexcode={} reason=base_not_found",
                hexcode
            );
            continue;
        };

        let kind = if key.is_pair() {
            BaseKind::MultiPerson
        } else {
            BaseKind::SingleTone
        };
        kinds
            .entry(base.clone())
            .and_modify(|existing| {
                if kind == BaseKind::MultiPerson {
                    *existing = kind;
                }
            })
            .or_insert(kind);
        sourced.entry((base.clone(), key)).or_insert(hexcode);
    }

    for (base, kind) in kinds {
        let Some(template) = map.get(&base).cloned() else {
            continue;
        };

        let mut modifications = BTreeMap::new();
        for key in kind.tone_keys(policy) {
            let adopted = sourced
                .remove(&(base.clone(), key))
                .and_then(|hexcode| map.remove(&hexcode));
            let mut derived = match adopted {
                Some(record) => {
                    stats.adopted += 1;
                    record
                }
                None => {
                    stats.generated += 1;
                    generate_variant(&template, key, &modifier_bases, sources)
                }
            };
            derived.tone = Some(key);
            modifications.insert(key, derived);
        }

        if let Some(record) = map.get_mut(&base) {
            record.modifications = Some(modifications);
            stats.bases += 1;
        }
    }

    // Sourced variants outside the policy's key set (e.g. same-tone pairs
    // under `ExcludeSameTone`).
    stats.unresolved += sourced.len();

    info!(
        "event=join_modifiers module=build status=ok bases={} generated={} adopted={} unresolved={}",
        stats.bases, stats.generated, stats.adopted, stats.unresolved
    );

    stats
}

/// Inserts the tones of `key` into `base`.
///
/// The first tone follows the first modifier-base code point, the second
/// follows the last one; an `FE0F` directly after an insertion point is
/// dropped. Without a known modifier base, tones follow the first token.
pub fn insert_tones(base: &str, key: ToneKey, modifier_bases: &BTreeSet<Hexcode>) -> Hexcode {
    let tokens: Vec<&str> = hexcode::split(base).collect();

    let mut positions = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        if modifier_bases.contains(*token) {
            positions.push(index);
        }
    }
    let first = positions.first().copied().unwrap_or(0);
    let last = positions.last().copied().unwrap_or(first);

    let insertions = match key {
        ToneKey::Single(tone) => vec![(first, tone)],
        ToneKey::Pair(first_tone, second_tone) => vec![(first, first_tone), (last, second_tone)],
    };

    let mut output: Vec<&str> = Vec::with_capacity(tokens.len() + insertions.len());
    let mut after_tone = false;
    for (index, token) in tokens.iter().enumerate() {
        if after_tone && *token == EMOJI_VARIATION_SELECTOR {
            after_tone = false;
            continue;
        }
        after_tone = false;

        output.push(*token);
        for (position, tone) in &insertions {
            if *position == index {
                output.push(tone.hexcode());
                after_tone = true;
            }
        }
    }

    hexcode::join(output)
}

fn generate_variant(
    base: &Emoji,
    key: ToneKey,
    modifier_bases: &BTreeSet<Hexcode>,
    sources: &MetadataSources<'_>,
) -> Emoji {
    let hexcode = insert_tones(&base.hexcode, key, modifier_bases);
    let mut derived = Emoji {
        hexcode: hexcode.clone(),
        description: base.description.clone(),
        property: base.property.clone(),
        presentation: base.presentation,
        unicode_version: base.unicode_version,
        version: base.version,
        placement: None,
        name: String::new(),
        variations: None,
        emoticon: None,
        modifications: None,
        tone: Some(key),
        shortcodes: None,
    };
    apply_metadata(&hexcode, &mut derived, sources);
    derived
}

fn single_modifier_bases(map: &EmojiMap) -> BTreeSet<Hexcode> {
    map.iter()
        .filter(|(hexcode, emoji)| {
            hexcode::split(hexcode).count() == 1 && emoji.has_property(Property::EmojiModifierBase)
        })
        .map(|(hexcode, _)| hexcode.clone())
        .collect()
}

/// Hexcodes that are the alternate presentation form of another record.
fn variation_targets(map: &EmojiMap) -> BTreeSet<Hexcode> {
    let mut targets = BTreeSet::new();
    for (hexcode, emoji) in map {
        let Some(variation) = &emoji.variations else {
            continue;
        };
        for target in [&variation.text, &variation.emoji] {
            if target != hexcode {
                targets.insert(target.clone());
            }
        }
    }
    targets
}

/// Selector-free identity -> first untoned, non-variation record.
fn base_index(map: &EmojiMap, targets: &BTreeSet<Hexcode>) -> BTreeMap<Hexcode, Hexcode> {
    let mut index = BTreeMap::new();
    for hexcode in map.keys() {
        if targets.contains(hexcode) || !hexcode::skin_tones(hexcode).is_empty() {
            continue;
        }
        index
            .entry(hexcode::strip_variation_selectors(hexcode))
            .or_insert_with(|| hexcode.clone());
    }
    index
}

/// Records carrying at least one tone plus something to modify.
fn toned_records(map: &EmojiMap) -> Vec<(Hexcode, Vec<SkinTone>)> {
    map.keys()
        .filter_map(|hexcode| {
            let tones = hexcode::skin_tones(hexcode);
            if tones.is_empty() || hexcode::strip_skin_tones(hexcode).is_empty() {
                return None;
            }
            Some((hexcode.clone(), tones))
        })
        .collect()
}
