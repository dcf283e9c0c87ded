//! Variation Deduplicator.
//!
//! A presentation form like `00A9-FE0F` is sourced as its own record and is
//! also the `variations.emoji` target of `00A9`. Only the canonical record
//! stays addressable; the pair is the sole path to the other form.

use crate::model::emoji::EmojiMap;
use crate::model::hexcode::Hexcode;
use log::{debug, info, warn};

/// Removes top-level records that are variation targets of another record.
///
/// Labels of a removed record are kept on the canonical record's
/// `variations.property`; its tone variants move over under every tone key
/// the canonical record lacks. Variants under keys the canonical record
/// already has are dropped with a warning. Returns the number of removed
/// records.
pub fn merge_duplicate_variations(map: &mut EmojiMap) -> usize {
    let mut duplicates: Vec<(Hexcode, Hexcode)> = Vec::new();
    for (hexcode, emoji) in map.iter() {
        let Some(variation) = &emoji.variations else {
            continue;
        };
        for target in [&variation.text, &variation.emoji] {
            if target != hexcode && map.contains_key(target) {
                duplicates.push((hexcode.clone(), target.clone()));
            }
        }
    }

    let mut merged = 0usize;
    for (canonical, duplicate) in duplicates {
        // A record can be both a canonical and, elsewhere, a duplicate.
        if !map.contains_key(&canonical) {
            continue;
        }
        let Some(removed) = map.remove(&duplicate) else {
            continue;
        };
        let Some(record) = map.get_mut(&canonical) else {
            continue;
        };

        if let Some(variation) = record.variations.as_mut() {
            variation
                .property
                .get_or_insert_with(Default::default)
                .extend(removed.property.iter().copied());
        }
        if let Some(derived) = removed.modifications {
            let target = record.modifications.get_or_insert_with(Default::default);
            let mut dropped: Vec<Hexcode> = Vec::new();
            for (key, emoji) in derived {
                if target.contains_key(&key) {
                    dropped.push(emoji.hexcode);
                } else {
                    target.insert(key, emoji);
                }
            }
            if !dropped.is_empty() {
                warn!(
                    "event=variation_merged module=build status=partial canonical={} duplicate={} dropped={}",
                    canonical,
                    duplicate,
                    dropped.join(",")
                );
            }
        }

        merged += 1;
        debug!(
            "event=variation_merged module=build status=ok canonical={} duplicate={}",
            canonical, duplicate
        );
    }

    info!(
        "event=merge_variations module=build status=ok merged={} total={}",
        merged,
        map.len()
    );
    merged
}
