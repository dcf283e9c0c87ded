//! Data Joiner: merges parsed property tables into canonical records.

use crate::model::emoji::{Emoji, EmojiDataMap, EmojiMap};
use log::debug;

/// Merges one parsed property table into `acc`.
///
/// New hexcodes create identity-only records. Existing ones union their
/// property labels; description and version stamps follow the latest
/// non-empty source. Joining the same table twice leaves `acc` unchanged.
pub fn join_data(acc: &mut EmojiMap, partial: &EmojiDataMap) {
    let mut created = 0usize;
    let mut merged = 0usize;

    for (hexcode, data) in partial {
        match acc.get_mut(hexcode) {
            Some(existing) => {
                existing.property.extend(data.property.iter().copied());
                if !data.description.is_empty() {
                    existing.description = data.description.clone();
                }
                if data.unicode_version.is_some() {
                    existing.unicode_version = data.unicode_version;
                }
                existing.version = data.version;
                merged += 1;
            }
            None => {
                acc.insert(hexcode.clone(), Emoji::from_data(data));
                created += 1;
            }
        }
    }

    debug!(
        "event=join_data module=build status=ok created={} merged={} total={}",
        created,
        merged,
        acc.len()
    );
}
