//! Flat view of the artifact for downstream consumers.

use crate::model::emoji::{Emoji, EmojiMap};

/// Borrows every record, each base followed by its derived records.
pub fn iter_emoji_data(map: &EmojiMap) -> impl Iterator<Item = &Emoji> {
    map.values().flat_map(|emoji| {
        std::iter::once(emoji).chain(
            emoji
                .modifications
                .iter()
                .flat_map(|modifications| modifications.values()),
        )
    })
}

/// Owned flat list: bases without `modifications`, followed by their derived
/// records.
pub fn flatten_emoji_data(map: &EmojiMap) -> Vec<Emoji> {
    let mut flat = Vec::with_capacity(map.len());
    for emoji in map.values() {
        let mut base = emoji.clone();
        let modifications = base.modifications.take();
        flat.push(base);
        if let Some(modifications) = modifications {
            flat.extend(modifications.into_values());
        }
    }
    flat
}
