//! `emoji-variation-sequences.txt`: text/emoji presentation pairs.
//!
//! ```text
//! 00A9 FE0E ; text style;  # (1.1) COPYRIGHT SIGN
//! 00A9 FE0F ; emoji style; # (1.1) COPYRIGHT SIGN
//! ```

use crate::model::emoji::EmojiVariation;
use crate::model::hexcode::{self, Hexcode, EMOJI_VARIATION_SELECTOR, TEXT_VARIATION_SELECTOR};
use crate::parse::line::parse_line;
use crate::parse::ParsedTable;
use log::{debug, warn};
use std::collections::BTreeMap;

#[derive(Default)]
struct PendingPair {
    text: Option<Hexcode>,
    emoji: Option<Hexcode>,
}

/// Parses variation pairs keyed by base code point.
///
/// Bases listed with only one of the two selectors yield no pair.
pub fn parse_variation_sequences(text: &str) -> ParsedTable<EmojiVariation> {
    let mut table = ParsedTable::new();
    let mut pending: BTreeMap<Hexcode, PendingPair> = BTreeMap::new();

    for (index, raw) in text.lines().enumerate() {
        let Some(parsed) = parse_line(raw) else {
            continue;
        };

        let sequence = parsed
            .fields
            .first()
            .and_then(|field| hexcode::from_codepoints(field));
        let Some(sequence) = sequence else {
            table.lines_skipped += 1;
            warn!(
                "event=line_skipped module=parse status=skipped source=emoji-variation-sequences.txt line={} reason=invalid_codepoints",
                index + 1
            );
            continue;
        };

        let tokens: Vec<&str> = hexcode::split(&sequence).collect();
        let (base, selector) = match tokens.as_slice() {
            [base, selector] => (base.to_string(), *selector),
            _ => {
                table.lines_skipped += 1;
                warn!(
                    "event=line_skipped module=parse status=skipped source=emoji-variation-sequences.txt line={} reason=not_a_pair",
                    index + 1
                );
                continue;
            }
        };

        let is_text = match selector {
            TEXT_VARIATION_SELECTOR => true,
            EMOJI_VARIATION_SELECTOR => false,
            _ => {
                table.lines_skipped += 1;
                warn!(
                    "event=line_skipped module=parse status=skipped source=emoji-variation-sequences.txt line={} reason=unknown_selector",
                    index + 1
                );
                continue;
            }
        };

        let slot = pending.entry(base).or_default();
        if is_text {
            slot.text = Some(sequence.clone());
        } else {
            slot.emoji = Some(sequence.clone());
        }
        table.lines_parsed += 1;
    }

    for (base, pair) in pending {
        match (pair.text, pair.emoji) {
            (Some(text), Some(emoji)) => {
                table.entries.insert(base, EmojiVariation::new(text, emoji));
            }
            _ => debug!(
                "event=variation_incomplete module=parse status=skipped base={}",
                base
            ),
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::parse_variation_sequences;
    use crate::model::emoji::EmojiVariation;

    #[test]
    fn pairs_text_and_emoji_forms_by_base() {
        let text = "\
# emoji-variation-sequences.txt
0023 FE0E  ; text style;  # (1.1) NUMBER SIGN
0023 FE0F  ; emoji style; # (1.1) NUMBER SIGN
00A9 FE0F  ; emoji style; # (1.1) COPYRIGHT SIGN
";
        let table = parse_variation_sequences(text);
        assert_eq!(table.entries.len(), 1);
        assert_eq!(
            table.entries["0023"],
            EmojiVariation::new("0023-FE0E", "0023-FE0F")
        );
        assert_eq!(table.lines_parsed, 3);
    }

    #[test]
    fn rejects_non_selector_pairs() {
        let table = parse_variation_sequences("0023 20E3 ; keycap; # (1.1) NUMBER SIGN\n");
        assert!(table.entries.is_empty());
        assert_eq!(table.lines_skipped, 1);
    }
}
