//! Property files: `emoji-data.txt`, `emoji-sequences.txt`,
//! `emoji-zwj-sequences.txt`.

use crate::model::emoji::EmojiData;
use crate::model::property::Property;
use crate::parse::line::parse_property_line;
use crate::parse::ParsedTable;
use log::{debug, info, warn};

/// Labels that never describe an emoji record. `Extended_Pictographic`
/// reserves unassigned code point blocks.
const IGNORED_PROPERTIES: &[Property] = &[Property::ExtendedPictographic];

/// Parses a whole property file, merging labels for hexcodes listed on
/// several lines.
///
/// `source` is only used to label log events.
pub fn parse_property_file(source: &str, text: &str) -> ParsedTable<EmojiData> {
    let mut table = ParsedTable::new();
    let mut ignored = 0usize;

    for (index, raw) in text.lines().enumerate() {
        let line = match parse_property_line(raw) {
            Ok(Some(line)) => line,
            Ok(None) => continue,
            Err(err) => {
                table.lines_skipped += 1;
                warn!(
                    "event=line_skipped module=parse status=skipped source={} line={} reason={}",
                    source,
                    index + 1,
                    err
                );
                continue;
            }
        };

        if IGNORED_PROPERTIES.contains(&line.property) {
            ignored += 1;
            continue;
        }

        table.lines_parsed += 1;
        // `a..b` descriptions name the range, not its members.
        let description = if line.hexcodes.len() == 1 {
            line.description.as_str()
        } else {
            ""
        };
        for hexcode in line.hexcodes {
            table
                .entries
                .entry(hexcode.clone())
                .and_modify(|existing: &mut EmojiData| {
                    existing.property.insert(line.property);
                    if existing.description.is_empty() {
                        existing.description = description.to_string();
                    }
                })
                .or_insert_with(|| EmojiData {
                    hexcode,
                    description: description.to_string(),
                    property: [line.property].into_iter().collect(),
                    unicode_version: line.version.unicode_version(),
                    version: line.version.value(),
                });
        }
    }

    if ignored > 0 {
        debug!(
            "event=lines_ignored module=parse status=ok source={} count={}",
            source, ignored
        );
    }
    info!(
        "event=file_parsed module=parse status=ok source={} records={} lines={} skipped={}",
        source,
        table.entries.len(),
        table.lines_parsed,
        table.lines_skipped
    );

    table
}
