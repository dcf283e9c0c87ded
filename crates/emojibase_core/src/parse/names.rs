//! `UnicodeData.txt` character names.
//!
//! Format: `1F600;GRINNING FACE;So;0;ON;;;;;N;;;;;` (no comments).

use crate::model::hexcode;
use crate::parse::ParsedTable;
use log::warn;

/// Parses code point names, lowercased.
///
/// Placeholder names (`<control>`, `<CJK Ideograph, First>`) are counted as
/// parsed but not stored.
pub fn parse_unicode_data(text: &str) -> ParsedTable<String> {
    let mut table = ParsedTable::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split(';');
        let codepoint = fields.next().and_then(hexcode::normalize_token);
        let name = fields.next().map(str::trim).filter(|name| !name.is_empty());

        let (Some(codepoint), Some(name)) = (codepoint, name) else {
            table.lines_skipped += 1;
            warn!(
                "event=line_skipped module=parse status=skipped source=UnicodeData.txt line={} reason=malformed_name_line",
                index + 1
            );
            continue;
        };

        table.lines_parsed += 1;
        if name.starts_with('<') {
            continue;
        }
        table.entries.insert(codepoint, name.to_lowercase());
    }

    table
}
