//! `emoji-test.txt`: official list, group/subgroup/order, short names.
//!
//! ```text
//! # group: Smileys & Emotion
//! # subgroup: face-smiling
//! 1F600 ; fully-qualified # 😀 E1.0 grinning face
//! ```
//!
//! # Invariants
//! - Groups and subgroups are numbered from 0 by first appearance.
//! - `order` starts at 1 and only advances on canonical entries.
//! - Canonical entries are also indexed under their selector-free hexcode,
//!   unless an earlier entry already claimed it.

use crate::model::emoji::{GroupMap, GroupPlacement, NamesMap};
use crate::model::hexcode;
use crate::model::official::{OfficialList, Qualification};
use crate::parse::line::parse_line;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

static GROUP_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s*group:\s*(.+)$").expect("valid group header regex"));
static SUBGROUP_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s*subgroup:\s*(.+)$").expect("valid subgroup header regex"));
static EMOJI_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^E\d+\.\d+$").expect("valid emoji version regex"));

/// Everything derived from one `emoji-test.txt`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmojiTestData {
    pub official: OfficialList,
    pub groups: GroupMap,
    /// Short names of single code points (e.g. `1F3FD` -> `medium skin tone`).
    pub names: NamesMap,
    pub lines_parsed: usize,
    pub lines_skipped: usize,
}

#[derive(Default)]
struct Numbering {
    groups: Vec<String>,
    subgroups: Vec<String>,
    current: Option<(u32, u32)>,
    current_group: Option<u32>,
    order: u32,
}

impl Numbering {
    fn index_of(names: &mut Vec<String>, name: &str) -> u32 {
        let position = match names.iter().position(|existing| existing == name) {
            Some(position) => position,
            None => {
                names.push(name.to_string());
                names.len() - 1
            }
        };
        u32::try_from(position).unwrap_or(u32::MAX)
    }

    fn enter_group(&mut self, name: &str) {
        let group = Self::index_of(&mut self.groups, name);
        self.current_group = Some(group);
        self.current = None;
    }

    fn enter_subgroup(&mut self, name: &str) {
        let subgroup = Self::index_of(&mut self.subgroups, name);
        self.current = self.current_group.map(|group| (group, subgroup));
    }
}

pub fn parse_emoji_test(text: &str) -> EmojiTestData {
    let mut data = EmojiTestData::default();
    let mut numbering = Numbering::default();

    for (index, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if let Some(captures) = GROUP_HEADER_RE.captures(trimmed) {
            numbering.enter_group(captures[1].trim());
            continue;
        }
        if let Some(captures) = SUBGROUP_HEADER_RE.captures(trimmed) {
            numbering.enter_subgroup(captures[1].trim());
            continue;
        }

        let Some(parsed) = parse_line(trimmed) else {
            continue;
        };

        let hexcode = parsed
            .fields
            .first()
            .and_then(|field| hexcode::from_codepoints(field));
        let status = parsed
            .fields
            .get(1)
            .and_then(|field| field.parse::<Qualification>().ok());

        let (Some(hexcode), Some(status)) = (hexcode, status) else {
            data.lines_skipped += 1;
            warn!(
                "event=line_skipped module=parse status=skipped source=emoji-test.txt line={} reason=malformed_test_line",
                index + 1
            );
            continue;
        };

        data.lines_parsed += 1;
        data.official.insert(hexcode.clone(), status);

        if !status.is_canonical() {
            continue;
        }

        let stripped = hexcode::strip_variation_selectors(&hexcode);
        if let Some((group, subgroup)) = numbering.current {
            numbering.order += 1;
            let placement = GroupPlacement {
                group,
                subgroup,
                order: numbering.order,
            };
            data.groups.entry(hexcode.clone()).or_insert(placement);
            data.groups.entry(stripped.clone()).or_insert(placement);
        }

        let name = short_name(&parsed.comment);
        if !name.is_empty() && hexcode::split(&stripped).count() == 1 {
            data.names.entry(stripped).or_insert(name);
        }
    }

    info!(
        "event=file_parsed module=parse status=ok source=emoji-test.txt records={} groups={} lines={} skipped={}",
        data.official.len(),
        numbering.groups.len(),
        data.lines_parsed,
        data.lines_skipped
    );

    data
}

/// `😀 E1.0 grinning face` -> `grinning face`; legacy comments without a
/// version drop the leading glyph.
fn short_name(comment: &str) -> String {
    let tokens: Vec<&str> = comment.split_whitespace().collect();
    let start = match tokens
        .iter()
        .position(|token| EMOJI_VERSION_RE.is_match(token))
    {
        Some(position) => position + 1,
        None => 1.min(tokens.len()),
    };
    tokens[start..].join(" ")
}

#[cfg(test)]
mod tests {
    use super::{parse_emoji_test, short_name};
    use crate::model::emoji::GroupPlacement;
    use crate::model::official::Qualification;

    const SAMPLE: &str = "\
# group: Smileys & Emotion

# subgroup: face-smiling
1F600                                                  ; fully-qualified     # 😀 E1.0 grinning face
1F601                                                  ; fully-qualified     # 😁 E0.6 beaming face with smiling eyes

# group: People & Body

# subgroup: hand-single-finger
261D FE0F                                              ; fully-qualified     # ☝️ E0.6 index pointing up
261D                                                   ; unqualified         # ☝ E0.6 index pointing up
261D 1F3FB                                             ; fully-qualified     # ☝🏻 E1.0 index pointing up: light skin tone
1F600 ; sort-of-qualified # ? broken
";

    #[test]
    fn numbers_groups_subgroups_and_order() {
        let data = parse_emoji_test(SAMPLE);
        assert_eq!(
            data.groups["1F601"],
            GroupPlacement {
                group: 0,
                subgroup: 0,
                order: 2
            }
        );
        assert_eq!(
            data.groups["261D-FE0F"],
            GroupPlacement {
                group: 1,
                subgroup: 1,
                order: 3
            }
        );
        assert_eq!(data.groups["261D"], data.groups["261D-FE0F"]);
        assert_eq!(data.groups["261D-1F3FB"].order, 4);
    }

    #[test]
    fn records_every_status_in_official_list() {
        let data = parse_emoji_test(SAMPLE);
        assert_eq!(data.official.len(), 5);
        assert_eq!(data.official.status("261D"), Some(Qualification::Unqualified));
        assert_eq!(data.lines_skipped, 1);
    }

    #[test]
    fn extracts_single_codepoint_names() {
        let data = parse_emoji_test(SAMPLE);
        assert_eq!(data.names["261D"], "index pointing up");
        assert_eq!(data.names["1F600"], "grinning face");
        assert!(!data.names.contains_key("261D-1F3FB"));
    }

    #[test]
    fn short_name_without_version_skips_glyph() {
        assert_eq!(short_name("😀 grinning face"), "grinning face");
        assert_eq!(short_name("😀 E1.0 grinning face"), "grinning face");
        assert_eq!(short_name(""), "");
    }
}
