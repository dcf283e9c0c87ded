//! Official List Validator: coverage gate against `emoji-test.txt`.
//!
//! # Invariants
//! - Both sides are compared on variation-selector-free hexcodes, so
//!   unqualified and fully-qualified spellings of one emoji match.
//! - Built records carrying `Emoji_Component` are exempt from `extra`.
//! - Reported deltas are sorted and name the most canonical spelling.

use crate::build::flatten::iter_emoji_data;
use crate::model::emoji::EmojiMap;
use crate::model::hexcode::{self, Hexcode};
use crate::model::official::{OfficialList, Qualification};
use crate::model::property::Property;
use log::{error, info};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Sizes of both sides after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfficialListSummary {
    pub official: usize,
    pub built: usize,
}

/// Fatal drift between the built map and the official list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfficialListDrift {
    /// Listed officially but absent from the built map.
    pub missing: Vec<Hexcode>,
    /// Built but absent from the official list.
    pub extra: Vec<Hexcode>,
}

impl OfficialListDrift {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

impl Display for OfficialListDrift {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "built data drifted from the official emoji list: {} missing, {} extra",
            self.missing.len(),
            self.extra.len()
        )?;
        if !self.missing.is_empty() {
            write!(f, "\n  missing: {}", self.missing.join(", "))?;
        }
        if !self.extra.is_empty() {
            write!(f, "\n  extra: {}", self.extra.join(", "))?;
        }
        Ok(())
    }
}

impl Error for OfficialListDrift {}

/// Compares the flattened built map against the official list.
///
/// # Errors
/// - Returns [`OfficialListDrift`] with exact deltas on any mismatch.
pub fn validate_against_official_list(
    map: &EmojiMap,
    official: &OfficialList,
) -> Result<OfficialListSummary, OfficialListDrift> {
    let mut expected: BTreeMap<Hexcode, (&str, Qualification)> = BTreeMap::new();
    for (hexcode, status) in official.iter() {
        let key = hexcode::strip_variation_selectors(hexcode);
        let replace = match expected.get(&key) {
            Some((_, existing)) => !existing.is_canonical() && status.is_canonical(),
            None => true,
        };
        if replace {
            expected.insert(key, (hexcode.as_str(), status));
        }
    }

    let mut built: BTreeMap<Hexcode, (&str, bool)> = BTreeMap::new();
    for emoji in iter_emoji_data(map) {
        let exempt = emoji.has_property(Property::EmojiComponent);
        built
            .entry(hexcode::strip_variation_selectors(&emoji.hexcode))
            .or_insert((emoji.hexcode.as_str(), exempt));
    }

    let mut drift = OfficialListDrift::default();
    for (key, (hexcode, _)) in &expected {
        if !built.contains_key(key) {
            drift.missing.push((*hexcode).to_string());
        }
    }
    for (key, (hexcode, exempt)) in &built {
        if !*exempt && !expected.contains_key(key) {
            drift.extra.push((*hexcode).to_string());
        }
    }
    drift.missing.sort();
    drift.extra.sort();

    if drift.is_empty() {
        info!(
            "event=validate_official module=build status=ok official={} built={}",
            expected.len(),
            built.len()
        );
        Ok(OfficialListSummary {
            official: expected.len(),
            built: built.len(),
        })
    } else {
        error!(
            "event=validate_official module=build status=error missing={} extra={}",
            drift.missing.len(),
            drift.extra.len()
        );
        Err(drift)
    }
}
