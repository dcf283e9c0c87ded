//! Integrity Verifier: a hard gate over the assembled map.
//!
//! # Invariants
//! - Every violation is collected before failing; the report is complete.
//! - Derived records inside `modifications` are checked like top-level ones.

use crate::config::TonePairPolicy;
use crate::model::emoji::{Emoji, EmojiMap};
use crate::model::hexcode::{self, Hexcode};
use crate::model::property::Property;
use crate::model::skin_tone::SkinTone;
use log::{error, info};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    EmptyProperty,
    MissingPresentation,
    EmptyName,
    ModificationCount { expected: usize, actual: usize },
    /// The record's own hexcode differs from the key it is stored under.
    HexcodeMismatch { key: String },
    /// The hexcode is addressable from more than one place.
    DuplicateHexcode,
    IncompleteVariation,
    InvalidVersion,
}

impl Display for ViolationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyProperty => write!(f, "property set is empty"),
            Self::MissingPresentation => write!(f, "presentation type is missing"),
            Self::EmptyName => write!(f, "name is empty"),
            Self::ModificationCount { expected, actual } => {
                write!(f, "expected {expected} modifications, found {actual}")
            }
            Self::HexcodeMismatch { key } => write!(f, "stored under mismatched key {key}"),
            Self::DuplicateHexcode => write!(f, "hexcode is addressable more than once"),
            Self::IncompleteVariation => write!(f, "variation pair is incomplete"),
            Self::InvalidVersion => write!(f, "version stamp is invalid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityViolation {
    pub hexcode: Hexcode,
    pub kind: ViolationKind,
}

impl Display for IntegrityViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.hexcode, self.kind)
    }
}

/// Fatal report listing every violation found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub violations: Vec<IntegrityViolation>,
}

impl IntegrityReport {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether `hexcode` has at least one violation.
    pub fn mentions(&self, hexcode: &str) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.hexcode == hexcode)
    }

    fn push(&mut self, hexcode: &str, kind: ViolationKind) {
        self.violations.push(IntegrityViolation {
            hexcode: hexcode.to_string(),
            kind,
        });
    }
}

impl Display for IntegrityReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "data integrity check failed with {} violation(s)", self.len())?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl Error for IntegrityReport {}

/// Checks every record and returns how many were checked.
///
/// # Errors
/// - Returns the full [`IntegrityReport`] when any record is invalid.
pub fn verify_data_integrity(
    map: &EmojiMap,
    policy: TonePairPolicy,
) -> Result<usize, IntegrityReport> {
    let mut report = IntegrityReport::default();
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut checked = 0usize;

    for (key, emoji) in map {
        checked += verify_record(key, emoji, policy, &mut seen, &mut report);
    }

    if report.is_empty() {
        info!(
            "event=verify_integrity module=build status=ok records={}",
            checked
        );
        Ok(checked)
    } else {
        error!(
            "event=verify_integrity module=build status=error records={} violations={}",
            checked,
            report.len()
        );
        Err(report)
    }
}

fn verify_record<'a>(
    key: &str,
    emoji: &'a Emoji,
    policy: TonePairPolicy,
    seen: &mut BTreeSet<&'a str>,
    report: &mut IntegrityReport,
) -> usize {
    let hexcode = emoji.hexcode.as_str();

    if hexcode != key {
        report.push(hexcode, ViolationKind::HexcodeMismatch { key: key.to_string() });
    }
    if !seen.insert(hexcode) {
        report.push(hexcode, ViolationKind::DuplicateHexcode);
    }
    if emoji.property.is_empty() {
        report.push(hexcode, ViolationKind::EmptyProperty);
    }
    if emoji.presentation.is_none() {
        report.push(hexcode, ViolationKind::MissingPresentation);
    }
    if emoji.name.trim().is_empty() && !is_known_unnamed(emoji) {
        report.push(hexcode, ViolationKind::EmptyName);
    }
    if let Some(variation) = &emoji.variations {
        if variation.text.is_empty() || variation.emoji.is_empty() {
            report.push(hexcode, ViolationKind::IncompleteVariation);
        }
    }
    if !is_valid_version(emoji.version) || !emoji.unicode_version.map_or(true, is_valid_version) {
        report.push(hexcode, ViolationKind::InvalidVersion);
    }

    let mut checked = 1;
    if let Some(modifications) = &emoji.modifications {
        let expected = if modifications.keys().any(|key| key.is_pair()) {
            policy.pair_count()
        } else {
            SkinTone::ALL.len()
        };
        if modifications.len() != expected {
            report.push(
                hexcode,
                ViolationKind::ModificationCount {
                    expected,
                    actual: modifications.len(),
                },
            );
        }
        for derived in modifications.values() {
            checked += verify_record(&derived.hexcode, derived, policy, seen, report);
        }
    }
    checked
}

/// Joiners, selectors, and bare components carry no name of their own.
fn is_known_unnamed(emoji: &Emoji) -> bool {
    hexcode::is_joiner_only(&emoji.hexcode)
        || (emoji.property.len() == 1 && emoji.has_property(Property::EmojiComponent))
}

fn is_valid_version(version: f64) -> bool {
    version.is_finite() && version >= 0.0
}
