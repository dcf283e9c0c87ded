//! Canonical emoji data model.
//!
//! # Responsibility
//! - Define the hexcode identity key and its token helpers.
//! - Define the closed property tag set and presentation type.
//! - Define the canonical `Emoji` record and the lookup tables joined into it.
//!
//! # Invariants
//! - Every record is identified by exactly one uppercase hexcode.
//! - `group`/`subgroup`/`order` and `variations` are all-or-nothing by type.

pub mod emoji;
pub mod hexcode;
pub mod official;
pub mod property;
pub mod skin_tone;
