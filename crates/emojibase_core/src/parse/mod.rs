//! Parsers for Unicode emoji data files.
//!
//! # Responsibility
//! - Turn raw file text into hexcode-keyed tables.
//! - Recover locally from malformed lines: skip, log a warning, count.
//!
//! # Invariants
//! - A single bad line never aborts a parse.
//! - Skipped-line counts are surfaced to callers through `ParsedTable`.

use crate::model::hexcode::Hexcode;
use std::collections::BTreeMap;

pub mod emoji_test;
pub mod line;
pub mod names;
pub mod property_file;
pub mod range;
pub mod variations;

/// Hexcode-keyed parse output with line accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable<T> {
    pub entries: BTreeMap<Hexcode, T>,
    pub lines_parsed: usize,
    pub lines_skipped: usize,
}

impl<T> ParsedTable<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            lines_parsed: 0,
            lines_skipped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for ParsedTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
