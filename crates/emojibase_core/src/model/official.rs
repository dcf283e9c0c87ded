//! Authoritative per-version emoji list (`emoji-test.txt`).

use crate::model::hexcode::Hexcode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Qualification status of one official entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Qualification {
    Component,
    FullyQualified,
    MinimallyQualified,
    Unqualified,
}

impl Qualification {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::FullyQualified => "fully-qualified",
            Self::MinimallyQualified => "minimally-qualified",
            Self::Unqualified => "unqualified",
        }
    }

    /// Fully-qualified and component entries are the canonical spellings.
    pub fn is_canonical(self) -> bool {
        matches!(self, Self::Component | Self::FullyQualified)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownQualificationError(pub String);

impl Display for UnknownQualificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown qualification status `{}`", self.0)
    }
}

impl Error for UnknownQualificationError {}

impl FromStr for Qualification {
    type Err = UnknownQualificationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "component" => Ok(Self::Component),
            "fully-qualified" => Ok(Self::FullyQualified),
            "minimally-qualified" => Ok(Self::MinimallyQualified),
            "unqualified" => Ok(Self::Unqualified),
            other => Err(UnknownQualificationError(other.to_string())),
        }
    }
}

/// Hexcode -> qualification for one emoji version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialList {
    entries: BTreeMap<Hexcode, Qualification>,
}

impl OfficialList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hexcode: impl Into<Hexcode>, status: Qualification) {
        self.entries.insert(hexcode.into(), status);
    }

    pub fn remove(&mut self, hexcode: &str) -> Option<Qualification> {
        self.entries.remove(hexcode)
    }

    pub fn status(&self, hexcode: &str) -> Option<Qualification> {
        self.entries.get(hexcode).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Hexcode, Qualification)> {
        self.entries.iter().map(|(hexcode, status)| (hexcode, *status))
    }
}

impl FromIterator<(Hexcode, Qualification)> for OfficialList {
    fn from_iter<I: IntoIterator<Item = (Hexcode, Qualification)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
