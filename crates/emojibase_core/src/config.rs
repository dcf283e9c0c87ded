//! Build configuration threaded explicitly into the pipeline.
//!
//! # Invariants
//! - Core stages never read version or policy from the environment.
//! - `emoji_version` is a `major.minor` pair once `validate()` passes.

use crate::model::skin_tone::SkinTone;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Newest emoji release this build knows how to ingest.
pub const LATEST_EMOJI_VERSION: &str = "15.1";

const ARTIFACT_KEY_PREFIX: &str = "emoji-data";

/// How two-person sequences combine tones.
///
/// Unicode lists all 25 pairs for sequences like "people holding hands";
/// `ExcludeSameTone` drops the 5 identical-tone pairs for data sets that
/// model those as single-tone sequences instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TonePairPolicy {
    #[default]
    IncludeSameTone,
    ExcludeSameTone,
}

impl TonePairPolicy {
    /// Ordered tone pairs this policy generates.
    pub fn pairs(self) -> Vec<(SkinTone, SkinTone)> {
        let mut pairs = Vec::with_capacity(25);
        for first in SkinTone::ALL {
            for second in SkinTone::ALL {
                if first == second && self == Self::ExcludeSameTone {
                    continue;
                }
                pairs.push((first, second));
            }
        }
        pairs
    }

    pub fn pair_count(self) -> usize {
        match self {
            Self::IncludeSameTone => 25,
            Self::ExcludeSameTone => 20,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::IncludeSameTone => "include-same",
            Self::ExcludeSameTone => "exclude-same",
        }
    }
}

impl FromStr for TonePairPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "include-same" => Ok(Self::IncludeSameTone),
            "exclude-same" => Ok(Self::ExcludeSameTone),
            other => Err(ConfigError::InvalidTonePairPolicy(other.to_string())),
        }
    }
}

/// Inputs for one dataset build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Target emoji release, e.g. `15.1`.
    pub emoji_version: String,
    pub tone_pair_policy: TonePairPolicy,
    /// When `false`, a cached artifact is ignored and rebuilt (then rewritten).
    pub use_cache: bool,
}

impl BuildConfig {
    pub fn new(emoji_version: impl Into<String>) -> Self {
        Self {
            emoji_version: emoji_version.into(),
            tone_pair_policy: TonePairPolicy::default(),
            use_cache: true,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let version = self.emoji_version.trim();
        if version.is_empty() {
            return Err(ConfigError::EmptyVersion);
        }
        if !is_major_minor(version) {
            return Err(ConfigError::InvalidVersion(self.emoji_version.clone()));
        }
        Ok(())
    }

    /// Cache key of the finished artifact for this version.
    pub fn artifact_key(&self) -> String {
        format!("{ARTIFACT_KEY_PREFIX}:{}", self.emoji_version.trim())
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new(LATEST_EMOJI_VERSION)
    }
}

fn is_major_minor(value: &str) -> bool {
    let parts: Vec<&str> = value.split('.').collect();
    parts.len() == 2
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyVersion,
    InvalidVersion(String),
    InvalidTonePairPolicy(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyVersion => write!(f, "emoji version must not be empty"),
            Self::InvalidVersion(value) => {
                write!(f, "emoji version is invalid: {value} (expected major.minor)")
            }
            Self::InvalidTonePairPolicy(value) => write!(
                f,
                "tone pair policy is invalid: {value} (expected include-same|exclude-same)"
            ),
        }
    }
}

impl Error for ConfigError {}
