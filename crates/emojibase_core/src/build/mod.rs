//! Build/join/verify pipeline.
//!
//! # Responsibility
//! - Join parsed sources into one canonical record per hexcode.
//! - Derive presentation, names, and skin-tone variants.
//! - Gate the result on integrity and official-list coverage.
//!
//! # Invariants
//! - Stages run strictly in sequence over a single-owner map.
//! - A gate failure aborts the build; nothing partial is returned.
//!
//! # See also
//! - `service` for the cache-aware driver.

use crate::cache::CacheError;
use crate::config::ConfigError;
use crate::source::SourceError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod dedupe_variations;
pub mod flatten;
pub mod join_data;
pub mod join_metadata;
pub mod join_modifiers;
pub mod official;
pub mod service;
pub mod verify;

use official::OfficialListDrift;
use verify::IntegrityReport;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug)]
pub enum BuildError {
    Config(ConfigError),
    Source(SourceError),
    Cache(CacheError),
    Integrity(IntegrityReport),
    OfficialListDrift(OfficialListDrift),
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid build configuration: {err}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::Cache(err) => write!(f, "{err}"),
            Self::Integrity(report) => write!(f, "{report}"),
            Self::OfficialListDrift(drift) => write!(f, "{drift}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Source(err) => Some(err),
            Self::Cache(err) => Some(err),
            Self::Integrity(report) => Some(report),
            Self::OfficialListDrift(drift) => Some(drift),
        }
    }
}

impl From<ConfigError> for BuildError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<SourceError> for BuildError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<CacheError> for BuildError {
    fn from(value: CacheError) -> Self {
        Self::Cache(value)
    }
}

impl From<IntegrityReport> for BuildError {
    fn from(value: IntegrityReport) -> Self {
        Self::Integrity(value)
    }
}

impl From<OfficialListDrift> for BuildError {
    fn from(value: OfficialListDrift) -> Self {
        Self::OfficialListDrift(value)
    }
}
