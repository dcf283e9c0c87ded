//! Artifact cache: persisted build results keyed by emoji version.
//!
//! # Responsibility
//! - Open and migrate the SQLite cache database.
//! - Read and write finished emoji maps as JSON payloads.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Only maps that passed both build gates are written.
//! - A payload that no longer decodes is an error, not a cache miss.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod artifact_store;
pub mod migrations;
mod open;

pub use artifact_store::{ArtifactCache, NoopArtifactCache, SqliteArtifactCache};
pub use open::{open_cache_db, open_cache_db_in_memory};

pub type CacheResult<T> = Result<T, CacheError>;

#[derive(Debug)]
pub enum CacheError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    Serialization(serde_json::Error),
    InvalidData(String),
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "cache schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Serialization(err) => write!(f, "cache payload encoding failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid cached artifact: {message}"),
        }
    }
}

impl Error for CacheError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for CacheError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}
