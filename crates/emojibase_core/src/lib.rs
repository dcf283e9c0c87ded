//! Core build pipeline for the emojibase dataset.
//! This crate is the single source of truth for record invariants.

pub mod build;
pub mod cache;
pub mod config;
pub mod logging;
pub mod model;
pub mod parse;
pub mod source;

pub use build::flatten::{flatten_emoji_data, iter_emoji_data};
pub use build::official::{OfficialListDrift, OfficialListSummary};
pub use build::service::{build_emoji_data, BuildOutcome, BuildReport, EmojiBuildService};
pub use build::verify::{IntegrityReport, IntegrityViolation, ViolationKind};
pub use build::{BuildError, BuildResult};
pub use cache::{
    open_cache_db, open_cache_db_in_memory, ArtifactCache, CacheError, CacheResult,
    NoopArtifactCache, SqliteArtifactCache,
};
pub use config::{BuildConfig, ConfigError, TonePairPolicy, LATEST_EMOJI_VERSION};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::emoji::{Emoji, EmojiMap, Presentation};
pub use model::hexcode::Hexcode;
pub use model::property::Property;
pub use model::skin_tone::{SkinTone, ToneKey};
pub use source::{load_sources, DirectorySourceLoader, SourceError, SourceLoader};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
