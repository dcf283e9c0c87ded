//! Build use-case service.
//!
//! # Responsibility
//! - Drive one dataset build: cache lookup, source loading, stages, gates,
//!   cache write.
//! - Keep loading and caching behind their traits.
//!
//! # Invariants
//! - A cache hit short-circuits every stage.
//! - The cache is written only after both gates pass.

use crate::build::dedupe_variations::merge_duplicate_variations;
use crate::build::join_data::join_data;
use crate::build::join_metadata::{join_metadata_to_data, MetadataSources};
use crate::build::join_modifiers::join_modifiers_to_data;
use crate::build::official::validate_against_official_list;
use crate::build::verify::verify_data_integrity;
use crate::build::BuildResult;
use crate::cache::ArtifactCache;
use crate::config::BuildConfig;
use crate::model::emoji::{Emoji, EmojiMap};
use crate::source::{load_sources, SourceBundle, SourceLoader};
use log::{error, info};
use serde::Serialize;
use std::time::Instant;

/// Summary of one build, cached or fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub emoji_version: String,
    pub from_cache: bool,
    /// Top-level records.
    pub records: usize,
    /// Derived records stored under `modifications`.
    pub modifications: usize,
    pub lines_skipped: usize,
    pub variations_merged: usize,
    pub tones_generated: usize,
    pub tones_adopted: usize,
}

impl BuildReport {
    fn cached(config: &BuildConfig, emojis: &EmojiMap) -> Self {
        Self {
            emoji_version: config.emoji_version.clone(),
            from_cache: true,
            records: emojis.len(),
            modifications: count_modifications(emojis),
            lines_skipped: 0,
            variations_merged: 0,
            tones_generated: 0,
            tones_adopted: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutcome {
    pub emojis: EmojiMap,
    pub report: BuildReport,
}

/// Cache-aware build driver over a loader and a cache implementation.
pub struct EmojiBuildService<L: SourceLoader, C: ArtifactCache> {
    loader: L,
    cache: C,
    config: BuildConfig,
}

impl<L: SourceLoader, C: ArtifactCache> EmojiBuildService<L, C> {
    pub fn new(loader: L, cache: C, config: BuildConfig) -> Self {
        Self {
            loader,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Returns the dataset for the configured version.
    ///
    /// # Errors
    /// - `Config` when the version is malformed.
    /// - `Source`/`Cache` on I/O failures.
    /// - `Integrity`/`OfficialListDrift` when a gate rejects the data; the
    ///   cache is left untouched.
    pub fn build(&self) -> BuildResult<BuildOutcome> {
        self.config.validate()?;
        let started_at = Instant::now();
        let key = self.config.artifact_key();
        info!(
            "event=build_start module=build status=start version={} use_cache={}",
            self.config.emoji_version, self.config.use_cache
        );

        if self.config.use_cache {
            if let Some(emojis) = self.cache.read_artifact(&key)? {
                let report = BuildReport::cached(&self.config, &emojis);
                info!(
                    "event=build_finish module=build status=ok source=cache version={} records={} duration_ms={}",
                    self.config.emoji_version,
                    report.records,
                    started_at.elapsed().as_millis()
                );
                return Ok(BuildOutcome { emojis, report });
            }
        }

        let result = load_sources(&self.loader, &self.config.emoji_version)
            .map_err(Into::into)
            .and_then(|sources| build_emoji_data(&sources, &self.config));
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(
                    "event=build_finish module=build status=error version={} duration_ms={} error={}",
                    self.config.emoji_version,
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        self.cache.write_artifact(&key, &outcome.emojis)?;
        info!(
            "event=build_finish module=build status=ok source=pipeline version={} records={} modifications={} duration_ms={}",
            self.config.emoji_version,
            outcome.report.records,
            outcome.report.modifications,
            started_at.elapsed().as_millis()
        );
        Ok(outcome)
    }
}

/// Runs every stage over already-loaded sources, without touching a cache.
pub fn build_emoji_data(sources: &SourceBundle, config: &BuildConfig) -> BuildResult<BuildOutcome> {
    let mut emojis = EmojiMap::new();
    join_data(&mut emojis, &sources.data.entries);
    join_data(&mut emojis, &sources.sequences.entries);
    join_data(&mut emojis, &sources.zwj_sequences.entries);

    let metadata = MetadataSources {
        names: &sources.names,
        groups: &sources.groups,
        variations: &sources.variations,
        emoticons: &sources.emoticons,
    };
    join_metadata_to_data(&mut emojis, &metadata);
    let tones = join_modifiers_to_data(&mut emojis, &metadata, config.tone_pair_policy);
    let variations_merged = merge_duplicate_variations(&mut emojis);

    verify_data_integrity(&emojis, config.tone_pair_policy)?;
    validate_against_official_list(&emojis, &sources.official)?;

    let report = BuildReport {
        emoji_version: config.emoji_version.clone(),
        from_cache: false,
        records: emojis.len(),
        modifications: count_modifications(&emojis),
        lines_skipped: sources.lines_skipped(),
        variations_merged,
        tones_generated: tones.generated,
        tones_adopted: tones.adopted,
    };
    Ok(BuildOutcome { emojis, report })
}

fn count_modifications(emojis: &EmojiMap) -> usize {
    emojis.values().map(Emoji::modification_count).sum()
}
