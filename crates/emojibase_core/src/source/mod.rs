//! Source loader contract and concurrent loading.
//!
//! # Responsibility
//! - Define the boundary between raw Unicode files and the build pipeline.
//! - Issue every loader call concurrently before the join barrier.
//!
//! # Invariants
//! - Property files are returned as raw text and parsed here.
//! - Every map a loader returns is keyed by canonical hexcode.
//! - Any loader failure (error or panic) aborts the whole load.

use crate::model::emoji::{EmojiData, EmoticonMap, GroupMap, NamesMap, VariationMap};
use crate::model::official::OfficialList;
use crate::parse::property_file::parse_property_file;
use crate::parse::ParsedTable;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::thread::ScopedJoinHandle;
use std::time::Instant;

mod directory;

pub use directory::DirectorySourceLoader;

pub type SourceResult<T> = Result<T, SourceError>;

/// Raw inputs the pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    EmojiData,
    EmojiSequences,
    EmojiZwjSequences,
    EmojiTest,
    VariationSequences,
    UnicodeData,
    Emoticons,
}

impl SourceKind {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::EmojiData => "emoji-data.txt",
            Self::EmojiSequences => "emoji-sequences.txt",
            Self::EmojiZwjSequences => "emoji-zwj-sequences.txt",
            Self::EmojiTest => "emoji-test.txt",
            Self::VariationSequences => "emoji-variation-sequences.txt",
            Self::UnicodeData => "UnicodeData.txt",
            Self::Emoticons => "emoticons.json",
        }
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug)]
pub enum SourceError {
    Io {
        kind: SourceKind,
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        kind: SourceKind,
        path: PathBuf,
        source: serde_json::Error,
    },
    LoaderPanicked(SourceKind),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { kind, path, source } => {
                write!(f, "failed to read {kind} at `{}`: {source}", path.display())
            }
            Self::Json { kind, path, source } => {
                write!(f, "failed to decode {kind} at `{}`: {source}", path.display())
            }
            Self::LoaderPanicked(kind) => write!(f, "loader for {kind} panicked"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::LoaderPanicked(_) => None,
        }
    }
}

/// Supplies the raw inputs of one emoji release.
///
/// Implementations own fetching and retry policy. Calls for the same version
/// may run concurrently.
pub trait SourceLoader: Send + Sync {
    fn load_data(&self, version: &str) -> SourceResult<String>;
    fn load_sequences(&self, version: &str) -> SourceResult<String>;
    fn load_zwj_sequences(&self, version: &str) -> SourceResult<String>;
    fn load_names(&self, version: &str) -> SourceResult<NamesMap>;
    fn load_groups(&self, version: &str) -> SourceResult<GroupMap>;
    fn load_variations(&self, version: &str) -> SourceResult<VariationMap>;
    fn load_emoticons(&self, version: &str) -> SourceResult<EmoticonMap>;
    fn load_official_list(&self, version: &str) -> SourceResult<OfficialList>;
}

/// Everything loaded for one build, ready for the join stages.
#[derive(Debug, Clone, Default)]
pub struct SourceBundle {
    pub data: ParsedTable<EmojiData>,
    pub sequences: ParsedTable<EmojiData>,
    pub zwj_sequences: ParsedTable<EmojiData>,
    pub names: NamesMap,
    pub groups: GroupMap,
    pub variations: VariationMap,
    pub emoticons: EmoticonMap,
    pub official: OfficialList,
}

impl SourceBundle {
    /// Malformed property lines skipped across the three property files.
    pub fn lines_skipped(&self) -> usize {
        self.data.lines_skipped + self.sequences.lines_skipped + self.zwj_sequences.lines_skipped
    }
}

/// Loads and parses every source for `version` on scoped threads.
///
/// All handles are joined before any error is returned, so a panicking
/// loader surfaces as [`SourceError::LoaderPanicked`].
pub fn load_sources<L>(loader: &L, version: &str) -> SourceResult<SourceBundle>
where
    L: SourceLoader + ?Sized,
{
    let started_at = Instant::now();
    info!(
        "event=sources_load module=source status=start version={}",
        version
    );

    let result = std::thread::scope(|scope| {
        let data = scope.spawn(|| {
            loader
                .load_data(version)
                .map(|text| parse_property_file(SourceKind::EmojiData.file_name(), &text))
        });
        let sequences = scope.spawn(|| {
            loader
                .load_sequences(version)
                .map(|text| parse_property_file(SourceKind::EmojiSequences.file_name(), &text))
        });
        let zwj_sequences = scope.spawn(|| {
            loader
                .load_zwj_sequences(version)
                .map(|text| parse_property_file(SourceKind::EmojiZwjSequences.file_name(), &text))
        });
        let names = scope.spawn(|| loader.load_names(version));
        let groups = scope.spawn(|| loader.load_groups(version));
        let variations = scope.spawn(|| loader.load_variations(version));
        let emoticons = scope.spawn(|| loader.load_emoticons(version));
        let official = scope.spawn(|| loader.load_official_list(version));

        let data = join_loader(data, SourceKind::EmojiData);
        let sequences = join_loader(sequences, SourceKind::EmojiSequences);
        let zwj_sequences = join_loader(zwj_sequences, SourceKind::EmojiZwjSequences);
        let names = join_loader(names, SourceKind::UnicodeData);
        let groups = join_loader(groups, SourceKind::EmojiTest);
        let variations = join_loader(variations, SourceKind::VariationSequences);
        let emoticons = join_loader(emoticons, SourceKind::Emoticons);
        let official = join_loader(official, SourceKind::EmojiTest);

        Ok(SourceBundle {
            data: data?,
            sequences: sequences?,
            zwj_sequences: zwj_sequences?,
            names: names?,
            groups: groups?,
            variations: variations?,
            emoticons: emoticons?,
            official: official?,
        })
    });

    match &result {
        Ok(bundle) => info!(
            "event=sources_load module=source status=ok version={} duration_ms={} lines_skipped={}",
            version,
            started_at.elapsed().as_millis(),
            bundle.lines_skipped()
        ),
        Err(err) => error!(
            "event=sources_load module=source status=error version={} duration_ms={} error={}",
            version,
            started_at.elapsed().as_millis(),
            err
        ),
    }

    result
}

fn join_loader<T>(
    handle: ScopedJoinHandle<'_, SourceResult<T>>,
    kind: SourceKind,
) -> SourceResult<T> {
    handle
        .join()
        .map_err(|_| SourceError::LoaderPanicked(kind))?
}
