//! Filesystem-backed source loader.
//!
//! Layout: `<root>/<version>/<file>`, one directory per emoji release, as
//! produced by the fetch collaborator.

use super::{SourceError, SourceKind, SourceLoader, SourceResult};
use crate::model::emoji::{EmoticonMap, GroupMap, NamesMap, VariationMap};
use crate::model::hexcode::{self, Hexcode};
use crate::model::official::OfficialList;
use crate::parse::emoji_test::{parse_emoji_test, EmojiTestData};
use crate::parse::names::parse_unicode_data;
use crate::parse::variations::parse_variation_sequences;
use log::{debug, info, warn};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads raw Unicode files from a local directory tree.
///
/// `emoji-test.txt` feeds names, groups, and the official list; it is parsed
/// once and shared by those calls.
pub struct DirectorySourceLoader {
    root: PathBuf,
    emoji_test: OnceCell<(String, EmojiTestData)>,
}

impl DirectorySourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            emoji_test: OnceCell::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Path of one source file for `version`.
    pub fn path_of(&self, version: &str, kind: SourceKind) -> PathBuf {
        self.root.join(version.trim()).join(kind.file_name())
    }

    fn read(&self, version: &str, kind: SourceKind) -> SourceResult<String> {
        let path = self.path_of(version, kind);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                info!(
                    "event=source_read module=source status=ok source={} bytes={}",
                    kind,
                    text.len()
                );
                Ok(text)
            }
            Err(source) => Err(SourceError::Io { kind, path, source }),
        }
    }

    fn read_optional(&self, version: &str, kind: SourceKind) -> SourceResult<Option<String>> {
        match self.read(version, kind) {
            Ok(text) => Ok(Some(text)),
            Err(SourceError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=source_read module=source status=missing source={}",
                    kind
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn with_emoji_test<T>(
        &self,
        version: &str,
        f: impl FnOnce(&EmojiTestData) -> T,
    ) -> SourceResult<T> {
        let (cached_version, data) = self.emoji_test.get_or_try_init(|| {
            let text = self.read(version, SourceKind::EmojiTest)?;
            Ok::<_, SourceError>((version.to_string(), parse_emoji_test(&text)))
        })?;
        if cached_version == version {
            return Ok(f(data));
        }

        // Only the first version is memoized; others are parsed per call.
        let text = self.read(version, SourceKind::EmojiTest)?;
        Ok(f(&parse_emoji_test(&text)))
    }
}

impl SourceLoader for DirectorySourceLoader {
    fn load_data(&self, version: &str) -> SourceResult<String> {
        self.read(version, SourceKind::EmojiData)
    }

    fn load_sequences(&self, version: &str) -> SourceResult<String> {
        self.read(version, SourceKind::EmojiSequences)
    }

    fn load_zwj_sequences(&self, version: &str) -> SourceResult<String> {
        self.read(version, SourceKind::EmojiZwjSequences)
    }

    /// Unicode character names, overridden by the shorter CLDR names from
    /// `emoji-test.txt` where both exist.
    fn load_names(&self, version: &str) -> SourceResult<NamesMap> {
        // Bare digits, keycap parts and regional indicators are named only here.
        let mut names = parse_unicode_data(&self.read(version, SourceKind::UnicodeData)?).entries;
        self.with_emoji_test(version, |data| {
            for (hexcode, name) in &data.names {
                names.insert(hexcode.clone(), name.clone());
            }
        })?;
        Ok(names)
    }

    fn load_groups(&self, version: &str) -> SourceResult<GroupMap> {
        self.with_emoji_test(version, |data| data.groups.clone())
    }

    fn load_variations(&self, version: &str) -> SourceResult<VariationMap> {
        let text = self.read(version, SourceKind::VariationSequences)?;
        Ok(parse_variation_sequences(&text).entries)
    }

    /// `emoticons.json` is an object of hexcode -> emoticon. A missing file
    /// yields no emoticons.
    fn load_emoticons(&self, version: &str) -> SourceResult<EmoticonMap> {
        let Some(text) = self.read_optional(version, SourceKind::Emoticons)? else {
            return Ok(EmoticonMap::new());
        };

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&text).map_err(|source| SourceError::Json {
                kind: SourceKind::Emoticons,
                path: self.path_of(version, SourceKind::Emoticons),
                source,
            })?;

        let mut emoticons = EmoticonMap::new();
        for (key, emoticon) in raw {
            match normalize_hexcode(&key) {
                Some(hexcode) => {
                    emoticons.insert(hexcode, emoticon);
                }
                None => warn!(
                    "event=entry_skipped module=source status=skipped source={} reason=invalid_hexcode",
                    SourceKind::Emoticons
                ),
            }
        }
        Ok(emoticons)
    }

    fn load_official_list(&self, version: &str) -> SourceResult<OfficialList> {
        self.with_emoji_test(version, |data| data.official.clone())
    }
}

/// `1f600` / `1F600-fe0f` -> canonical spelling.
fn normalize_hexcode(raw: &str) -> Option<Hexcode> {
    let mut tokens = Vec::new();
    for token in raw.trim().split(hexcode::HEXCODE_DELIMITER) {
        tokens.push(hexcode::normalize_token(token)?);
    }
    Some(hexcode::join(tokens))
}
