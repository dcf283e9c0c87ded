mod common;

use emojibase_core::source::SourceKind;
use emojibase_core::{
    ArtifactCache, BuildConfig, BuildError, CacheResult, DirectorySourceLoader,
    EmojiBuildService, EmojiMap, NoopArtifactCache, SourceError, TonePairPolicy,
};
use serde_json::Value;
use std::cell::Cell;

const SAME_TONE_PAIRS: [&str; 5] = [
    "1F9D1 1F3FB 200D 1F91D 200D 1F9D1 1F3FB",
    "1F9D1 1F3FC 200D 1F91D 200D 1F9D1 1F3FC",
    "1F9D1 1F3FD 200D 1F91D 200D 1F9D1 1F3FD",
    "1F9D1 1F3FE 200D 1F91D 200D 1F9D1 1F3FE",
    "1F9D1 1F3FF 200D 1F91D 200D 1F9D1 1F3FF",
];

/// Cache that never hits and counts writes.
#[derive(Default)]
struct CountingCache {
    writes: Cell<usize>,
}

impl ArtifactCache for CountingCache {
    fn read_artifact(&self, _key: &str) -> CacheResult<Option<EmojiMap>> {
        Ok(None)
    }

    fn write_artifact(&self, _key: &str, _map: &EmojiMap) -> CacheResult<()> {
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

fn service(root: &std::path::Path) -> EmojiBuildService<DirectorySourceLoader, NoopArtifactCache> {
    EmojiBuildService::new(
        DirectorySourceLoader::new(root),
        NoopArtifactCache,
        BuildConfig::new(common::VERSION),
    )
}

#[test]
fn fixture_builds_with_expected_report() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    common::write_fixture(dir.path());

    let outcome = service(dir.path()).build().expect("fixture should build");
    let report = &outcome.report;

    assert!(!report.from_cache);
    assert_eq!(report.emoji_version, common::VERSION);
    assert_eq!(report.records, 25);
    assert_eq!(report.modifications, 50);
    assert_eq!(report.tones_adopted, 3);
    assert_eq!(report.tones_generated, 47);
    assert_eq!(report.variations_merged, 2);
    assert_eq!(report.lines_skipped, 1);

    assert!(!outcome.emojis.contains_key("00A9-FE0F"));
    assert!(!outcome.emojis.contains_key("261D-1F3FB"));
    assert!(!outcome.emojis.contains_key("1FC00"));
}

#[test]
fn artifact_serializes_to_the_published_shape() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    common::write_fixture(dir.path());
    let outcome = service(dir.path()).build().expect("fixture should build");

    let json = serde_json::to_value(&outcome.emojis).expect("artifact should serialize");

    let waving = &json["1F44B"];
    assert_eq!(waving["type"], "EMOJI");
    assert_eq!(waving["name"], "waving hand");
    assert!(waving["group"].is_u64());
    assert!(waving["subgroup"].is_u64());
    assert!(waving["order"].is_u64());
    assert_eq!(
        waving["modifications"]["3"]["name"],
        "waving hand, medium skin tone"
    );

    let pointing = &json["261D"];
    assert_eq!(pointing["type"], "TEXT");
    assert_eq!(pointing["modifications"]["1"]["hexcode"], "261D-1F3FB");
    assert_eq!(pointing["variations"]["emoji"], "261D-FE0F");

    let holding_hands = &json["1F9D1-200D-1F91D-200D-1F9D1"];
    assert_eq!(
        holding_hands["modifications"]["5-1"]["hexcode"],
        "1F9D1-1F3FF-200D-1F91D-200D-1F9D1-1F3FB"
    );

    assert_eq!(json["1F600"]["emoticon"], ":D");
    assert_eq!(json["1F602"]["emoticon"], ":')");
    assert_eq!(json["1F1FA-1F1F8"]["name"], "FLAG: UNITED STATES");

    let copyright_labels = json["00A9"]["variations"]["property"]
        .as_array()
        .expect("merged labels should be kept");
    assert!(copyright_labels.contains(&Value::from("Basic_Emoji")));
    assert!(json["1F600"].get("modifications").is_none());
}

#[test]
fn exclude_same_tone_policy_builds_twenty_pairs() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    common::write_fixture_with(dir.path(), |name, text| {
        if name != "emoji-test.txt" {
            return text;
        }
        text.lines()
            .filter(|line| !SAME_TONE_PAIRS.iter().any(|code| line.starts_with(code)))
            .map(|line| format!("{line}\n"))
            .collect()
    });

    let mut config = BuildConfig::new(common::VERSION);
    config.tone_pair_policy = TonePairPolicy::ExcludeSameTone;
    let outcome = EmojiBuildService::new(
        DirectorySourceLoader::new(dir.path()),
        NoopArtifactCache,
        config,
    )
    .build()
    .expect("fixture should build without same-tone pairs");

    let pairs = outcome.emojis["1F9D1-200D-1F91D-200D-1F9D1"].modification_count();
    assert_eq!(pairs, 20);
    assert_eq!(outcome.report.modifications, 45);
}

#[test]
fn missing_required_file_is_a_source_error() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    common::write_fixture(dir.path());
    std::fs::remove_file(dir.path().join(common::VERSION).join("emoji-sequences.txt"))
        .expect("fixture file should be removed");

    let err = service(dir.path()).build().expect_err("build must fail");
    assert!(matches!(
        err,
        BuildError::Source(SourceError::Io {
            kind: SourceKind::EmojiSequences,
            ..
        })
    ));
}

#[test]
fn missing_unicode_data_is_a_source_error() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    common::write_fixture(dir.path());
    std::fs::remove_file(dir.path().join(common::VERSION).join("UnicodeData.txt"))
        .expect("fixture file should be removed");

    let err = service(dir.path()).build().expect_err("build must fail");
    assert!(matches!(
        err,
        BuildError::Source(SourceError::Io {
            kind: SourceKind::UnicodeData,
            ..
        })
    ));
}

#[test]
fn descriptions_are_decoded_and_filled_for_range_members() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    common::write_fixture(dir.path());
    let outcome = service(dir.path()).build().expect("fixture should build");

    assert_eq!(outcome.emojis["0023-FE0F-20E3"].description, "keycap: #");
    assert_eq!(
        outcome.emojis["1F601"].description,
        "beaming face with smiling eyes"
    );
    assert_eq!(outcome.emojis["1F3FD"].description, "medium skin tone");
}

#[test]
fn missing_emoticons_file_only_drops_emoticons() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    common::write_fixture(dir.path());
    std::fs::remove_file(dir.path().join(common::VERSION).join("emoticons.json"))
        .expect("fixture file should be removed");

    let outcome = service(dir.path()).build().expect("fixture should build");
    assert!(outcome.emojis["1F600"].emoticon.is_none());
}

#[test]
fn gate_failure_leaves_cache_untouched() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    common::write_fixture_with(dir.path(), |name, text| {
        if name == "emoji-data.txt" {
            text.lines()
                .filter(|line| !line.starts_with("1F4BB"))
                .map(|line| format!("{line}\n"))
                .collect()
        } else {
            text
        }
    });

    let cache = CountingCache::default();
    let err = EmojiBuildService::new(
        DirectorySourceLoader::new(dir.path()),
        &cache,
        BuildConfig::new(common::VERSION),
    )
    .build()
    .expect_err("missing laptop must fail the official list gate");

    match err {
        BuildError::OfficialListDrift(drift) => {
            assert_eq!(drift.missing, vec!["1F4BB".to_string()]);
        }
        other => panic!("expected official list drift, got {other}"),
    }
    assert_eq!(cache.writes.get(), 0);
}

#[test]
fn successful_build_writes_the_cache_once() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    common::write_fixture(dir.path());

    let cache = CountingCache::default();
    EmojiBuildService::new(
        DirectorySourceLoader::new(dir.path()),
        &cache,
        BuildConfig::new(common::VERSION),
    )
    .build()
    .expect("fixture should build");

    assert_eq!(cache.writes.get(), 1);
}

#[test]
fn malformed_version_is_rejected_before_loading() {
    let dir = tempfile::tempdir().expect("temp dir should be created");

    let err = EmojiBuildService::new(
        DirectorySourceLoader::new(dir.path()),
        NoopArtifactCache,
        BuildConfig::new("latest"),
    )
    .build()
    .expect_err("malformed version must fail");
    assert!(matches!(err, BuildError::Config(_)));
}
