//! Command-line entry point for building the emoji dataset.
//!
//! Usage:
//!   emojibase --source-dir `<dir>` [--emoji-version `<v>`] [--cache-db `<path>`] [--out `<file>`]

use clap::{Arg, ArgAction, ArgMatches, Command};
use emojibase_core::{
    default_log_level, init_logging, open_cache_db, BuildConfig, BuildOutcome, BuildResult,
    DirectorySourceLoader, EmojiBuildService, LogTarget, NoopArtifactCache, SqliteArtifactCache,
    TonePairPolicy, LATEST_EMOJI_VERSION,
};
use log::info;

fn main() {
    let matches = Command::new("emojibase")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds the normalized emoji dataset from raw Unicode data files")
        .arg(
            Arg::new("source-dir")
                .long("source-dir")
                .short('s')
                .help("Directory holding one sub-directory of raw Unicode files per version")
                .required(true),
        )
        .arg(
            Arg::new("emoji-version")
                .long("emoji-version")
                .short('v')
                .help("Emoji release to build (major.minor)")
                .default_value(LATEST_EMOJI_VERSION),
        )
        .arg(
            Arg::new("cache-db")
                .long("cache-db")
                .help("SQLite file used to cache finished artifacts"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .short('o')
                .help("Write the JSON artifact to this file instead of stdout"),
        )
        .arg(
            Arg::new("rebuild")
                .long("rebuild")
                .help("Ignore a cached artifact and rebuild it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tone-pairs")
                .long("tone-pairs")
                .help("Tone pairs for two-person sequences: include-same or exclude-same")
                .default_value("include-same"),
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .help("Absolute directory for rotated log files (default: stderr)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("trace, debug, info, warn, or error"),
        )
        .get_matches();

    if let Err(message) = setup_logging(&matches) {
        eprintln!("Logging error: {}", message);
        std::process::exit(1);
    }

    let config = build_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    let source_dir = matches
        .get_one::<String>("source-dir")
        .expect("source-dir is required");
    let loader = DirectorySourceLoader::new(source_dir);

    let outcome = match matches.get_one::<String>("cache-db") {
        Some(path) => {
            let conn = open_cache_db(path).unwrap_or_else(|e| {
                eprintln!("Cache error: {}", e);
                std::process::exit(1);
            });
            run(EmojiBuildService::new(
                loader,
                SqliteArtifactCache::new(&conn),
                config,
            ))
        }
        None => run(EmojiBuildService::new(loader, NoopArtifactCache, config)),
    };

    let outcome = outcome.unwrap_or_else(|e| {
        eprintln!("Build failed: {}", e);
        std::process::exit(1);
    });

    let json = serde_json::to_string_pretty(&outcome.emojis).unwrap_or_else(|e| {
        eprintln!("Error formatting artifact: {}", e);
        std::process::exit(1);
    });

    match matches.get_one::<String>("out") {
        Some(path) => {
            if let Err(e) = std::fs::write(path, json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!(
                "Wrote {} records ({} modifications) for emoji {} to {}",
                outcome.report.records,
                outcome.report.modifications,
                outcome.report.emoji_version,
                path
            );
        }
        None => println!("{}", json),
    }
}

fn run<C: emojibase_core::ArtifactCache>(
    service: EmojiBuildService<DirectorySourceLoader, C>,
) -> BuildResult<BuildOutcome> {
    let outcome = service.build()?;
    info!(
        "event=cli_build module=cli status=ok from_cache={} records={} lines_skipped={}",
        outcome.report.from_cache, outcome.report.records, outcome.report.lines_skipped
    );
    Ok(outcome)
}

fn setup_logging(matches: &ArgMatches) -> Result<(), String> {
    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or_else(|| default_log_level());
    let target = match matches.get_one::<String>("log-dir") {
        Some(dir) => LogTarget::directory(dir)?,
        None => LogTarget::Stderr,
    };
    init_logging(level, target)
}

fn build_config(matches: &ArgMatches) -> Result<BuildConfig, emojibase_core::ConfigError> {
    let version = matches
        .get_one::<String>("emoji-version")
        .map(String::as_str)
        .unwrap_or(LATEST_EMOJI_VERSION);
    let tone_pairs = matches
        .get_one::<String>("tone-pairs")
        .map(String::as_str)
        .unwrap_or("include-same");

    let mut config = BuildConfig::new(version);
    config.tone_pair_policy = tone_pairs.parse::<TonePairPolicy>()?;
    config.use_cache = !matches.get_flag("rebuild");
    config.validate()?;
    Ok(config)
}
