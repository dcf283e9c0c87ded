//! Artifact cache contract and SQLite implementation.
//!
//! # Invariants
//! - `record_count` always mirrors the top-level size of `payload`.
//! - Writes for an existing key replace the payload and keep `created_at`.

use super::{CacheError, CacheResult};
use crate::model::emoji::EmojiMap;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::time::{SystemTime, UNIX_EPOCH};

/// Persists finished emoji maps by artifact key.
pub trait ArtifactCache {
    /// Returns the cached map, or `None` on a miss.
    fn read_artifact(&self, key: &str) -> CacheResult<Option<EmojiMap>>;
    fn write_artifact(&self, key: &str, map: &EmojiMap) -> CacheResult<()>;
}

impl<T: ArtifactCache + ?Sized> ArtifactCache for &T {
    fn read_artifact(&self, key: &str) -> CacheResult<Option<EmojiMap>> {
        (**self).read_artifact(key)
    }

    fn write_artifact(&self, key: &str, map: &EmojiMap) -> CacheResult<()> {
        (**self).write_artifact(key, map)
    }
}

/// Cache that never hits and discards writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopArtifactCache;

impl ArtifactCache for NoopArtifactCache {
    fn read_artifact(&self, _key: &str) -> CacheResult<Option<EmojiMap>> {
        Ok(None)
    }

    fn write_artifact(&self, _key: &str, _map: &EmojiMap) -> CacheResult<()> {
        Ok(())
    }
}

/// SQLite-backed artifact cache.
pub struct SqliteArtifactCache<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArtifactCache<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Drops a cached artifact. Returns whether one existed.
    pub fn remove_artifact(&self, key: &str) -> CacheResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM artifacts WHERE artifact_key = ?1;", params![key])?;
        Ok(removed > 0)
    }
}

impl ArtifactCache for SqliteArtifactCache<'_> {
    fn read_artifact(&self, key: &str) -> CacheResult<Option<EmojiMap>> {
        let row = self
            .conn
            .query_row(
                "SELECT payload, record_count FROM artifacts WHERE artifact_key = ?1;",
                params![key],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        let Some((payload, record_count)) = row else {
            debug!("event=cache_read module=cache status=miss key={}", key);
            return Ok(None);
        };

        let map: EmojiMap = serde_json::from_str(&payload)?;
        if usize::try_from(record_count).ok() != Some(map.len()) {
            return Err(CacheError::InvalidData(format!(
                "artifact `{key}` declares {record_count} records but holds {}",
                map.len()
            )));
        }

        info!(
            "event=cache_read module=cache status=hit key={} records={}",
            key,
            map.len()
        );
        Ok(Some(map))
    }

    fn write_artifact(&self, key: &str, map: &EmojiMap) -> CacheResult<()> {
        let payload = serde_json::to_string(map)?;
        let record_count = i64::try_from(map.len())
            .map_err(|_| CacheError::InvalidData(format!("artifact `{key}` is too large")))?;
        let now = now_epoch_ms();

        self.conn.execute(
            "INSERT INTO artifacts (
                artifact_key,
                payload,
                record_count,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?4)
            ON CONFLICT(artifact_key) DO UPDATE SET
                payload = excluded.payload,
                record_count = excluded.record_count,
                updated_at = excluded.updated_at;",
            params![key, payload, record_count, now],
        )?;

        info!(
            "event=cache_write module=cache status=ok key={} records={} bytes={}",
            key,
            map.len(),
            payload.len()
        );
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}
