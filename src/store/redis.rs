//! Redis-backed visitor store
//!
//! Schema:
//! - `visitors:{year}-{month:02}` is a SET of raw identifiers (dedup)
//! - `visitors:{year}-{month:02}:{bucket}` is a HyperLogLog per country bucket
//!
//! Every write pairs the mutation with `EXPIRE ... NX` inside MULTI/EXEC, so
//! a crash between the two can never leave an unexpiring key and repeated
//! writes never reset the remaining TTL.

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tracing::debug;

use super::{VisitorStore, KEY_TTL_SECS};

#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
}

impl RedisStore {
    /// Connect and hold a multiplexed connection; clones share it.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).context("invalid Redis URL")?;
        let connection = client
            .get_multiplexed_async_connection()
            .await
            .context("failed to connect to Redis")?;
        Ok(Self { connection })
    }

    /// Round-trip connectivity check, run once at startup.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .context("Redis ping failed")?;
        Ok(())
    }
}

#[async_trait]
impl VisitorStore for RedisStore {
    async fn mark_seen(&self, key: &str, member: &str) -> Result<bool> {
        let mut conn = self.connection.clone();
        let (added,): (i64,) = redis::pipe()
            .atomic()
            .cmd("SADD")
            .arg(key)
            .arg(member)
            .cmd("EXPIRE")
            .arg(key)
            .arg(KEY_TTL_SECS)
            .arg("NX")
            .ignore()
            .query_async(&mut conn)
            .await
            .with_context(|| format!("failed to record member in set {key}"))?;
        Ok(added == 1)
    }

    async fn observe(&self, key: &str, member: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: () = redis::pipe()
            .atomic()
            .cmd("PFADD")
            .arg(key)
            .arg(member)
            .ignore()
            .cmd("EXPIRE")
            .arg(key)
            .arg(KEY_TTL_SECS)
            .arg("NX")
            .ignore()
            .query_async(&mut conn)
            .await
            .with_context(|| format!("failed to update counter {key}"))?;
        Ok(())
    }

    async fn keys_matching(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.connection.clone();
        let mut cursor = 0u64;
        let mut keys = Vec::new();

        loop {
            let (next_cursor, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
                .with_context(|| format!("SCAN failed for pattern {pattern}"))?;

            keys.extend(batch);

            if next_cursor == 0 {
                break;
            }
            cursor = next_cursor;
        }

        Ok(keys)
    }

    async fn cardinalities(&self, keys: &[String]) -> Result<Vec<i64>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.connection.clone();
        let mut pipe = redis::pipe();
        for key in keys {
            pipe.cmd("PFCOUNT").arg(key);
        }

        // A plain pipeline answers in command order, which keeps every count
        // aligned with its key without requiring cross-key atomicity.
        let counts: Vec<i64> = pipe
            .query_async(&mut conn)
            .await
            .context("batched PFCOUNT failed")?;

        debug!("Read {} counter cardinalities", counts.len());
        Ok(counts)
    }
}
