//! Visitor store port and backends
//!
//! The store keeps two entity kinds per calendar month: an exact-membership
//! dedup set and one approximate counter per country bucket. Both are
//! created lazily on first write, receive their expiry exactly once, and are
//! destroyed by expiry alone; there is no explicit delete path.

pub mod redis;

use async_trait::async_trait;

pub use self::redis::RedisStore;

/// Expiry armed on every visitor entity at first write. 62 days covers the
/// current and the previous month with margin.
pub const KEY_TTL_SECS: i64 = 62 * 24 * 60 * 60;

#[async_trait]
pub trait VisitorStore: Send + Sync {
    /// Add `member` to the exact-membership set at `key`, arming the expiry
    /// if the key does not carry one yet; both happen as one indivisible
    /// unit. Returns whether the member was newly inserted.
    async fn mark_seen(&self, key: &str, member: &str) -> anyhow::Result<bool>;

    /// Fold `member` into the approximate counter at `key`, with the same
    /// expiry discipline as `mark_seen`.
    async fn observe(&self, key: &str, member: &str) -> anyhow::Result<()>;

    /// Every key matching a glob-style pattern.
    async fn keys_matching(&self, pattern: &str) -> anyhow::Result<Vec<String>>;

    /// Estimated cardinality of each key, aligned index-for-index with the
    /// input. Missing keys count as zero.
    async fn cardinalities(&self, keys: &[String]) -> anyhow::Result<Vec<i64>>;
}
