//! In-memory test doubles for the store, the resolver, and the clock.
//!
//! The store double mirrors the Redis schema with exact sets standing in
//! for both the dedup sets and the HyperLogLogs, and keeps enough TTL
//! bookkeeping to assert the set-once expiry discipline.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use footfall::counting::Clock;
use footfall::geo::{GeoRecord, GeoResolver};
use footfall::store::{VisitorStore, KEY_TTL_SECS};

#[derive(Default)]
pub struct MemoryStore {
    sets: Mutex<HashMap<String, HashSet<String>>>,
    counters: Mutex<HashMap<String, HashSet<String>>>,
    ttls: Mutex<HashMap<String, i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members in a dedup set; 0 when the key does not exist.
    pub fn set_cardinality(&self, key: &str) -> usize {
        self.sets
            .lock()
            .unwrap()
            .get(key)
            .map(HashSet::len)
            .unwrap_or(0)
    }

    /// Exact member count of a counter; 0 when the key does not exist.
    pub fn counter_cardinality(&self, key: &str) -> usize {
        self.counters
            .lock()
            .unwrap()
            .get(key)
            .map(HashSet::len)
            .unwrap_or(0)
    }

    pub fn ttl(&self, key: &str) -> Option<i64> {
        self.ttls.lock().unwrap().get(key).copied()
    }

    /// Overwrite a key's remaining TTL, simulating time passing since the
    /// expiry was armed.
    pub fn set_ttl(&self, key: &str, secs: i64) {
        self.ttls.lock().unwrap().insert(key.to_string(), secs);
    }

    /// True when no write of any kind has landed.
    pub fn is_empty(&self) -> bool {
        self.sets.lock().unwrap().is_empty()
            && self.counters.lock().unwrap().is_empty()
            && self.ttls.lock().unwrap().is_empty()
    }

    fn arm_expiry_nx(&self, key: &str) {
        self.ttls
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_insert(KEY_TTL_SECS);
    }
}

#[async_trait]
impl VisitorStore for MemoryStore {
    async fn mark_seen(&self, key: &str, member: &str) -> Result<bool> {
        let newly_inserted = self
            .sets
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
        self.arm_expiry_nx(key);
        Ok(newly_inserted)
    }

    async fn observe(&self, key: &str, member: &str) -> Result<()> {
        self.counters
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
        self.arm_expiry_nx(key);
        Ok(())
    }

    async fn keys_matching(&self, pattern: &str) -> Result<Vec<String>> {
        let prefix = pattern
            .strip_suffix('*')
            .ok_or_else(|| anyhow!("unsupported pattern: {pattern}"))?;

        let mut keys: Vec<String> = self
            .counters
            .lock()
            .unwrap()
            .keys()
            .chain(self.sets.lock().unwrap().keys())
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn cardinalities(&self, keys: &[String]) -> Result<Vec<i64>> {
        let counters = self.counters.lock().unwrap();
        Ok(keys
            .iter()
            .map(|key| counters.get(key).map(HashSet::len).unwrap_or(0) as i64)
            .collect())
    }
}

/// Store double whose every operation fails, for exercising the internal
/// error path.
pub struct FailingStore;

#[async_trait]
impl VisitorStore for FailingStore {
    async fn mark_seen(&self, _key: &str, _member: &str) -> Result<bool> {
        Err(anyhow!("redis connection refused"))
    }

    async fn observe(&self, _key: &str, _member: &str) -> Result<()> {
        Err(anyhow!("redis connection refused"))
    }

    async fn keys_matching(&self, _pattern: &str) -> Result<Vec<String>> {
        Err(anyhow!("redis connection refused"))
    }

    async fn cardinalities(&self, _keys: &[String]) -> Result<Vec<i64>> {
        Err(anyhow!("redis connection refused"))
    }
}

/// Resolver double answering every lookup with a fixed country code and
/// counting how often it was consulted.
pub struct StaticResolver {
    country_code: String,
    calls: AtomicUsize,
}

impl StaticResolver {
    pub fn new(country_code: &str) -> Self {
        Self {
            country_code: country_code.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoResolver for StaticResolver {
    async fn resolve(&self, _ip: &str) -> Result<GeoRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GeoRecord {
            country_code: self.country_code.clone(),
            ..Default::default()
        })
    }
}

/// Resolver double that always fails, also counting calls.
pub struct FailingResolver {
    calls: AtomicUsize,
}

impl FailingResolver {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoResolver for FailingResolver {
    async fn resolve(&self, _ip: &str) -> Result<GeoRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(anyhow!("geo service unavailable"))
    }
}

/// Clock pinned to a fixed instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
                .single()
                .expect("valid test date"),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
