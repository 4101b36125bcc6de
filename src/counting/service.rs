//! Ingest pipeline and two-month aggregator

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::counting::clock::Clock;
use crate::counting::error::CountError;
use crate::counting::keys::{bucket_label, MonthKey};
use crate::counting::policy::BucketPolicy;
use crate::counting::validator::validate_identifier;
use crate::geo::GeoResolver;
use crate::store::VisitorStore;

/// Monthly unique-visitor counter.
///
/// Coordinates the dedup set, the geo resolver, the bucket policy, and the
/// per-bucket counters. Holds no mutable state of its own; all coordination
/// needed for correctness is delegated to the store's atomic primitives.
pub struct VisitorCounter {
    store: Arc<dyn VisitorStore>,
    resolver: Arc<dyn GeoResolver>,
    policy: BucketPolicy,
    clock: Arc<dyn Clock>,
}

impl VisitorCounter {
    pub fn new(
        store: Arc<dyn VisitorStore>,
        resolver: Arc<dyn GeoResolver>,
        policy: BucketPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            resolver,
            policy,
            clock,
        }
    }

    /// Record one visit.
    ///
    /// The first sighting of an identifier within a month resolves its
    /// country and bumps the matching bucket counter; every later sighting
    /// in the same month short-circuits after the dedup check. A resolver
    /// failure aborts the request after the dedup mark is already placed;
    /// the mark is not rolled back, so a retry within the month is absorbed
    /// as a duplicate even though no counter was incremented.
    pub async fn increment(&self, identifier: &str) -> Result<(), CountError> {
        validate_identifier(identifier)?;

        let month = MonthKey::current(self.clock.as_ref());
        let newly_seen = self.store.mark_seen(&month.dedup_key(), identifier).await?;
        if !newly_seen {
            debug!("Repeat visitor {} this month, skipping", identifier);
            return Ok(());
        }

        let record = self.resolver.resolve(identifier).await?;
        let bucket = self.policy.bucket_for(&record.country_code);
        self.store
            .observe(&month.counter_key(bucket), identifier)
            .await?;

        info!("New visitor {} from country: {}", identifier, bucket);
        Ok(())
    }

    /// Approximate unique-visitor totals per bucket, summed over the current
    /// and the previous calendar month.
    pub async fn counts(&self) -> Result<HashMap<String, i64>, CountError> {
        let current = MonthKey::current(self.clock.as_ref());

        let mut keys = Vec::new();
        for month in [current.previous(), current] {
            keys.extend(self.store.keys_matching(&month.counter_pattern()).await?);
        }

        // The batch read answers in key order, so zipping keeps every count
        // attached to the key it was measured for.
        let counts = self.store.cardinalities(&keys).await?;

        let mut totals = HashMap::new();
        for (key, count) in keys.iter().zip(counts) {
            let Some(bucket) = bucket_label(key) else {
                continue;
            };
            *totals.entry(bucket.to_string()).or_insert(0) += count;
        }
        Ok(totals)
    }
}
