//! Country bucketing policy

use std::collections::HashSet;

/// Catch-all label absorbing every country outside the allow-list, keeping
/// the number of distinct counter keys bounded no matter how many countries
/// show up in traffic.
pub const CATCH_ALL_BUCKET: &str = "others";

/// Immutable mapping from resolved country codes to bucket labels.
///
/// Built once at startup from configuration and shared read-only; never
/// mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct BucketPolicy {
    targeted: HashSet<String>,
}

impl BucketPolicy {
    pub fn new(targeted: HashSet<String>) -> Self {
        Self { targeted }
    }

    /// The country code itself when allow-listed, [`CATCH_ALL_BUCKET`]
    /// otherwise.
    pub fn bucket_for<'a>(&'a self, country_code: &'a str) -> &'a str {
        if self.targeted.contains(country_code) {
            country_code
        } else {
            CATCH_ALL_BUCKET
        }
    }
}
