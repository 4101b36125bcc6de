//! Geo resolution port
//!
//! The counting core consumes a single narrow contract: identifier in,
//! country code out. The HTTP implementation lives in [`ip2location`].

pub mod ip2location;

use async_trait::async_trait;
use serde::Deserialize;

pub use ip2location::Ip2LocationResolver;

/// Result of resolving one identifier.
///
/// Only `country_code` is consumed by the counting core; the remaining
/// fields are decoded from the lookup response and ignored. A missing
/// `country_code` decodes to the empty string, which the bucket policy maps
/// to the catch-all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoRecord {
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub asn: Option<String>,
    #[serde(default)]
    pub is_proxy: Option<bool>,
}

/// Identifier-to-location lookup collaborator.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    /// Resolve one identifier. Any failure is terminal for the calling
    /// request; implementations must not retry.
    async fn resolve(&self, ip: &str) -> anyhow::Result<GeoRecord>;
}
