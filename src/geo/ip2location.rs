//! HTTP geo resolver backed by the ip2location.io lookup API

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::GeoConfig;

use super::{GeoRecord, GeoResolver};

pub struct Ip2LocationResolver {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Ip2LocationResolver {
    pub fn new(config: &GeoConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("footfall/0.1.0")
            .build()
            .context("failed to build HTTP client for geo resolution")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl GeoResolver for Ip2LocationResolver {
    async fn resolve(&self, ip: &str) -> Result<GeoRecord> {
        let record: GeoRecord = self
            .client
            .get(&self.base_url)
            .query(&[("key", self.api_key.as_str()), ("ip", ip)])
            .send()
            .await
            .context("geo lookup request failed")?
            .error_for_status()
            .context("geo lookup returned an error status")?
            .json()
            .await
            .context("failed to decode geo lookup response")?;

        debug!("Resolved {} to country '{}'", ip, record.country_code);
        Ok(record)
    }
}
