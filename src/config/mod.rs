use std::collections::HashSet;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub geo: GeoConfig,
    pub targeted_countries: HashSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let api_key = std::env::var("IP2LOCATION_API_KEY")
            .context("IP2LOCATION_API_KEY must be set")?;
        let base_url = std::env::var("IP2LOCATION_BASE_URL")
            .unwrap_or_else(|_| "https://api.ip2location.io/".to_string());

        let targeted_countries = std::env::var("TARGETED_COUNTRIES")
            .map(|raw| parse_country_list(&raw))
            .unwrap_or_default();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        Ok(Config {
            server: ServerConfig { host, port },
            redis: RedisConfig { url: redis_url },
            geo: GeoConfig { api_key, base_url },
            targeted_countries,
        })
    }
}

fn parse_country_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}
