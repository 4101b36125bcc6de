use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use footfall::api;
use footfall::config::Config;
use footfall::counting::{BucketPolicy, SystemClock, VisitorCounter};
use footfall::geo::Ip2LocationResolver;
use footfall::store::RedisStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    // Connect to the visitor store and verify it is reachable
    let store = RedisStore::connect(&config.redis.url).await?;
    store.ping().await?;
    info!("Connected to Redis at {}", config.redis.url);

    if config.targeted_countries.is_empty() {
        info!("No targeted countries configured - every visitor counts under 'others'");
    } else {
        info!(
            "Bucketing visitors across {} targeted countries",
            config.targeted_countries.len()
        );
    }

    let resolver = Arc::new(Ip2LocationResolver::new(&config.geo)?);
    let policy = BucketPolicy::new(config.targeted_countries.clone());
    let counter = Arc::new(VisitorCounter::new(
        Arc::new(store),
        resolver,
        policy,
        Arc::new(SystemClock),
    ));

    let router = api::create_api_router(counter);

    // Start the API server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Visitor API listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
