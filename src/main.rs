//! sparkle-board entry point.
//!
//! Hydrates the sparkle store from the object store once and logs the
//! current leaderboards.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use sparkle_board::config::SparkleConfig;
use sparkle_board::credentials::EnvCredentials;
use sparkle_board::persistence::{S3BlobStore, SparkleRepository};
use sparkle_board::service::SparkleService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = SparkleConfig::from_env().context("loading configuration")?;
    let credentials = EnvCredentials::from_env().context("resolving object store credentials")?;
    tracing::info!(
        bucket = %config.bucket,
        key = %config.key,
        region = %config.region,
        "starting sparkle-board"
    );

    // Build persistence layer
    let backend = Arc::new(S3BlobStore::new(&config, &credentials));
    let repository = SparkleRepository::new(backend, config.key.clone());

    // Hydrate once
    let service = SparkleService::load(repository).await;
    let store = service.store();
    tracing::info!(count = store.len(), "sparkle store ready");

    for (rank, leader) in store
        .top_received_limited(None, config.leaderboard_size)
        .iter()
        .enumerate()
    {
        tracing::info!(rank = rank + 1, name = %leader.name, score = leader.score, "top received");
    }
    for (rank, leader) in store
        .top_given_limited(None, config.leaderboard_size)
        .iter()
        .enumerate()
    {
        tracing::info!(rank = rank + 1, name = %leader.name, score = leader.score, "top given");
    }

    Ok(())
}
