//! Batch zero-shot classifier
//!
//! Waits for the hosted zero-shot model to warm up, scores every post
//! against the category taxonomy, and upserts one row per post/category
//! pair that clears the relevance threshold.

use anyhow::{Context, Result};
use hf_client::HfClient;
use server_core::config::Config;
use server_core::domains::enrichment::ClassificationService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,hf_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Connected to database");

    let client = HfClient::new(config.huggingface_api_key.clone());
    let service = ClassificationService::new(client, config.zero_shot_model.clone());

    println!("\nStarting zero-shot classification...\n");

    let outcome = service
        .classify_posts(&pool)
        .await
        .context("Classification run failed")?;

    println!("\nClassification complete!");
    println!("  Classified: {} posts", outcome.processed);
    println!("  Failed:     {} posts", outcome.failed);
    println!("  Total:      {} posts", outcome.total);

    Ok(())
}
