//! Batch sentiment analyzer
//!
//! Waits for the hosted sentiment model to warm up, scores posts, and
//! upserts one analysis row per post.

use anyhow::{Context, Result};
use clap::Parser;
use hf_client::HfClient;
use server_core::config::Config;
use server_core::domains::enrichment::SentimentService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "analyze_sentiment")]
#[command(about = "Score post sentiment via the hosted inference API")]
struct Cli {
    /// Only analyze posts without an existing analysis row
    #[arg(long)]
    pending_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,hf_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Connected to database");

    let client = HfClient::new(config.huggingface_api_key.clone());
    let service =
        SentimentService::new(client, config.sentiment_model.clone()).pending_only(cli.pending_only);

    println!("\nStarting sentiment analysis...\n");

    let outcome = service
        .analyze_posts(&pool)
        .await
        .context("Sentiment analysis run failed")?;

    println!("\nSentiment analysis complete!");
    println!("  Analyzed: {} posts", outcome.processed);
    println!("  Failed:   {} posts", outcome.failed);
    println!("  Total:    {} posts", outcome.total);

    Ok(())
}
