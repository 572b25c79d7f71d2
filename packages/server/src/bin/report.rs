//! Prints the dashboard summary as JSON for scripting.

use anyhow::{Context, Result};
use server_core::config::Config;
use server_core::domains::analytics;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let summary = analytics::dashboard_summary(&pool)
        .await
        .context("Failed to build dashboard summary")?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
