//! Database seeder CLI
//!
//! Populates categories, users, and posts with synthetic data. Selection
//! flags compose; `--refresh` truncates exactly the tables being seeded.

use anyhow::{Context, Result};
use clap::Parser;
use hf_client::HfClient;
use server_core::config::Config;
use server_core::seed;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Seed the database with synthetic users, posts, and categories")]
struct Cli {
    /// Seed users (and the admin account)
    #[arg(long)]
    users: bool,

    /// Seed posts (requires users; generates text via the content model)
    #[arg(long)]
    posts: bool,

    /// Seed the fixed category taxonomy
    #[arg(long)]
    categories: bool,

    /// Seed everything
    #[arg(long)]
    all: bool,

    /// Truncate the selected tables before seeding
    #[arg(long)]
    refresh: bool,

    /// Number of users to create
    #[arg(long, default_value_t = 100)]
    user_count: usize,

    /// Number of posts to create
    #[arg(long, default_value_t = 250)]
    post_count: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();

    let seed_users = cli.users || cli.all;
    let seed_posts = cli.posts || cli.all;
    let seed_categories = cli.categories || cli.all;

    if !seed_users && !seed_posts && !seed_categories {
        eprintln!("Nothing selected; pass --users, --posts, --categories, or --all");
        return Ok(());
    }

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    if cli.refresh {
        refresh(&pool, seed_users, seed_posts, seed_categories).await?;
    }

    // Categories first: the post seeder's content generator draws from them
    if seed_categories {
        seed::categories::run(&pool).await?;
        tracing::info!("Category seeding completed");
    }

    if seed_users {
        seed::users::run(&pool, cli.user_count).await?;
        tracing::info!("User seeding completed");
    }

    if seed_posts {
        let client = HfClient::new(config.huggingface_api_key.clone());
        seed::posts::run(&pool, &client, &config.content_model, cli.post_count).await?;
        tracing::info!("Post seeding completed");
    }

    Ok(())
}

/// Truncate exactly the tables selected for seeding.
///
/// CASCADE clears dependent enrichment rows (analyses, classifications)
/// along with their parents.
async fn refresh(
    pool: &PgPool,
    seed_users: bool,
    seed_posts: bool,
    seed_categories: bool,
) -> Result<()> {
    if seed_posts {
        sqlx::query("TRUNCATE posts CASCADE").execute(pool).await?;
        tracing::info!("Truncated posts table");
    }
    if seed_users {
        sqlx::query("TRUNCATE users CASCADE").execute(pool).await?;
        tracing::info!("Truncated users table");
    }
    if seed_categories {
        sqlx::query("TRUNCATE categories CASCADE")
            .execute(pool)
            .await?;
        tracing::info!("Truncated categories table");
    }
    Ok(())
}
