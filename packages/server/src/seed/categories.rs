//! Category seeder: inserts the fixed taxonomy, skipping existing names.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::domains::categories::models::{Category, SEED_CATEGORIES};

pub async fn run(pool: &PgPool) -> Result<()> {
    let inserted = Category::insert_many(SEED_CATEGORIES, pool)
        .await
        .context("Error populating categories")?;

    tracing::info!(
        inserted,
        existing = SEED_CATEGORIES.len() as u64 - inserted,
        "Categories populated successfully"
    );
    Ok(())
}
