use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::CategoryId;

/// Category kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "category_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Interest,
    Lifestyle,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Interest => "interest",
            CategoryKind::Lifestyle => "lifestyle",
        }
    }
}

/// Category - a topic posts are classified against
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub kind: CategoryKind,
    pub created_at: DateTime<Utc>,
}

/// The fixed taxonomy the classifier and the content generator draw from.
pub const SEED_CATEGORIES: &[(&str, CategoryKind)] = &[
    ("Personal Development & Wellness", CategoryKind::Lifestyle),
    ("Art & Creativity", CategoryKind::Interest),
    ("Food & Culinary Arts", CategoryKind::Interest),
    ("Science & Technology", CategoryKind::Interest),
    ("Entertainment & Pop Culture", CategoryKind::Interest),
    ("Travel & Adventure", CategoryKind::Lifestyle),
    ("Sports & Outdoor Activities", CategoryKind::Interest),
    ("Lifestyle & Home Improvement", CategoryKind::Lifestyle),
    ("Education & Learning", CategoryKind::Interest),
    ("Social Issues & Current Events", CategoryKind::Interest),
];

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Category {
    /// Insert categories, skipping names that already exist.
    ///
    /// Returns the number of newly inserted rows.
    pub async fn insert_many(
        entries: &[(&str, CategoryKind)],
        pool: &PgPool,
    ) -> Result<u64> {
        let mut inserted = 0;
        for (name, kind) in entries.iter().copied() {
            let result = sqlx::query(
                r#"
                INSERT INTO categories (name, kind)
                VALUES ($1, $2)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(name)
            .bind(kind)
            .execute(pool)
            .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    /// All categories, alphabetical.
    pub async fn all(pool: &PgPool) -> Result<Vec<Self>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
                .fetch_all(pool)
                .await?;
        Ok(categories)
    }

    /// Total category count.
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// A uniformly random category, or `None` if the table is empty.
    ///
    /// Count-then-offset: random row selection without a table scan.
    pub async fn find_random(pool: &PgPool) -> Result<Option<Self>> {
        let count = Self::count(pool).await?;
        if count == 0 {
            return Ok(None);
        }

        let offset = rand::thread_rng().gen_range(0..count);
        let category = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories ORDER BY id OFFSET $1 LIMIT 1",
        )
        .bind(offset)
        .fetch_optional(pool)
        .await?;
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_list_has_ten_unique_names() {
        let names: HashSet<&str> = SEED_CATEGORIES.iter().map(|(name, _)| *name).collect();
        assert_eq!(SEED_CATEGORIES.len(), 10);
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn seed_list_covers_both_kinds() {
        assert!(SEED_CATEGORIES
            .iter()
            .any(|(_, kind)| *kind == CategoryKind::Interest));
        assert!(SEED_CATEGORIES
            .iter()
            .any(|(_, kind)| *kind == CategoryKind::Lifestyle));
    }

    #[test]
    fn kind_round_trips_through_str() {
        assert_eq!(CategoryKind::Interest.as_str(), "interest");
        assert_eq!(CategoryKind::Lifestyle.as_str(), "lifestyle");
    }
}
