use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CategoryId, ClassificationId, PostId};

/// Post/category relevance above the classifier threshold.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Classification {
    pub id: ClassificationId,
    pub post_id: PostId,
    pub category_id: CategoryId,
    pub relevance_score: f64,
    pub classified_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Classification {
    /// Write a post/category relevance score, replacing any previous one.
    ///
    /// Keyed on `(post_id, category_id)`: concurrent classifier runs
    /// converge to one row per pair.
    pub async fn upsert(
        post_id: PostId,
        category_id: CategoryId,
        relevance_score: f64,
        pool: &PgPool,
    ) -> Result<Self> {
        let classification = sqlx::query_as::<_, Classification>(
            r#"
            INSERT INTO classifications (post_id, category_id, relevance_score)
            VALUES ($1, $2, $3)
            ON CONFLICT (post_id, category_id) DO UPDATE
            SET relevance_score = EXCLUDED.relevance_score,
                classified_at = now()
            RETURNING *
            "#,
        )
        .bind(post_id)
        .bind(category_id)
        .bind(relevance_score)
        .fetch_one(pool)
        .await?;
        Ok(classification)
    }

    /// All classifications for a post, most relevant first.
    pub async fn find_for_post(post_id: PostId, pool: &PgPool) -> Result<Vec<Self>> {
        let classifications = sqlx::query_as::<_, Classification>(
            "SELECT * FROM classifications WHERE post_id = $1 ORDER BY relevance_score DESC",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await?;
        Ok(classifications)
    }

    /// Total classification count.
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM classifications")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }
}
