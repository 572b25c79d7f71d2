use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{PostId, UserId};

/// Short text entry attributed to a user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub text: String,
    pub img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set for a post not yet persisted.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: UserId,
    pub text: String,
    pub img: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Post {
    /// Insert a batch of posts in one statement.
    pub async fn insert_batch(posts: &[NewPost], pool: &PgPool) -> Result<Vec<Self>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<UserId> = posts.iter().map(|p| p.user_id).collect();
        let texts: Vec<String> = posts.iter().map(|p| p.text.clone()).collect();
        let imgs: Vec<Option<String>> = posts.iter().map(|p| p.img.clone()).collect();
        let created_ats: Vec<DateTime<Utc>> = posts.iter().map(|p| p.created_at).collect();

        let inserted = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (user_id, text, img, created_at)
            SELECT *
            FROM UNNEST($1::uuid[], $2::text[], $3::text[], $4::timestamptz[])
            RETURNING *
            "#,
        )
        .bind(&user_ids)
        .bind(&texts)
        .bind(&imgs)
        .bind(&created_ats)
        .fetch_all(pool)
        .await?;
        Ok(inserted)
    }

    /// All posts, oldest first.
    pub async fn all(pool: &PgPool) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, Post>("SELECT * FROM posts ORDER BY created_at")
            .fetch_all(pool)
            .await?;
        Ok(posts)
    }

    /// Posts with no sentiment analysis row yet.
    pub async fn without_analysis(pool: &PgPool) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT p.*
            FROM posts p
            LEFT JOIN analyses a ON a.post_id = p.id
            WHERE a.id IS NULL
            ORDER BY p.created_at
            "#,
        )
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Total post count.
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }
}
