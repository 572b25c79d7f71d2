use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::UserId;

/// Account with a denormalized follow graph.
///
/// Followers/following are stored as ID arrays on the row itself, matching
/// the feed's read pattern (a profile render needs the counts and a page of
/// IDs, not a join).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub followers: Vec<UserId>,
    pub following: Vec<UserId>,
    pub profile_img: Option<String>,
    pub cover_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set for a user not yet persisted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_img: Option<String>,
    pub cover_img: Option<String>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl User {
    /// Insert a batch of users in one statement.
    pub async fn insert_batch(users: &[NewUser], pool: &PgPool) -> Result<Vec<Self>> {
        if users.is_empty() {
            return Ok(Vec::new());
        }

        let full_names: Vec<String> = users.iter().map(|u| u.full_name.clone()).collect();
        let usernames: Vec<String> = users.iter().map(|u| u.username.clone()).collect();
        let emails: Vec<String> = users.iter().map(|u| u.email.clone()).collect();
        let password_hashes: Vec<String> = users.iter().map(|u| u.password_hash.clone()).collect();
        let profile_imgs: Vec<Option<String>> = users.iter().map(|u| u.profile_img.clone()).collect();
        let cover_imgs: Vec<Option<String>> = users.iter().map(|u| u.cover_img.clone()).collect();

        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, username, email, password_hash, profile_img, cover_img)
            SELECT *
            FROM UNNEST($1::text[], $2::text[], $3::text[], $4::text[], $5::text[], $6::text[])
            RETURNING *
            "#,
        )
        .bind(&full_names)
        .bind(&usernames)
        .bind(&emails)
        .bind(&password_hashes)
        .bind(&profile_imgs)
        .bind(&cover_imgs)
        .fetch_all(pool)
        .await?;
        Ok(inserted)
    }

    /// Create or refresh a user keyed on username.
    pub async fn upsert_by_username(user: &NewUser, pool: &PgPool) -> Result<Self> {
        let upserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, username, email, password_hash, profile_img, cover_img)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (username) DO UPDATE
            SET full_name = EXCLUDED.full_name,
                email = EXCLUDED.email,
                password_hash = EXCLUDED.password_hash,
                profile_img = EXCLUDED.profile_img,
                cover_img = EXCLUDED.cover_img,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(&user.full_name)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.profile_img)
        .bind(&user.cover_img)
        .fetch_one(pool)
        .await?;
        Ok(upserted)
    }

    /// Replace a user's follow graph.
    pub async fn set_follow_graph(
        id: UserId,
        followers: &[UserId],
        following: &[UserId],
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE users SET followers = $2, following = $3, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(followers)
        .bind(following)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a user by username.
    pub async fn find_by_username(username: &str, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// All user IDs.
    pub async fn all_ids(pool: &PgPool) -> Result<Vec<UserId>> {
        let ids: Vec<(UserId,)> = sqlx::query_as("SELECT id FROM users")
            .fetch_all(pool)
            .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    /// Total user count.
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }
}
