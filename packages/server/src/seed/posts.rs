//! Post seeder: batched synthetic posts attributed to random users.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::PgPool;

use super::{content, BATCH_SIZE};
use hf_client::HfClient;

use crate::domains::posts::models::{NewPost, Post};
use crate::domains::users::models::User;

/// Posts get a creation time within this many seconds of now.
const RECENT_WINDOW_SECS: i64 = 24 * 60 * 60;

pub async fn run(
    pool: &PgPool,
    client: &HfClient,
    content_model: &str,
    num_posts: usize,
) -> Result<()> {
    let user_ids = User::all_ids(pool)
        .await
        .context("Failed to fetch user IDs")?;
    if user_ids.is_empty() {
        tracing::warn!("No users found, cannot create posts");
        return Ok(());
    }

    let mut batch: Vec<NewPost> = Vec::with_capacity(BATCH_SIZE);

    for i in 0..num_posts {
        let text = content::generate_post_text(client, content_model, pool).await;
        let user_id = *user_ids
            .choose(&mut rand::thread_rng())
            .context("User ID pool unexpectedly empty")?;

        batch.push(NewPost {
            user_id,
            text,
            img: None,
            created_at: recent_timestamp(&mut rand::thread_rng()),
        });

        if batch.len() >= BATCH_SIZE || i == num_posts - 1 {
            let inserted = Post::insert_batch(&batch, pool)
                .await
                .context("Failed to insert post batch")?;
            tracing::info!("Inserted {} posts", inserted.len());
            batch.clear();
        }
    }

    tracing::info!(num_posts, "Successfully created posts");
    Ok(())
}

/// A random instant within the last [`RECENT_WINDOW_SECS`].
pub fn recent_timestamp(rng: &mut impl Rng) -> DateTime<Utc> {
    Utc::now() - Duration::seconds(rng.gen_range(0..RECENT_WINDOW_SECS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_timestamp_is_within_window() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let ts = recent_timestamp(&mut rng);
            let age = Utc::now() - ts;
            assert!(age >= Duration::zero());
            assert!(age <= Duration::seconds(RECENT_WINDOW_SECS));
        }
    }
}
