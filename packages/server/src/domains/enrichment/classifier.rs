//! Batch zero-shot classification of posts against the category taxonomy.
//!
//! Every post is scored against all category names as candidate labels.
//! Only scores strictly above [`RELEVANCE_THRESHOLD`] are persisted, keyed
//! on `(post, category)` so repeated and concurrent runs converge.

use anyhow::{Context, Result};
use hf_client::HfClient;
use sqlx::PgPool;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;

use super::models::Classification;
use super::BatchOutcome;
use crate::domains::categories::models::Category;
use crate::domains::posts::models::Post;

/// Minimum zero-shot score for a classification to be stored (strict).
pub const RELEVANCE_THRESHOLD: f64 = 0.5;

const RATE_LIMIT_DELAY_MS: u64 = 100;

/// Whether a zero-shot score is strong enough to persist.
pub fn passes_threshold(score: f64) -> bool {
    score > RELEVANCE_THRESHOLD
}

/// Batch zero-shot classifier.
pub struct ClassificationService {
    client: HfClient,
    model: String,
}

impl ClassificationService {
    pub fn new(client: HfClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Classify every post against every category and persist the matches.
    pub async fn classify_posts(&self, pool: &PgPool) -> Result<BatchOutcome> {
        self.client
            .wait_until_ready(&self.model)
            .await
            .context("Zero-shot model never became ready")?;

        let categories = Category::all(pool)
            .await
            .context("Failed to fetch categories")?;
        if categories.is_empty() {
            tracing::info!("No categories found, stopping classification");
            return Ok(BatchOutcome::default());
        }

        let by_name: HashMap<&str, &Category> = categories
            .iter()
            .map(|category| (category.name.as_str(), category))
            .collect();
        let candidate_labels: Vec<String> =
            categories.iter().map(|category| category.name.clone()).collect();

        let posts = Post::all(pool).await.context("Failed to fetch posts")?;
        if posts.is_empty() {
            tracing::info!("No posts found, stopping classification");
            return Ok(BatchOutcome::default());
        }

        let total = posts.len();
        tracing::info!(
            total_posts = total,
            categories = categories.len(),
            "Classifying {} posts",
            total
        );

        let mut processed = 0;
        let mut failed = 0;

        for (idx, post) in posts.iter().enumerate() {
            tracing::info!(
                progress = format!("{}/{}", idx + 1, total),
                post_id = %post.id,
                "Classifying post"
            );

            match self
                .classify_one(post, &candidate_labels, &by_name, pool)
                .await
            {
                Ok(saved) => {
                    processed += 1;
                    tracing::debug!(
                        post_id = %post.id,
                        saved_labels = saved,
                        "Classified post"
                    );
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!(
                        error = %e,
                        post_id = %post.id,
                        "Failed to classify post"
                    );
                }
            }

            // Rate limiting: small delay between API calls
            if idx < total - 1 {
                sleep(Duration::from_millis(RATE_LIMIT_DELAY_MS)).await;
            }
        }

        tracing::info!(processed, failed, total, "Completed batch classification");

        Ok(BatchOutcome {
            processed,
            failed,
            total,
        })
    }

    /// Classify one post; returns how many labels cleared the threshold.
    async fn classify_one(
        &self,
        post: &Post,
        candidate_labels: &[String],
        by_name: &HashMap<&str, &Category>,
        pool: &PgPool,
    ) -> Result<usize> {
        let response = self
            .client
            .zero_shot(&self.model, &post.text, candidate_labels)
            .await?;

        let mut saved = 0;
        for (label, score) in response.scored_labels() {
            if !passes_threshold(score) {
                tracing::debug!(
                    post_id = %post.id,
                    label,
                    score,
                    "Score too low, skipping"
                );
                continue;
            }

            let Some(category) = by_name.get(label) else {
                tracing::warn!(
                    post_id = %post.id,
                    label,
                    "Model returned a label with no matching category, skipping"
                );
                continue;
            };

            Classification::upsert(post.id, category.id, score, pool)
                .await
                .with_context(|| {
                    format!("Failed to save classification for category {}", label)
                })?;
            saved += 1;

            tracing::info!(
                post_id = %post.id,
                category = label,
                score,
                "Saved classification"
            );
        }

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        assert!(!passes_threshold(0.5));
        assert!(passes_threshold(0.500001));
        assert!(passes_threshold(1.0));
        assert!(!passes_threshold(0.49));
        assert!(!passes_threshold(0.0));
    }
}
