//! Batch sentiment analysis over posts.
//!
//! Waits for the hosted model to warm up, scores every post (or only the
//! unscored ones), picks the highest-confidence label, and upserts the
//! result keyed on the post. Per-post failures are logged and counted, not
//! fatal, so one bad post cannot sink a batch.

use anyhow::{Context, Result};
use hf_client::{HfClient, LabelScore};
use sqlx::PgPool;
use std::time::Duration;
use tokio::time::sleep;

use super::models::{Analysis, Sentiment};
use super::BatchOutcome;
use crate::domains::posts::models::Post;

const RATE_LIMIT_DELAY_MS: u64 = 100;

/// Configuration for the sentiment batch.
#[derive(Debug, Clone)]
pub struct SentimentConfig {
    /// Hosted model to score against
    pub model: String,
    /// Skip posts that already have an analysis row
    pub pending_only: bool,
}

/// Batch sentiment analyzer.
pub struct SentimentService {
    client: HfClient,
    config: SentimentConfig,
}

impl SentimentService {
    pub fn new(client: HfClient, model: impl Into<String>) -> Self {
        Self {
            client,
            config: SentimentConfig {
                model: model.into(),
                pending_only: false,
            },
        }
    }

    /// Restrict the run to posts without an existing analysis.
    pub fn pending_only(mut self, pending_only: bool) -> Self {
        self.config.pending_only = pending_only;
        self
    }

    /// Score posts and persist the results.
    pub async fn analyze_posts(&self, pool: &PgPool) -> Result<BatchOutcome> {
        self.client
            .wait_until_ready(&self.config.model)
            .await
            .context("Sentiment model never became ready")?;

        let posts = if self.config.pending_only {
            Post::without_analysis(pool).await
        } else {
            Post::all(pool).await
        }
        .context("Failed to fetch posts for analysis")?;

        let total = posts.len();
        tracing::info!(
            total_posts = total,
            pending_only = self.config.pending_only,
            "Found {} posts to analyze",
            total
        );

        if total == 0 {
            return Ok(BatchOutcome::default());
        }

        let mut processed = 0;
        let mut failed = 0;

        for (idx, post) in posts.iter().enumerate() {
            tracing::info!(
                progress = format!("{}/{}", idx + 1, total),
                post_id = %post.id,
                "Analyzing post"
            );

            match self.score_text(&post.text).await {
                Ok((sentiment, score)) => {
                    match Analysis::upsert(post.id, sentiment, score, pool).await {
                        Ok(_) => {
                            processed += 1;
                            tracing::debug!(
                                post_id = %post.id,
                                sentiment = sentiment.display_name(),
                                score,
                                "Stored sentiment"
                            );
                        }
                        Err(e) => {
                            failed += 1;
                            tracing::error!(
                                error = %e,
                                post_id = %post.id,
                                "Failed to save analysis to database"
                            );
                        }
                    }
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!(
                        error = %e,
                        post_id = %post.id,
                        "Failed to analyze post"
                    );
                }
            }

            // Rate limiting: small delay between API calls
            if idx < total - 1 {
                sleep(Duration::from_millis(RATE_LIMIT_DELAY_MS)).await;
            }
        }

        tracing::info!(
            processed,
            failed,
            total,
            "Completed batch sentiment analysis"
        );

        Ok(BatchOutcome {
            processed,
            failed,
            total,
        })
    }

    /// Score one text and map the winning label onto the fixed label set.
    async fn score_text(&self, text: &str) -> Result<(Sentiment, f64)> {
        let scores = self.client.sentiment(&self.config.model, text).await?;

        let top = top_sentiment(&scores)
            .context("Model returned no sentiment scores")?;
        let sentiment = Sentiment::from_model_label(&top.label).with_context(|| {
            format!("Model returned unknown sentiment label: {}", top.label)
        })?;

        Ok((sentiment, top.score))
    }
}

/// The highest-scoring label; the earliest wins a tie.
pub fn top_sentiment(scores: &[LabelScore]) -> Option<&LabelScore> {
    scores.iter().fold(None, |best, current| match best {
        Some(b) if current.score > b.score => Some(current),
        None => Some(current),
        keep => keep,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(label: &str, score: f64) -> LabelScore {
        LabelScore {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn picks_highest_score() {
        let scores = vec![
            score("LABEL_1", 0.07),
            score("LABEL_2", 0.91),
            score("LABEL_0", 0.02),
        ];
        assert_eq!(top_sentiment(&scores).unwrap().label, "LABEL_2");
    }

    #[test]
    fn first_label_wins_ties() {
        let scores = vec![score("LABEL_0", 0.5), score("LABEL_2", 0.5)];
        assert_eq!(top_sentiment(&scores).unwrap().label, "LABEL_0");
    }

    #[test]
    fn empty_scores_yield_none() {
        assert!(top_sentiment(&[]).is_none());
    }
}
