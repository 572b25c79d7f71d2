//! Synthetic post text: a short opinionated "tweet" about a random category.
//!
//! Generation failures (cold model, missing categories, network) degrade to a
//! fixed fallback string so the post seeder always makes progress.

use anyhow::{Context, Result};
use hf_client::{ChatRequest, HfClient, Message};
use sqlx::PgPool;

use crate::domains::categories::models::Category;

/// Post text used when generation fails.
pub const FALLBACK_POST_TEXT: &str = "Thinking about something interesting...";

const MAX_CONTENT_TOKENS: u32 = 100;

/// Generate post text, falling back to [`FALLBACK_POST_TEXT`] on any failure.
pub async fn generate_post_text(client: &HfClient, model: &str, pool: &PgPool) -> String {
    match try_generate(client, model, pool).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "Error generating post content, using fallback");
            FALLBACK_POST_TEXT.to_string()
        }
    }
}

async fn try_generate(client: &HfClient, model: &str, pool: &PgPool) -> Result<String> {
    let category = Category::find_random(pool)
        .await?
        .context("No categories found in the database")?;

    let request = ChatRequest::new(model)
        .message(Message::user(tweet_prompt(&category.name)))
        .max_tokens(MAX_CONTENT_TOKENS);

    let response = client.chat_completion(request).await?;
    let text = response.content.trim().to_string();
    if text.is_empty() {
        anyhow::bail!("Model returned an empty completion");
    }

    Ok(text)
}

/// The generation prompt for a category.
pub fn tweet_prompt(category: &str) -> String {
    format!(
        "Write a short, opinionated tweet about {}. The opinion can be good, bad, or neutral.",
        category
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_mentions_the_category() {
        let prompt = tweet_prompt("Travel & Adventure");
        assert!(prompt.contains("Travel & Adventure"));
        assert!(prompt.starts_with("Write a short, opinionated tweet"));
    }
}
