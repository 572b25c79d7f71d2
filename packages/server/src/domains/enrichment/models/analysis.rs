use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AnalysisId, PostId};

/// Sentiment label set of the hosted sentiment model.
///
/// The model emits opaque `LABEL_n` names; those exact strings are the
/// stored enum values so the rows stay comparable with the raw API output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "sentiment")]
pub enum Sentiment {
    #[sqlx(rename = "LABEL_0")]
    #[serde(rename = "LABEL_0")]
    Negative,
    #[sqlx(rename = "LABEL_1")]
    #[serde(rename = "LABEL_1")]
    Neutral,
    #[sqlx(rename = "LABEL_2")]
    #[serde(rename = "LABEL_2")]
    Positive,
}

impl Sentiment {
    /// Parse a model label. Unknown labels are rejected, not stored.
    pub fn from_model_label(label: &str) -> Option<Self> {
        match label {
            "LABEL_0" => Some(Sentiment::Negative),
            "LABEL_1" => Some(Sentiment::Neutral),
            "LABEL_2" => Some(Sentiment::Positive),
            _ => None,
        }
    }

    /// The raw model label.
    pub fn as_label(&self) -> &'static str {
        match self {
            Sentiment::Negative => "LABEL_0",
            Sentiment::Neutral => "LABEL_1",
            Sentiment::Positive => "LABEL_2",
        }
    }

    /// Human-readable name for reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
        }
    }
}

/// Sentiment analysis result - one row per post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Analysis {
    pub id: AnalysisId,
    pub post_id: PostId,
    pub sentiment: Sentiment,
    pub score: f64,
    pub analyzed_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Analysis {
    /// Write a post's sentiment, replacing any previous result.
    ///
    /// Keyed on `post_id`: concurrent analyzer runs converge to one row.
    pub async fn upsert(
        post_id: PostId,
        sentiment: Sentiment,
        score: f64,
        pool: &PgPool,
    ) -> Result<Self> {
        let analysis = sqlx::query_as::<_, Analysis>(
            r#"
            INSERT INTO analyses (post_id, sentiment, score)
            VALUES ($1, $2, $3)
            ON CONFLICT (post_id) DO UPDATE
            SET sentiment = EXCLUDED.sentiment,
                score = EXCLUDED.score,
                analyzed_at = now()
            RETURNING *
            "#,
        )
        .bind(post_id)
        .bind(sentiment)
        .bind(score)
        .fetch_one(pool)
        .await?;
        Ok(analysis)
    }

    /// Find the analysis for a post.
    pub async fn find_by_post(post_id: PostId, pool: &PgPool) -> Result<Option<Self>> {
        let analysis =
            sqlx::query_as::<_, Analysis>("SELECT * FROM analyses WHERE post_id = $1")
                .bind(post_id)
                .fetch_optional(pool)
                .await?;
        Ok(analysis)
    }

    /// Total analysis count.
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM analyses")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trip() {
        for sentiment in [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive] {
            assert_eq!(
                Sentiment::from_model_label(sentiment.as_label()),
                Some(sentiment)
            );
        }
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert_eq!(Sentiment::from_model_label("LABEL_3"), None);
        assert_eq!(Sentiment::from_model_label("positive"), None);
        assert_eq!(Sentiment::from_model_label(""), None);
    }

    #[test]
    fn serializes_as_raw_model_label() {
        let json = serde_json::to_string(&Sentiment::Positive).unwrap();
        assert_eq!(json, "\"LABEL_2\"");
    }
}
