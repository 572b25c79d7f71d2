//! Aggregations over enrichment results, consumed by the `report` binary.

use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;

use crate::domains::enrichment::models::Sentiment;
use crate::domains::posts::models::Post;
use crate::domains::users::models::User;

/// One sentiment label with its share of all analyses.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentBucket {
    pub sentiment: Sentiment,
    pub count: i64,
    pub percentage: f64,
}

/// Sentiment distribution across all analyzed posts.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentSummary {
    pub total: i64,
    #[serde(rename = "sentimentData")]
    pub sentiment_data: Vec<SentimentBucket>,
}

/// Post count per category, most classified first.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBucket {
    pub category: String,
    pub count: i64,
}

/// Everything the dashboard shows, in one payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_users: i64,
    pub total_posts: i64,
    pub total_sentiments: i64,
    pub sentiment_data: Vec<SentimentBucket>,
    pub classification_data: Vec<CategoryBucket>,
}

/// Share of `count` in `total` as a percentage, rounded to 2 decimals.
pub fn percentage(count: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = (count as f64 / total as f64) * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Sentiment counts grouped by label, with percentages of the total.
pub async fn sentiment_summary(pool: &PgPool) -> Result<SentimentSummary> {
    let rows: Vec<(Sentiment, i64)> =
        sqlx::query_as("SELECT sentiment, COUNT(*) FROM analyses GROUP BY sentiment")
            .fetch_all(pool)
            .await?;

    let total: i64 = rows.iter().map(|(_, count)| count).sum();
    let sentiment_data = rows
        .into_iter()
        .map(|(sentiment, count)| SentimentBucket {
            sentiment,
            count,
            percentage: percentage(count, total),
        })
        .collect();

    Ok(SentimentSummary {
        total,
        sentiment_data,
    })
}

/// Classification counts per category name.
pub async fn category_summary(pool: &PgPool) -> Result<Vec<CategoryBucket>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT c.name, COUNT(*)
        FROM classifications cl
        INNER JOIN categories c ON c.id = cl.category_id
        GROUP BY c.name
        ORDER BY COUNT(*) DESC, c.name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(category, count)| CategoryBucket { category, count })
        .collect())
}

/// The full dashboard payload: totals plus both distributions.
pub async fn dashboard_summary(pool: &PgPool) -> Result<DashboardSummary> {
    let sentiment = sentiment_summary(pool).await?;
    let classification_data = category_summary(pool).await?;
    let total_users = User::count(pool).await?;
    let total_posts = Post::count(pool).await?;

    Ok(DashboardSummary {
        total_users,
        total_posts,
        total_sentiments: sentiment.total,
        sentiment_data: sentiment.sentiment_data,
        classification_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(1, 1), 100.0);
    }

    #[test]
    fn percentage_of_zero_total_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn dashboard_payload_uses_camel_case_keys() {
        let summary = DashboardSummary {
            total_users: 2,
            total_posts: 5,
            total_sentiments: 3,
            sentiment_data: vec![SentimentBucket {
                sentiment: Sentiment::Positive,
                count: 3,
                percentage: 100.0,
            }],
            classification_data: vec![CategoryBucket {
                category: "Art & Creativity".to_string(),
                count: 1,
            }],
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalUsers"], 2);
        assert_eq!(json["totalPosts"], 5);
        assert_eq!(json["sentimentData"][0]["sentiment"], "LABEL_2");
        assert_eq!(json["classificationData"][0]["count"], 1);
    }
}
