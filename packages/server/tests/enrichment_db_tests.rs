//! Integration tests for the upsert semantics of enrichment writes.
//!
//! These require a migrated Postgres database. Run with:
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test -p server -- --ignored
//! ```

use server_core::domains::categories::models::{Category, CategoryKind};
use server_core::domains::enrichment::models::{Analysis, Classification, Sentiment};
use server_core::domains::posts::models::{NewPost, Post};
use server_core::domains::users::models::{NewUser, User};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

async fn connect() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

async fn seed_post(pool: &PgPool) -> Post {
    let tag = Uuid::new_v4().simple().to_string();
    let users = User::insert_batch(
        &[NewUser {
            full_name: "Test User".to_string(),
            username: format!("test_user_{}", tag),
            email: format!("test_{}@example.com", tag),
            password_hash: "$pbkdf2-sha256$test".to_string(),
            profile_img: None,
            cover_img: None,
        }],
        pool,
    )
    .await
    .expect("failed to insert user");

    let posts = Post::insert_batch(
        &[NewPost {
            user_id: users[0].id,
            text: "Just finished an amazing trail run!".to_string(),
            img: None,
            created_at: chrono::Utc::now(),
        }],
        pool,
    )
    .await
    .expect("failed to insert post");

    posts.into_iter().next().expect("post batch was empty")
}

async fn seed_category(pool: &PgPool) -> Category {
    let name = format!("Test Category {}", Uuid::new_v4().simple());
    Category::insert_many(&[(name.as_str(), CategoryKind::Interest)], pool)
        .await
        .expect("failed to insert category");

    Category::all(pool)
        .await
        .expect("failed to list categories")
        .into_iter()
        .find(|c| c.name == name)
        .expect("inserted category not found")
}

#[tokio::test]
#[ignore] // Requires database
async fn classification_upsert_converges_to_one_row() {
    let pool = connect().await;
    let post = seed_post(&pool).await;
    let category = seed_category(&pool).await;

    Classification::upsert(post.id, category.id, 0.61, &pool)
        .await
        .expect("first upsert failed");
    let updated = Classification::upsert(post.id, category.id, 0.72, &pool)
        .await
        .expect("second upsert failed");

    assert!((updated.relevance_score - 0.72).abs() < 1e-9);

    let rows = Classification::find_for_post(post.id, &pool)
        .await
        .expect("failed to list classifications");
    assert_eq!(rows.len(), 1);
    assert!((rows[0].relevance_score - 0.72).abs() < 1e-9);

    let total = Classification::count(&pool)
        .await
        .expect("failed to count classifications");
    assert!(total >= 1);
}

#[tokio::test]
#[ignore] // Requires database
async fn analysis_upsert_replaces_previous_result() {
    let pool = connect().await;
    let post = seed_post(&pool).await;

    Analysis::upsert(post.id, Sentiment::Positive, 0.9, &pool)
        .await
        .expect("first upsert failed");
    Analysis::upsert(post.id, Sentiment::Negative, 0.4, &pool)
        .await
        .expect("second upsert failed");

    let analysis = Analysis::find_by_post(post.id, &pool)
        .await
        .expect("failed to fetch analysis")
        .expect("analysis row missing");

    assert_eq!(analysis.sentiment, Sentiment::Negative);
    assert!((analysis.score - 0.4).abs() < 1e-9);

    let total = Analysis::count(&pool).await.expect("failed to count analyses");
    assert!(total >= 1);
}

#[tokio::test]
#[ignore] // Requires database
async fn posts_without_analysis_shrinks_as_posts_are_scored() {
    let pool = connect().await;
    let post = seed_post(&pool).await;

    let pending_before = Post::without_analysis(&pool)
        .await
        .expect("failed to list pending posts");
    assert!(pending_before.iter().any(|p| p.id == post.id));

    Analysis::upsert(post.id, Sentiment::Neutral, 0.55, &pool)
        .await
        .expect("upsert failed");

    let pending_after = Post::without_analysis(&pool)
        .await
        .expect("failed to list pending posts");
    assert!(!pending_after.iter().any(|p| p.id == post.id));
}
