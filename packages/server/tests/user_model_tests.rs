//! Integration tests for user persistence.
//!
//! These require a migrated Postgres database. Run with:
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test -p server -- --ignored
//! ```

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

#[tokio::test]
#[ignore] // Requires database
async fn upsert_by_username_is_idempotent() {
    let pool = connect().await;
    let tag = Uuid::new_v4().simple().to_string();

    let input = NewUser {
        full_name: "Original Name".to_string(),
        username: format!("upsert_user_{}", tag),
        email: format!("upsert_{}@example.com", tag),
        password_hash: "$pbkdf2-sha256$test".to_string(),
        profile_img: None,
        cover_img: None,
    };

    let first = User::upsert_by_username(&input, &pool)
        .await
        .expect("first upsert failed");

    let mut renamed = input.clone();
    renamed.full_name = "Renamed".to_string();
    let second = User::upsert_by_username(&renamed, &pool)
        .await
        .expect("second upsert failed");

    // Same row, refreshed fields
    assert_eq!(first.id, second.id);

    let found = User::find_by_username(&input.username, &pool)
        .await
        .expect("lookup failed")
        .expect("user missing");
    assert_eq!(found.full_name, "Renamed");
}

#[tokio::test]
#[ignore] // Requires database
async fn insert_batch_returns_every_row() {
    let pool = connect().await;
    let tag = Uuid::new_v4().simple().to_string();

    let before = User::count(&pool).await.expect("count failed");

    let batch: Vec<NewUser> = (0..3)
        .map(|i| NewUser {
            full_name: format!("Batch User {}", i),
            username: format!("batch_user_{}_{}", i, tag),
            email: format!("batch_{}_{}@example.com", i, tag),
            password_hash: "$pbkdf2-sha256$test".to_string(),
            profile_img: None,
            cover_img: None,
        })
        .collect();

    let inserted = User::insert_batch(&batch, &pool)
        .await
        .expect("batch insert failed");
    assert_eq!(inserted.len(), 3);

    let after = User::count(&pool).await.expect("count failed");
    assert_eq!(after, before + 3);

    // Follow graph starts empty and can be replaced
    let ids: Vec<_> = inserted.iter().map(|u| u.id).collect();
    assert!(inserted.iter().all(|u| u.followers.is_empty()));

    User::set_follow_graph(ids[0], &ids[1..], &ids[1..], &pool)
        .await
        .expect("set_follow_graph failed");

    let updated = User::find_by_username(&inserted[0].username, &pool)
        .await
        .expect("lookup failed")
        .expect("user missing");
    assert_eq!(updated.followers.len(), 2);
    assert_eq!(updated.following.len(), 2);
}
