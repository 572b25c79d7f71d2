//! User seeder: batched synthetic accounts plus a random follow graph.
//!
//! Usernames and emails are deduplicated in-process before insert (the
//! columns are UNIQUE). After each batch every inserted user gets up to
//! [`FOLLOW_SAMPLE_SIZE`] random followers and following drawn from that
//! batch, never including themselves. An `admin` account is upserted last.

use anyhow::{Context, Result};
use pbkdf2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use pbkdf2::Pbkdf2;
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::PgPool;
use std::collections::HashSet;

use super::BATCH_SIZE;
use crate::common::UserId;
use crate::domains::users::models::{NewUser, User};

/// Follow-graph sample size per user.
pub const FOLLOW_SAMPLE_SIZE: usize = 10;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_EMAIL: &str = "admin@gmail.com";
const ADMIN_PASSWORD: &str = "admin123";

const FIRST_NAMES: &[&str] = &[
    "Ava", "Noah", "Mia", "Liam", "Zoe", "Ethan", "Ruby", "Owen", "Ivy", "Leo",
    "Nora", "Eli", "Maya", "Jude", "Cora", "Finn", "Lena", "Axel", "Tess", "Remy",
    "Isla", "Hugo", "Wren", "Silas",
];

const LAST_NAMES: &[&str] = &[
    "Hansen", "Okafor", "Silva", "Kim", "Novak", "Diaz", "Laine", "Moreau", "Patel",
    "Becker", "Costa", "Haddad", "Iversen", "Juarez", "Kowal", "Lindgren", "Mbeki",
    "Nair", "Ortega", "Petrov", "Quinn", "Rossi", "Sato", "Varga",
];

pub async fn run(pool: &PgPool, num_users: usize) -> Result<()> {
    let mut usernames: HashSet<String> = HashSet::new();
    let mut emails: HashSet<String> = HashSet::new();
    let mut batch: Vec<NewUser> = Vec::with_capacity(BATCH_SIZE);

    for i in 0..num_users {
        batch.push(generate_user(&mut usernames, &mut emails)?);

        if batch.len() >= BATCH_SIZE || i == num_users - 1 {
            let inserted = User::insert_batch(&batch, pool)
                .await
                .context("Failed to insert user batch")?;
            tracing::info!("Inserted {} users", inserted.len());
            batch.clear();

            // Wire up a random follow graph within the batch
            let ids: Vec<UserId> = inserted.iter().map(|user| user.id).collect();
            for user in &inserted {
                let followers =
                    random_subset(&ids, FOLLOW_SAMPLE_SIZE, user.id, &mut rand::thread_rng());
                let following =
                    random_subset(&ids, FOLLOW_SAMPLE_SIZE, user.id, &mut rand::thread_rng());
                User::set_follow_graph(user.id, &followers, &following, pool)
                    .await
                    .context("Failed to set follow graph")?;
            }
        }
    }

    tracing::info!(
        num_users,
        "Successfully created users with followers and following"
    );

    seed_admin(pool).await?;

    Ok(())
}

/// Create or refresh the admin account and give it a random follow graph.
async fn seed_admin(pool: &PgPool) -> Result<()> {
    let admin_input = NewUser {
        full_name: "Admin".to_string(),
        username: ADMIN_USERNAME.to_string(),
        email: ADMIN_EMAIL.to_string(),
        password_hash: hash_password(ADMIN_PASSWORD)?,
        profile_img: Some(avatar_url(ADMIN_USERNAME)),
        cover_img: Some(cover_url(ADMIN_USERNAME)),
    };

    let admin = User::upsert_by_username(&admin_input, pool)
        .await
        .context("Failed to upsert admin user")?;
    tracing::info!("Admin user created or updated");

    let all_ids = User::all_ids(pool).await?;
    let followers = random_subset(&all_ids, FOLLOW_SAMPLE_SIZE, admin.id, &mut rand::thread_rng());
    let following = random_subset(&all_ids, FOLLOW_SAMPLE_SIZE, admin.id, &mut rand::thread_rng());
    User::set_follow_graph(admin.id, &followers, &following, pool)
        .await
        .context("Failed to set admin follow graph")?;
    tracing::info!("Admin followers and following set");

    Ok(())
}

/// Generate one user with a username/email not seen before in this run.
fn generate_user(
    usernames: &mut HashSet<String>,
    emails: &mut HashSet<String>,
) -> Result<NewUser> {
    let mut rng = rand::thread_rng();

    let first = FIRST_NAMES
        .choose(&mut rng)
        .context("First name pool is empty")?;
    let last = LAST_NAMES
        .choose(&mut rng)
        .context("Last name pool is empty")?;
    let full_name = format!("{} {}", first, last);

    let mut username;
    loop {
        username = format!(
            "{}_{}{}",
            first.to_lowercase(),
            last.to_lowercase(),
            rng.gen_range(0..10_000)
        );
        if usernames.insert(username.clone()) {
            break;
        }
    }

    let mut email;
    loop {
        email = format!(
            "{}.{}{}@example.com",
            first.to_lowercase(),
            last.to_lowercase(),
            rng.gen_range(0..100_000)
        );
        if emails.insert(email.clone()) {
            break;
        }
    }

    let password: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();

    Ok(NewUser {
        full_name,
        password_hash: hash_password(&password)?,
        profile_img: Some(avatar_url(&username)),
        cover_img: Some(cover_url(&username)),
        username,
        email,
    })
}

/// Up to `num` IDs drawn uniformly from `ids`, never including `exclude`.
pub fn random_subset(
    ids: &[UserId],
    num: usize,
    exclude: UserId,
    rng: &mut impl Rng,
) -> Vec<UserId> {
    let mut candidates: Vec<UserId> = ids.iter().copied().filter(|id| *id != exclude).collect();
    candidates.shuffle(rng);
    candidates.truncate(num);
    candidates
}

/// PHC-format pbkdf2 hash with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Pbkdf2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

fn avatar_url(username: &str) -> String {
    format!("https://i.pravatar.cc/150?u={}", username)
}

fn cover_url(username: &str) -> String {
    format!("https://picsum.photos/seed/{}/800/300", username)
}
