//! Unit tests for the synthetic-data selection and hashing helpers.

use pbkdf2::password_hash::{PasswordHash, PasswordVerifier};
use pbkdf2::Pbkdf2;
use server_core::common::UserId;
use server_core::seed::users::{hash_password, random_subset, FOLLOW_SAMPLE_SIZE};
use std::collections::HashSet;

fn id_pool(n: usize) -> Vec<UserId> {
    (0..n).map(|_| UserId::new()).collect()
}

#[test]
fn random_subset_never_includes_self() {
    let ids = id_pool(30);
    let me = ids[7];

    for _ in 0..50 {
        let subset = random_subset(&ids, FOLLOW_SAMPLE_SIZE, me, &mut rand::thread_rng());
        assert!(!subset.contains(&me));
    }
}

#[test]
fn random_subset_has_no_duplicates() {
    let ids = id_pool(30);
    let subset = random_subset(&ids, FOLLOW_SAMPLE_SIZE, ids[0], &mut rand::thread_rng());

    let unique: HashSet<UserId> = subset.iter().copied().collect();
    assert_eq!(unique.len(), subset.len());
}

#[test]
fn random_subset_caps_at_requested_size() {
    let ids = id_pool(30);
    let subset = random_subset(&ids, FOLLOW_SAMPLE_SIZE, ids[0], &mut rand::thread_rng());
    assert_eq!(subset.len(), FOLLOW_SAMPLE_SIZE);
}

#[test]
fn random_subset_returns_everything_when_pool_is_small() {
    let ids = id_pool(5);
    let subset = random_subset(&ids, FOLLOW_SAMPLE_SIZE, ids[2], &mut rand::thread_rng());

    // 4 candidates after excluding self
    assert_eq!(subset.len(), 4);
}

#[test]
fn random_subset_draws_only_from_the_pool() {
    let ids = id_pool(12);
    let subset = random_subset(&ids, FOLLOW_SAMPLE_SIZE, ids[0], &mut rand::thread_rng());

    for id in subset {
        assert!(ids.contains(&id));
    }
}

#[test]
fn hashed_password_is_phc_format_and_verifies() {
    let hash = hash_password("admin123").unwrap();
    assert!(hash.starts_with("$pbkdf2"));

    let parsed = PasswordHash::new(&hash).unwrap();
    assert!(Pbkdf2.verify_password(b"admin123", &parsed).is_ok());
    assert!(Pbkdf2.verify_password(b"wrong-password", &parsed).is_err());
}

#[test]
fn hashing_salts_each_password() {
    let first = hash_password("same-input").unwrap();
    let second = hash_password("same-input").unwrap();
    assert_ne!(first, second);
}
