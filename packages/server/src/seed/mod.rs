// Synthetic data generation for local development and pipeline testing.
//
// Seeders are idempotent where the schema allows it (categories, admin user)
// and batch their inserts. They share the database with the enrichment
// binaries and nothing else.

pub mod categories;
pub mod content;
pub mod posts;
pub mod users;

/// Rows per INSERT statement.
pub(crate) const BATCH_SIZE: usize = 100;
