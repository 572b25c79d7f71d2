pub mod analytics;
pub mod categories;
pub mod enrichment;
pub mod posts;
pub mod users;
