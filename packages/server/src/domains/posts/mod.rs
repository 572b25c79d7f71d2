// Posts domain - the feed entries the enrichment pipeline scores

pub mod models;

pub use models::*;
