// Chatter - social feed enrichment core
//
// This crate provides the data layer and batch pipeline for a social feed
// whose posts get enriched with sentiment scores and topic classifications
// from hosted inference models. Components compose through the shared
// Postgres database only; enrichment and seeding run as standalone binaries.

pub mod common;
pub mod config;
pub mod domains;
pub mod seed;

pub use config::*;
