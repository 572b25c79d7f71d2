// Analytics domain - read-side aggregations over enrichment results

pub mod queries;

pub use queries::*;
