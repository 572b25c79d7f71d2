// Users domain - accounts and the denormalized follow graph

pub mod models;

pub use models::*;
