// Categories domain - the fixed taxonomy posts are classified against

pub mod models;

pub use models::*;
