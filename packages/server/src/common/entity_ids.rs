//! Typed ID definitions for all domain entities.
//!
//! Type aliases over [`Id`] give compile-time safety for ID usage throughout
//! the application: a `UserId` and a `PostId` are incompatible types.

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (accounts).
pub struct User;

/// Marker type for Post entities (feed entries).
pub struct Post;

/// Marker type for Category entities (classification taxonomy).
pub struct Category;

/// Marker type for Analysis entities (sentiment results).
pub struct Analysis;

/// Marker type for Classification entities (post/category relevance).
pub struct Classification;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Post entities.
pub type PostId = Id<Post>;

/// Typed ID for Category entities.
pub type CategoryId = Id<Category>;

/// Typed ID for Analysis entities.
pub type AnalysisId = Id<Analysis>;

/// Typed ID for Classification entities.
pub type ClassificationId = Id<Classification>;
