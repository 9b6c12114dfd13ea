//! Repository Traits

use kernel::id::{BlogId, VisitorId};

use crate::domain::entities::BlogLike;
use crate::error::LikesResult;

/// Blog like repository trait
#[trait_variant::make(BlogLikeRepository: Send)]
pub trait LocalBlogLikeRepository {
    /// All likes of a visitor
    async fn list_by_visitor(&self, visit_id: &VisitorId) -> LikesResult<Vec<BlogLike>>;

    async fn exists(&self, blog_id: &BlogId, visit_id: &VisitorId) -> LikesResult<bool>;

    /// Insert a like. A duplicate (blog, visitor) pair is [`LikesError::AlreadyLiked`].
    ///
    /// [`LikesError::AlreadyLiked`]: crate::error::LikesError::AlreadyLiked
    async fn create(&self, blog_id: &BlogId, visit_id: &VisitorId) -> LikesResult<BlogLike>;

    /// Returns whether a like was removed
    async fn delete(&self, blog_id: &BlogId, visit_id: &VisitorId) -> LikesResult<bool>;
}
