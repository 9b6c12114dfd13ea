//! Repository Traits

use kernel::id::{BlogId, UserId};

use crate::domain::draft::{BlogDraft, CommentDraft};
use crate::domain::entities::{Blog, Comment};
use crate::error::BlogsResult;

/// Blog repository trait.
///
/// Listings are newest first unless stated otherwise.
#[trait_variant::make(BlogRepository: Send)]
pub trait LocalBlogRepository {
    async fn list(&self) -> BlogsResult<Vec<Blog>>;

    async fn list_by_user(&self, user_id: &UserId) -> BlogsResult<Vec<Blog>>;

    async fn find_by_id(&self, id: &BlogId) -> BlogsResult<Option<Blog>>;

    async fn create(&self, user_id: &UserId, draft: &BlogDraft) -> BlogsResult<Blog>;

    /// Replace the content of a blog `user_id` owns. `None` if there is none.
    async fn update(
        &self,
        id: &BlogId,
        user_id: &UserId,
        draft: &BlogDraft,
    ) -> BlogsResult<Option<Blog>>;

    /// Returns whether a blog owned by `user_id` was removed
    async fn delete(&self, id: &BlogId, user_id: &UserId) -> BlogsResult<bool>;

    /// Distinct categories, sorted
    async fn categories(&self) -> BlogsResult<Vec<String>>;

    /// Distinct tag values, sorted
    async fn tags(&self) -> BlogsResult<Vec<String>>;

    /// At most `limit` blogs, most liked first
    async fn popular(&self, limit: i64) -> BlogsResult<Vec<Blog>>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Comments of one blog, oldest first
    async fn list_by_blog(&self, blog_id: &BlogId) -> BlogsResult<Vec<Comment>>;

    /// Insert a comment. An unknown blog is [`BlogsError::BlogNotFound`].
    ///
    /// [`BlogsError::BlogNotFound`]: crate::error::BlogsError::BlogNotFound
    async fn create(&self, draft: &CommentDraft) -> BlogsResult<Comment>;
}
