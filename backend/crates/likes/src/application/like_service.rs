//! Like Service
//!
//! Like operations of one visitor.

use std::sync::Arc;

use kernel::id::{BlogId, VisitorId};

use crate::domain::entities::BlogLike;
use crate::domain::repository::BlogLikeRepository;
use crate::error::{LikesError, LikesResult};

pub struct LikeService<R>
where
    R: BlogLikeRepository,
{
    repo: Arc<R>,
}

impl<R> LikeService<R>
where
    R: BlogLikeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, visit_id: &VisitorId) -> LikesResult<Vec<BlogLike>> {
        self.repo.list_by_visitor(visit_id).await
    }

    pub async fn is_liked(&self, blog_id: &BlogId, visit_id: &VisitorId) -> LikesResult<bool> {
        self.repo.exists(blog_id, visit_id).await
    }

    pub async fn like(&self, blog_id: &BlogId, visit_id: &VisitorId) -> LikesResult<BlogLike> {
        if self.repo.exists(blog_id, visit_id).await? {
            return Err(LikesError::AlreadyLiked);
        }

        let like = self.repo.create(blog_id, visit_id).await?;
        tracing::info!(blog_id = %blog_id, visit_id = %visit_id, "Blog liked");
        Ok(like)
    }

    /// Idempotent: removing a missing like succeeds
    pub async fn unlike(&self, blog_id: &BlogId, visit_id: &VisitorId) -> LikesResult<()> {
        let removed = self.repo.delete(blog_id, visit_id).await?;
        tracing::info!(blog_id = %blog_id, visit_id = %visit_id, removed, "Blog like deleted");
        Ok(())
    }
}
