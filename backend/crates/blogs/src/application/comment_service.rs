//! Comment Service
//!
//! Guest comments: the author is a free-text name, not an account.

use std::sync::Arc;

use kernel::id::{BlogId, VisitorId};

use crate::domain::draft::CommentDraft;
use crate::domain::entities::Comment;
use crate::domain::repository::CommentRepository;
use crate::error::BlogsResult;

pub struct CommentService<R>
where
    R: CommentRepository,
{
    repo: Arc<R>,
}

impl<R> CommentService<R>
where
    R: CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, blog_id: &BlogId) -> BlogsResult<Vec<Comment>> {
        self.repo.list_by_blog(blog_id).await
    }

    pub async fn post(&self, draft: CommentDraft, visit_id: &VisitorId) -> BlogsResult<Comment> {
        let comment = self.repo.create(&draft).await?;
        tracing::info!(
            comment_id = %comment.id,
            blog_id = %comment.blog_id,
            visit_id = %visit_id,
            "Comment posted"
        );
        Ok(comment)
    }
}
