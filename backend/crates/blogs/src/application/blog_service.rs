//! Blog Service

use std::sync::Arc;

use kernel::id::{BlogId, UserId};

use crate::domain::draft::BlogDraft;
use crate::domain::entities::Blog;
use crate::domain::repository::BlogRepository;
use crate::error::{BlogsError, BlogsResult};

pub struct BlogService<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> BlogService<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> BlogsResult<Vec<Blog>> {
        self.repo.list().await
    }

    pub async fn list_by_user(&self, user_id: &UserId) -> BlogsResult<Vec<Blog>> {
        self.repo.list_by_user(user_id).await
    }

    pub async fn get(&self, id: &BlogId) -> BlogsResult<Blog> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(BlogsError::BlogNotFound)
    }

    pub async fn create(&self, author: &UserId, draft: BlogDraft) -> BlogsResult<Blog> {
        let blog = self.repo.create(author, &draft).await?;
        tracing::info!(blog_id = %blog.id, user_id = %author, "Blog created");
        Ok(blog)
    }

    /// Only the author may update; anyone else sees [`BlogsError::BlogNotFound`]
    pub async fn update(&self, id: &BlogId, author: &UserId, draft: BlogDraft) -> BlogsResult<Blog> {
        let blog = self
            .repo
            .update(id, author, &draft)
            .await?
            .ok_or(BlogsError::BlogNotFound)?;

        tracing::info!(blog_id = %id, user_id = %author, "Blog updated");
        Ok(blog)
    }

    pub async fn delete(&self, id: &BlogId, author: &UserId) -> BlogsResult<()> {
        if !self.repo.delete(id, author).await? {
            return Err(BlogsError::BlogNotFound);
        }

        tracing::info!(blog_id = %id, user_id = %author, "Blog deleted");
        Ok(())
    }

    pub async fn categories(&self) -> BlogsResult<Vec<String>> {
        self.repo.categories().await
    }

    pub async fn tags(&self) -> BlogsResult<Vec<String>> {
        self.repo.tags().await
    }

    /// `count` must be positive
    pub async fn popular(&self, count: i64) -> BlogsResult<Vec<Blog>> {
        if count <= 0 {
            return Err(BlogsError::Invalid("Invalid count"));
        }
        self.repo.popular(count).await
    }
}
