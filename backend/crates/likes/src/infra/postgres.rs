//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, BlogLikeId, VisitorId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::BlogLike;
use crate::domain::repository::BlogLikeRepository;
use crate::error::{LikesError, LikesResult};

/// PostgreSQL-backed blog like repository
#[derive(Clone)]
pub struct PgBlogLikeRepository {
    pool: PgPool,
}

impl PgBlogLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BlogLikeRepository for PgBlogLikeRepository {
    async fn list_by_visitor(&self, visit_id: &VisitorId) -> LikesResult<Vec<BlogLike>> {
        let rows = sqlx::query_as::<_, BlogLikeRow>(
            r#"
            SELECT id, blog_id, visit_id, created_at, updated_at
            FROM blogs_likes
            WHERE visit_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(visit_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BlogLikeRow::into_entity).collect())
    }

    async fn exists(&self, blog_id: &BlogId, visit_id: &VisitorId) -> LikesResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM blogs_likes WHERE blog_id = $1 AND visit_id = $2
            )
            "#,
        )
        .bind(blog_id.as_uuid())
        .bind(visit_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, blog_id: &BlogId, visit_id: &VisitorId) -> LikesResult<BlogLike> {
        let row = sqlx::query_as::<_, BlogLikeRow>(
            r#"
            INSERT INTO blogs_likes (blog_id, visit_id)
            VALUES ($1, $2)
            RETURNING id, blog_id, visit_id, created_at, updated_at
            "#,
        )
        .bind(blog_id.as_uuid())
        .bind(visit_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // lost a race against a concurrent like
            if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                LikesError::AlreadyLiked
            } else {
                LikesError::Database(e)
            }
        })?;

        Ok(row.into_entity())
    }

    async fn delete(&self, blog_id: &BlogId, visit_id: &VisitorId) -> LikesResult<bool> {
        let deleted = sqlx::query("DELETE FROM blogs_likes WHERE blog_id = $1 AND visit_id = $2")
            .bind(blog_id.as_uuid())
            .bind(visit_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

#[derive(sqlx::FromRow)]
struct BlogLikeRow {
    id: Uuid,
    blog_id: Uuid,
    visit_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BlogLikeRow {
    fn into_entity(self) -> BlogLike {
        BlogLike {
            id: BlogLikeId::from_uuid(self.id),
            blog_id: BlogId::from_uuid(self.blog_id),
            visit_id: VisitorId::from_uuid(self.visit_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
