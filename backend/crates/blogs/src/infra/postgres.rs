//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, CommentId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::draft::{BlogDraft, CommentDraft};
use crate::domain::entities::{Blog, Comment};
use crate::domain::repository::{BlogRepository, CommentRepository};
use crate::error::{BlogsError, BlogsResult};

/// Blog columns plus live like and comment counts; callers append the
/// filter and ordering
const BLOG_SELECT: &str = r#"
    SELECT b.id, b.user_id, b.title, b.description, b.github_url, b.category, b.tags,
           (SELECT COUNT(*) FROM blogs_likes l WHERE l.blog_id = b.id) AS likes,
           (SELECT COUNT(*) FROM comments c WHERE c.blog_id = b.id) AS comment_cnt,
           b.created_at, b.updated_at
    FROM blogs b
"#;

/// PostgreSQL-backed blog repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn distinct(&self, sql: &str) -> BlogsResult<Vec<String>> {
        let values: Vec<String> = sqlx::query_scalar(sql).fetch_all(&self.pool).await?;
        Ok(values)
    }
}

impl BlogRepository for PgBlogRepository {
    async fn list(&self) -> BlogsResult<Vec<Blog>> {
        let rows = sqlx::query_as::<_, BlogRow>(&format!(
            "{BLOG_SELECT} ORDER BY b.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BlogRow::into_entity).collect())
    }

    async fn list_by_user(&self, user_id: &UserId) -> BlogsResult<Vec<Blog>> {
        let rows = sqlx::query_as::<_, BlogRow>(&format!(
            "{BLOG_SELECT} WHERE b.user_id = $1 ORDER BY b.created_at DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BlogRow::into_entity).collect())
    }

    async fn find_by_id(&self, id: &BlogId) -> BlogsResult<Option<Blog>> {
        let row = sqlx::query_as::<_, BlogRow>(&format!("{BLOG_SELECT} WHERE b.id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(BlogRow::into_entity))
    }

    async fn create(&self, user_id: &UserId, draft: &BlogDraft) -> BlogsResult<Blog> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            INSERT INTO blogs (user_id, title, github_url, category, description, tags)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, title, description, github_url, category, tags,
                      0::BIGINT AS likes, 0::BIGINT AS comment_cnt,
                      created_at, updated_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(&draft.title)
        .bind(&draft.github_url)
        .bind(&draft.category)
        .bind(&draft.description)
        .bind(&draft.tags)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_entity())
    }

    async fn update(
        &self,
        id: &BlogId,
        user_id: &UserId,
        draft: &BlogDraft,
    ) -> BlogsResult<Option<Blog>> {
        // the outer SELECT cannot see the CTE's write, so it reads RETURNING
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            WITH ub AS (
                UPDATE blogs
                SET title = $3, github_url = $4, category = $5, description = $6, tags = $7,
                    updated_at = NOW()
                WHERE id = $1 AND user_id = $2
                RETURNING id, user_id, title, description, github_url, category, tags,
                          created_at, updated_at
            )
            SELECT ub.id, ub.user_id, ub.title, ub.description, ub.github_url, ub.category, ub.tags,
                   (SELECT COUNT(*) FROM blogs_likes l WHERE l.blog_id = ub.id) AS likes,
                   (SELECT COUNT(*) FROM comments c WHERE c.blog_id = ub.id) AS comment_cnt,
                   ub.created_at, ub.updated_at
            FROM ub
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(&draft.title)
        .bind(&draft.github_url)
        .bind(&draft.category)
        .bind(&draft.description)
        .bind(&draft.tags)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BlogRow::into_entity))
    }

    async fn delete(&self, id: &BlogId, user_id: &UserId) -> BlogsResult<bool> {
        let deleted = sqlx::query("DELETE FROM blogs WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn categories(&self) -> BlogsResult<Vec<String>> {
        self.distinct("SELECT DISTINCT category FROM blogs ORDER BY category")
            .await
    }

    async fn tags(&self) -> BlogsResult<Vec<String>> {
        self.distinct("SELECT DISTINCT tags FROM blogs ORDER BY tags").await
    }

    async fn popular(&self, limit: i64) -> BlogsResult<Vec<Blog>> {
        let rows = sqlx::query_as::<_, BlogRow>(&format!(
            "{BLOG_SELECT} ORDER BY likes DESC, b.created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BlogRow::into_entity).collect())
    }
}

/// PostgreSQL-backed comment repository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CommentRepository for PgCommentRepository {
    async fn list_by_blog(&self, blog_id: &BlogId) -> BlogsResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, blog_id, guest_user, comment, created_at
            FROM comments
            WHERE blog_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(blog_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_entity).collect())
    }

    async fn create(&self, draft: &CommentDraft) -> BlogsResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (blog_id, guest_user, comment)
            VALUES ($1, $2, $3)
            RETURNING id, blog_id, guest_user, comment, created_at
            "#,
        )
        .bind(draft.blog_id.as_uuid())
        .bind(&draft.guest_user)
        .bind(&draft.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|db| db.is_foreign_key_violation()) {
                BlogsError::BlogNotFound
            } else {
                BlogsError::Database(e)
            }
        })?;

        Ok(row.into_entity())
    }
}

#[derive(sqlx::FromRow)]
struct BlogRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: String,
    github_url: String,
    category: String,
    tags: String,
    likes: i64,
    comment_cnt: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BlogRow {
    fn into_entity(self) -> Blog {
        Blog {
            id: BlogId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            title: self.title,
            description: self.description,
            github_url: self.github_url,
            category: self.category,
            tags: self.tags,
            likes: self.likes,
            comment_cnt: self.comment_cnt,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    blog_id: Uuid,
    guest_user: String,
    comment: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_entity(self) -> Comment {
        Comment {
            id: CommentId::from_uuid(self.id),
            blog_id: BlogId::from_uuid(self.blog_id),
            guest_user: self.guest_user,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}
