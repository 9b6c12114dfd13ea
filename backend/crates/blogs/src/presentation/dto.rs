//! API DTOs

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, CommentId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Blog, Comment};

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ============================================================================
// Blogs
// ============================================================================

/// Create and update body; missing fields read as empty and fail validation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogResponse {
    pub id: BlogId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub github_url: String,
    pub category: String,
    pub tags: String,
    pub likes: i64,
    pub comment_cnt: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            user_id: blog.user_id,
            title: blog.title,
            description: blog.description,
            github_url: blog.github_url,
            category: blog.category,
            tags: blog.tags,
            likes: blog.likes,
            comment_cnt: blog.comment_cnt,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[serde(default)]
    pub blog_id: String,
    #[serde(default)]
    pub guest_user: String,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub blog_id: BlogId,
    pub guest_user: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            blog_id: comment.blog_id,
            guest_user: comment.guest_user,
            comment: comment.comment,
            created_at: comment.created_at,
        }
    }
}
