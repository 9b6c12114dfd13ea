//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, CommentId, UserId};

/// A blog post with its like and comment counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    pub id: BlogId,
    /// Author
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub blog_id: BlogId,
    /// Name the guest typed; not an account
    pub guest_user: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
