//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, BlogLikeId, VisitorId};

/// A visitor's like of a blog; at most one per (blog, visitor)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogLike {
    pub id: BlogLikeId,
    pub blog_id: BlogId,
    pub visit_id: VisitorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
