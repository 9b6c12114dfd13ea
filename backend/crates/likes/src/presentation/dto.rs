//! API DTOs

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, BlogLikeId, VisitorId};
use serde::Serialize;

use crate::domain::entities::BlogLike;

#[derive(Debug, Clone, Serialize)]
pub struct BlogLikeResponse {
    pub id: BlogLikeId,
    pub blog_id: BlogId,
    pub visit_id: VisitorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BlogLike> for BlogLikeResponse {
    fn from(like: BlogLike) -> Self {
        Self {
            id: like.id,
            blog_id: like.blog_id,
            visit_id: like.visit_id,
            created_at: like.created_at,
            updated_at: like.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsLikedResponse {
    pub is_liked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
