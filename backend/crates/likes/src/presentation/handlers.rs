//! HTTP Handlers
//!
//! Every handler takes [`VisitorIdentity`] first, so a missing or invalid
//! visitor cookie is answered with 401 before the path is looked at.

use axum::Json;
use axum::extract::{FromRef, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use identity::{IdentityState, VisitorIdentity};
use kernel::id::BlogId;
use std::sync::Arc;

use crate::application::LikeService;
use crate::domain::repository::BlogLikeRepository;
use crate::error::LikesResult;
use crate::presentation::dto::{BlogLikeResponse, IsLikedResponse, MessageResponse};

/// Shared state for like handlers
#[derive(Clone)]
pub struct LikesAppState<R>
where
    R: BlogLikeRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub identity: IdentityState,
}

impl<R> FromRef<LikesAppState<R>> for IdentityState
where
    R: BlogLikeRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &LikesAppState<R>) -> Self {
        state.identity.clone()
    }
}

/// GET /api/blog-likes
pub async fn list_likes<R>(
    State(state): State<LikesAppState<R>>,
    VisitorIdentity(visit_id): VisitorIdentity,
) -> LikesResult<impl IntoResponse>
where
    R: BlogLikeRepository + Clone + Send + Sync + 'static,
{
    let likes = LikeService::new(state.repo.clone()).list(&visit_id).await?;
    let body: Vec<BlogLikeResponse> = likes.into_iter().map(BlogLikeResponse::from).collect();

    // Per-visitor data
    Ok(([(header::CACHE_CONTROL, "no-store")], Json(body)))
}

/// GET /api/blog-likes/{blog_id}
pub async fn is_liked<R>(
    State(state): State<LikesAppState<R>>,
    VisitorIdentity(visit_id): VisitorIdentity,
    Path(blog_id): Path<BlogId>,
) -> LikesResult<Json<IsLikedResponse>>
where
    R: BlogLikeRepository + Clone + Send + Sync + 'static,
{
    let is_liked = LikeService::new(state.repo.clone())
        .is_liked(&blog_id, &visit_id)
        .await?;

    Ok(Json(IsLikedResponse { is_liked }))
}

/// POST /api/blog-likes/{blog_id}
pub async fn create_like<R>(
    State(state): State<LikesAppState<R>>,
    VisitorIdentity(visit_id): VisitorIdentity,
    Path(blog_id): Path<BlogId>,
) -> LikesResult<impl IntoResponse>
where
    R: BlogLikeRepository + Clone + Send + Sync + 'static,
{
    let like = LikeService::new(state.repo.clone())
        .like(&blog_id, &visit_id)
        .await?;

    Ok((StatusCode::OK, Json(BlogLikeResponse::from(like))))
}

/// DELETE /api/blog-likes/{blog_id}
pub async fn delete_like<R>(
    State(state): State<LikesAppState<R>>,
    VisitorIdentity(visit_id): VisitorIdentity,
    Path(blog_id): Path<BlogId>,
) -> LikesResult<Json<MessageResponse>>
where
    R: BlogLikeRepository + Clone + Send + Sync + 'static,
{
    LikeService::new(state.repo.clone())
        .unlike(&blog_id, &visit_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Blog like deleted successfully",
    }))
}
