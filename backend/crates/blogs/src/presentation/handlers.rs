//! HTTP Handlers
//!
//! Path ids arrive as strings so a malformed one gets the same JSON error
//! body as any other invalid input. Write handlers take their session
//! extractor first, so an unauthenticated call is a 401 before the body or
//! path is read.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use identity::{AuthSession, IdentityState, VisitorIdentity};
use kernel::id::{BlogId, UserId};
use std::sync::Arc;

use crate::application::{BlogService, CommentService};
use crate::domain::draft::{BlogDraft, CommentDraft};
use crate::domain::entities::Blog;
use crate::domain::repository::{BlogRepository, CommentRepository};
use crate::error::{BlogsError, BlogsResult};
use crate::presentation::dto::{
    BlogRequest, BlogResponse, CommentRequest, CommentResponse, MessageResponse,
};

/// Shared state for blog handlers
#[derive(Clone)]
pub struct BlogsAppState<R>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub identity: IdentityState,
}

impl<R> FromRef<BlogsAppState<R>> for IdentityState
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &BlogsAppState<R>) -> Self {
        state.identity.clone()
    }
}

/// Shared state for comment handlers
#[derive(Clone)]
pub struct CommentsAppState<R>
where
    R: CommentRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub identity: IdentityState,
}

impl<R> FromRef<CommentsAppState<R>> for IdentityState
where
    R: CommentRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &CommentsAppState<R>) -> Self {
        state.identity.clone()
    }
}

fn invalid_body(rejection: JsonRejection) -> BlogsError {
    tracing::debug!(error = %rejection, "Rejected request body");
    BlogsError::Invalid("Invalid request body")
}

fn parse_blog_id(raw: &str, message: &'static str) -> BlogsResult<BlogId> {
    raw.parse().map_err(|_| BlogsError::Invalid(message))
}

fn blog_list(blogs: Vec<Blog>) -> Json<Vec<BlogResponse>> {
    Json(blogs.into_iter().map(BlogResponse::from).collect())
}

impl BlogRequest {
    fn into_draft(self) -> BlogsResult<BlogDraft> {
        BlogDraft::new(
            &self.title,
            &self.github_url,
            &self.category,
            &self.description,
            &self.tags,
        )
    }
}

// ============================================================================
// Blogs: reads
// ============================================================================

/// GET /api/blogs
pub async fn list_blogs<R>(
    State(state): State<BlogsAppState<R>>,
) -> BlogsResult<Json<Vec<BlogResponse>>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let blogs = BlogService::new(state.repo.clone()).list().await?;
    Ok(blog_list(blogs))
}

/// GET /api/blogs/{id}
pub async fn get_blog<R>(
    State(state): State<BlogsAppState<R>>,
    Path(id): Path<String>,
) -> BlogsResult<Json<BlogResponse>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let id = parse_blog_id(&id, "Invalid id")?;
    let blog = BlogService::new(state.repo.clone()).get(&id).await?;
    Ok(Json(BlogResponse::from(blog)))
}

/// GET /api/blogs/user/{user_id}
pub async fn list_blogs_by_user<R>(
    State(state): State<BlogsAppState<R>>,
    Path(user_id): Path<String>,
) -> BlogsResult<Json<Vec<BlogResponse>>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let user_id: UserId = user_id
        .parse()
        .map_err(|_| BlogsError::Invalid("Invalid userId"))?;

    let blogs = BlogService::new(state.repo.clone())
        .list_by_user(&user_id)
        .await?;
    Ok(blog_list(blogs))
}

/// GET /api/blogs/categories
pub async fn list_categories<R>(
    State(state): State<BlogsAppState<R>>,
) -> BlogsResult<Json<Vec<String>>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    Ok(Json(BlogService::new(state.repo.clone()).categories().await?))
}

/// GET /api/blogs/tags
pub async fn list_tags<R>(State(state): State<BlogsAppState<R>>) -> BlogsResult<Json<Vec<String>>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    Ok(Json(BlogService::new(state.repo.clone()).tags().await?))
}

/// GET /api/blogs/popular/{count}
pub async fn list_popular<R>(
    State(state): State<BlogsAppState<R>>,
    Path(count): Path<String>,
) -> BlogsResult<Json<Vec<BlogResponse>>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let count: i64 = count
        .parse()
        .map_err(|_| BlogsError::Invalid("Invalid count"))?;

    let blogs = BlogService::new(state.repo.clone()).popular(count).await?;
    Ok(blog_list(blogs))
}

// ============================================================================
// Blogs: writes (Auth Session)
// ============================================================================

/// POST /api/blogs
pub async fn create_blog<R>(
    State(state): State<BlogsAppState<R>>,
    AuthSession(claims): AuthSession,
    payload: Result<Json<BlogRequest>, JsonRejection>,
) -> BlogsResult<impl IntoResponse>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(invalid_body)?;
    let draft = req.into_draft()?;

    let blog = BlogService::new(state.repo.clone())
        .create(&claims.user_id, draft)
        .await?;

    Ok((StatusCode::CREATED, Json(BlogResponse::from(blog))))
}

/// PUT /api/blogs/{id}
pub async fn update_blog<R>(
    State(state): State<BlogsAppState<R>>,
    AuthSession(claims): AuthSession,
    Path(id): Path<String>,
    payload: Result<Json<BlogRequest>, JsonRejection>,
) -> BlogsResult<Json<BlogResponse>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let id = parse_blog_id(&id, "Invalid id")?;
    let Json(req) = payload.map_err(invalid_body)?;
    let draft = req.into_draft()?;

    let blog = BlogService::new(state.repo.clone())
        .update(&id, &claims.user_id, draft)
        .await?;

    Ok(Json(BlogResponse::from(blog)))
}

/// DELETE /api/blogs/{id}
pub async fn delete_blog<R>(
    State(state): State<BlogsAppState<R>>,
    AuthSession(claims): AuthSession,
    Path(id): Path<String>,
) -> BlogsResult<Json<MessageResponse>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let id = parse_blog_id(&id, "Invalid id")?;
    BlogService::new(state.repo.clone())
        .delete(&id, &claims.user_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Blog deleted successfully",
    }))
}

// ============================================================================
// Comments
// ============================================================================

/// GET /api/comments/{blog_id}
pub async fn list_comments<R>(
    State(state): State<CommentsAppState<R>>,
    Path(blog_id): Path<String>,
) -> BlogsResult<Json<Vec<CommentResponse>>>
where
    R: CommentRepository + Clone + Send + Sync + 'static,
{
    let blog_id = parse_blog_id(&blog_id, "Invalid blogId")?;
    let comments = CommentService::new(state.repo.clone()).list(&blog_id).await?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// POST /api/comments
pub async fn create_comment<R>(
    State(state): State<CommentsAppState<R>>,
    VisitorIdentity(visit_id): VisitorIdentity,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> BlogsResult<impl IntoResponse>
where
    R: CommentRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(invalid_body)?;
    let draft = CommentDraft::new(&req.blog_id, &req.guest_user, &req.comment)?;

    let comment = CommentService::new(state.repo.clone())
        .post(draft, &visit_id)
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}
