//! Blogs and Comments Routers

use axum::{
    Router,
    routing::{get, post},
};
use identity::IdentityState;
use std::sync::Arc;

use crate::domain::repository::{BlogRepository, CommentRepository};
use crate::infra::postgres::{PgBlogRepository, PgCommentRepository};
use crate::presentation::handlers::{self, BlogsAppState, CommentsAppState};

/// Create the blogs router with PostgreSQL repository
pub fn blogs_router(repo: PgBlogRepository, identity: IdentityState) -> Router {
    blogs_router_generic(repo, identity)
}

/// Create a generic blogs router for any repository implementation
pub fn blogs_router_generic<R>(repo: R, identity: IdentityState) -> Router
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let state = BlogsAppState {
        repo: Arc::new(repo),
        identity,
    };

    // static segments win over `{id}`
    Router::new()
        .route(
            "/",
            get(handlers::list_blogs::<R>).post(handlers::create_blog::<R>),
        )
        .route("/categories", get(handlers::list_categories::<R>))
        .route("/tags", get(handlers::list_tags::<R>))
        .route("/popular/{count}", get(handlers::list_popular::<R>))
        .route("/user/{user_id}", get(handlers::list_blogs_by_user::<R>))
        .route(
            "/{id}",
            get(handlers::get_blog::<R>)
                .put(handlers::update_blog::<R>)
                .delete(handlers::delete_blog::<R>),
        )
        .with_state(state)
}

/// Create the comments router with PostgreSQL repository
pub fn comments_router(repo: PgCommentRepository, identity: IdentityState) -> Router {
    comments_router_generic(repo, identity)
}

/// Create a generic comments router for any repository implementation
pub fn comments_router_generic<R>(repo: R, identity: IdentityState) -> Router
where
    R: CommentRepository + Clone + Send + Sync + 'static,
{
    let state = CommentsAppState {
        repo: Arc::new(repo),
        identity,
    };

    Router::new()
        .route("/", post(handlers::create_comment::<R>))
        .route("/{blog_id}", get(handlers::list_comments::<R>))
        .with_state(state)
}
