//! Likes Router

use axum::{Router, routing::get};
use identity::IdentityState;
use std::sync::Arc;

use crate::domain::repository::BlogLikeRepository;
use crate::infra::postgres::PgBlogLikeRepository;
use crate::presentation::handlers::{self, LikesAppState};

/// Create the likes router with PostgreSQL repository
pub fn likes_router(repo: PgBlogLikeRepository, identity: IdentityState) -> Router {
    likes_router_generic(repo, identity)
}

/// Create a generic likes router for any repository implementation
pub fn likes_router_generic<R>(repo: R, identity: IdentityState) -> Router
where
    R: BlogLikeRepository + Clone + Send + Sync + 'static,
{
    let state = LikesAppState {
        repo: Arc::new(repo),
        identity,
    };

    Router::new()
        .route("/", get(handlers::list_likes::<R>))
        .route(
            "/{blog_id}",
            get(handlers::is_liked::<R>)
                .post(handlers::create_like::<R>)
                .delete(handlers::delete_like::<R>),
        )
        .with_state(state)
}
