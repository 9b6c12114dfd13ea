//! Identity Routers

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::filter::{IdentityState, require_auth_session};
use crate::presentation::handlers::{self, IdentityAppState};

/// Create the users router with PostgreSQL repository
pub fn users_router(repo: PgUserRepository, identity: IdentityState) -> Router {
    users_router_generic(repo, identity)
}

/// Create a generic users router for any repository implementation
pub fn users_router_generic<R>(repo: R, identity: IdentityState) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = IdentityAppState {
        repo: Arc::new(repo),
        identity: identity.clone(),
    };

    Router::new()
        .route("/detail", get(handlers::user_detail::<R>))
        .route("/update", put(handlers::update_user::<R>))
        .route_layer(middleware::from_fn_with_state(
            identity,
            require_auth_session,
        ))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout))
        .route("/auth-check", get(handlers::auth_check))
        .with_state(state)
}

/// Create the visitor router
pub fn visitors_router(identity: IdentityState) -> Router {
    Router::new()
        .route("/", post(handlers::generate_visitor))
        .with_state(identity)
}
