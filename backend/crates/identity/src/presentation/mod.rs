//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the request authentication filter.

pub mod dto;
pub mod filter;
pub mod handlers;
pub mod router;

pub use filter::{
    AuthSession, IdentityState, VisitorIdentity, require_auth_session, resolve_auth_claims,
    resolve_auth_identity, resolve_visitor_identity,
};
pub use handlers::IdentityAppState;
pub use router::{users_router, users_router_generic, visitors_router};
