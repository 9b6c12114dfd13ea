//! Blog Likes Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Blog like entity, repository trait
//! - `application/` - Like service
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Likes belong to an anonymous visitor, identified by the Visitor Session
//! cookie. Every endpoint requires that session; none of them creates it.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{LikesError, LikesResult};
pub use infra::postgres::PgBlogLikeRepository;
pub use presentation::router::{likes_router, likes_router_generic};
