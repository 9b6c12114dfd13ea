//! Blogs Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Blog and comment entities, validated drafts, repository traits
//! - `application/` - Blog and comment services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! Reading is public. Writing a blog requires an Auth Session and only
//! touches the caller's own blogs; posting a guest comment requires a
//! Visitor Session.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use error::{BlogsError, BlogsResult};
pub use infra::postgres::{PgBlogRepository, PgCommentRepository};
pub use presentation::router::{
    blogs_router, blogs_router_generic, comments_router, comments_router_generic,
};
