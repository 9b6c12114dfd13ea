//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{BlogsAppState, CommentsAppState};
pub use router::{blogs_router, blogs_router_generic, comments_router, comments_router_generic};
