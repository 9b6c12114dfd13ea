//! Application Layer

pub mod blog_service;
pub mod comment_service;

pub use blog_service::BlogService;
pub use comment_service::CommentService;
