//! Domain Layer

pub mod draft;
pub mod entities;
pub mod repository;

pub use draft::{BlogDraft, CommentDraft};
pub use entities::{Blog, Comment};
pub use repository::{BlogRepository, CommentRepository};
