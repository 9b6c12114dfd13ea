//! Domain Layer

pub mod entities;
pub mod repository;

pub use entities::BlogLike;
pub use repository::BlogLikeRepository;
