//! Shared Kernel
//!
//! Vocabulary shared by every bounded context of the backend:
//! - the unified [`error::app_error::AppError`] and its [`error::kind::ErrorKind`]
//! - typed UUID identifiers for users, visitors, blogs, likes and comments
//!
//! Database and HTTP integration (`sqlx` error classification, axum
//! rendering) sit behind the `sqlx` and `axum` features.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
