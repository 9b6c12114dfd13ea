//! Likes Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use thiserror::Error;

/// Likes-specific result type alias
pub type LikesResult<T> = Result<T, LikesError>;

#[derive(Debug, Error)]
pub enum LikesError {
    /// The visitor already likes this blog
    #[error("Blog is already liked")]
    AlreadyLiked,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LikesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LikesError::AlreadyLiked => ErrorKind::Conflict,
            LikesError::Database(e) => classify_sqlx(e),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            LikesError::AlreadyLiked => AppError::conflict("Blog is already liked"),
            LikesError::Database(e) => AppError::from(e),
        }
    }

    fn log(&self) {
        match self {
            LikesError::Database(e) => {
                tracing::error!(error = %e, "Likes database error");
            }
            LikesError::AlreadyLiked => {
                tracing::debug!("Duplicate like rejected");
            }
        }
    }
}

impl IntoResponse for LikesError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
