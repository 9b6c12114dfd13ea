//! Blogs Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use thiserror::Error;

/// Blogs-specific result type alias
pub type BlogsResult<T> = Result<T, BlogsError>;

#[derive(Debug, Error)]
pub enum BlogsError {
    /// A required field is blank or unparsable; the message is shown to the client
    #[error("{0}")]
    Invalid(&'static str),

    /// No such blog, or not one the caller owns
    #[error("Blog not found")]
    BlogNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BlogsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogsError::Invalid(_) => ErrorKind::BadRequest,
            BlogsError::BlogNotFound => ErrorKind::NotFound,
            BlogsError::Database(e) => classify_sqlx(e),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            BlogsError::Invalid(message) => AppError::bad_request(message),
            BlogsError::BlogNotFound => AppError::not_found("Blog not found"),
            BlogsError::Database(e) => AppError::from(e),
        }
    }

    fn log(&self) {
        match self {
            BlogsError::Database(e) => {
                tracing::error!(error = %e, "Blogs database error");
            }
            BlogsError::Invalid(message) => {
                tracing::debug!(reason = message, "Rejected blog input");
            }
            BlogsError::BlogNotFound => {
                tracing::debug!("Blog not found");
            }
        }
    }
}

impl IntoResponse for BlogsError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
