//! Conversions into [`AppError`] and its HTTP rendering.

use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

/// Kind a database failure surfaces as: 503 when the pool or connection is
/// gone, 500 otherwise.
#[cfg(feature = "sqlx")]
pub fn classify_sqlx(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorKind::Unavailable
        }
        _ => ErrorKind::Internal,
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::new(classify_sqlx(&err), "Database error").with_source(err)
    }
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::bad_request("Invalid request body").with_source(rejection)
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::json!({ "error": self.client_message() });

        (status, Json(body)).into_response()
    }
}
