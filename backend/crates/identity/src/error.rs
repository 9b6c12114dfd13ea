//! Identity Error Types
//!
//! Codec, filter and endpoint errors. Endpoint errors integrate with the
//! unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use platform::password::{PasswordPolicyError, PasswordStoreError};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Startup configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `JWT_SECRET_KEY` absent or empty
    #[error("JWT_SECRET_KEY is not set")]
    MissingSecret,
}

/// Token codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not a three-segment token, undecodable header or payload, or unsupported `alg`
    #[error("Malformed token")]
    Malformed,

    /// Signature does not match the signing key
    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    /// Claims could not be serialized
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// Why a request carries no usable session.
///
/// Clients always see the same 401; the cause only reaches the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("Session cookie missing")]
    NoCookie,

    #[error("Session token rejected: {0}")]
    InvalidOrExpired(#[from] TokenError),
}

impl AuthFailure {
    /// Body shared by every unauthenticated response
    pub const CLIENT_MESSAGE: &'static str = "Unauthenticated";

    fn log(&self) {
        match self {
            AuthFailure::NoCookie => {
                tracing::debug!("Request without session cookie");
            }
            AuthFailure::InvalidOrExpired(TokenError::Expired) => {
                tracing::debug!("Expired session token");
            }
            AuthFailure::InvalidOrExpired(e) => {
                tracing::warn!(error = %e, "Rejected session token");
            }
        }
    }
}

impl IntoResponse for AuthFailure {
    fn into_response(self) -> Response {
        self.log();
        AppError::unauthorized(Self::CLIENT_MESSAGE).into_response()
    }
}

/// Endpoint error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Missing or invalid input; the message is shown to the client
    #[error("{0}")]
    BadRequest(String),

    /// Unknown email, or wrong password at login
    #[error("User not found")]
    UserNotFound,

    /// Wrong current password on profile update
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Profile update to an email another account holds
    #[error("Email is already in use")]
    EmailTaken,

    #[error("Unauthenticated")]
    Unauthenticated(#[from] AuthFailure),

    #[error("{0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Password hash error: {0}")]
    PasswordHash(#[from] PasswordStoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::BadRequest(_) | IdentityError::PasswordPolicy(_) => {
                ErrorKind::BadRequest
            }
            IdentityError::UserNotFound => ErrorKind::NotFound,
            IdentityError::EmailTaken => ErrorKind::Conflict,
            IdentityError::InvalidCredentials | IdentityError::Unauthenticated(_) => {
                ErrorKind::Unauthorized
            }
            IdentityError::Database(e) => classify_sqlx(e),
            IdentityError::Token(_) | IdentityError::PasswordHash(_) | IdentityError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Kernel error carrying the full detail; masking happens on render.
    pub fn into_app_error(self) -> AppError {
        match self {
            IdentityError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()).with_source(other),
        }
    }

    fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::Token(e) => {
                tracing::error!(error = %e, "Failed to sign session token");
            }
            IdentityError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hash error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::UserNotFound | IdentityError::InvalidCredentials => {
                tracing::warn!(error = %self, "Rejected credentials");
            }
            _ => {
                tracing::debug!(error = %self, "Identity request rejected");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        match self {
            // Uniform body regardless of cause
            IdentityError::Unauthenticated(failure) => failure.into_response(),
            other => {
                other.log();
                other.into_app_error().into_response()
            }
        }
    }
}

impl From<AppError> for IdentityError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => IdentityError::BadRequest(err.message().to_string()),
            _ => IdentityError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            IdentityError::BadRequest("Invalid email format".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(IdentityError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(IdentityError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            IdentityError::Unauthenticated(AuthFailure::NoCookie).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            IdentityError::Token(TokenError::Encoding("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = IdentityError::Internal("connection string leaked".into());
        let app_err = err.into_app_error();
        assert_eq!(app_err.client_message(), "Internal server error");
    }

    #[test]
    fn test_exhausted_pool_is_unavailable() {
        let err = IdentityError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.into_app_error().client_message(), "Service unavailable");
    }

    #[test]
    fn test_bad_request_from_app_error_keeps_message() {
        let err = IdentityError::from(AppError::bad_request("Invalid email format"));
        assert_eq!(err.to_string(), "Invalid email format");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_auth_failure_wraps_token_error() {
        let failure: AuthFailure = TokenError::Expired.into();
        assert_eq!(failure, AuthFailure::InvalidOrExpired(TokenError::Expired));
    }
}
