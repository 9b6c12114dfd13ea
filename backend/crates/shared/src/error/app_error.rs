//! [`AppError`], the error every handler finally renders.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Classified error with a client message and an optional cause.
///
/// The cause is only ever logged. For server errors the message is replaced
/// by [`ErrorKind::masked_message`] before it leaves the process.
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::AppError;
///
/// let err = AppError::internal("users table missing");
/// assert_eq!(err.status_code(), 500);
/// assert_eq!(err.client_message(), "Internal server error");
/// ```
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Message as constructed, including server-side detail
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message safe to put in a response body
    pub fn client_message(&self) -> &str {
        self.kind.masked_message().unwrap_or(&self.message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_message_passes_through() {
        let err = AppError::bad_request("Email and password are required");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.client_message(), "Email and password are required");
    }

    #[test]
    fn test_server_error_message_is_masked() {
        let cause = std::io::Error::other("connection reset");
        let err = AppError::internal("failed to load profile").with_source(cause);

        assert_eq!(err.message(), "failed to load profile");
        assert_eq!(err.client_message(), "Internal server error");
        assert_eq!(err.to_string(), "internal: failed to load profile");
        assert!(err.source().is_some());
    }
}
