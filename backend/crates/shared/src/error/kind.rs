//! Error classification
//!
//! Every error surfaced over HTTP falls in one [`ErrorKind`], which fixes
//! its status code and whether its message may reach the client.

use serde::Serialize;

/// Error classification shared by the identity, likes and blogs crates.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
/// assert!(ErrorKind::Unavailable.is_server_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Missing field, bad email, weak password, undecodable body
    BadRequest,
    /// No usable session cookie, or a wrong current password
    Unauthorized,
    /// Unknown user or blog; also a blog the caller does not own
    NotFound,
    /// The visitor already likes the blog, or the email is taken
    Conflict,
    Internal,
    /// The database pool is exhausted or closed
    Unavailable,
}

impl ErrorKind {
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Internal => 500,
            ErrorKind::Unavailable => 503,
        }
    }

    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Fixed body text for server errors; client errors carry their own message.
    #[inline]
    pub const fn masked_message(&self) -> Option<&'static str> {
        match self {
            ErrorKind::Internal => Some("Internal server error"),
            ErrorKind::Unavailable => Some("Service unavailable"),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ErrorKind::BadRequest => "bad request",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::NotFound => "not found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal",
            ErrorKind::Unavailable => "unavailable",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::BadRequest.status_code(), 400);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::Conflict.status_code(), 409);
        assert_eq!(ErrorKind::Unavailable.status_code(), 503);
    }

    #[test]
    fn test_only_server_errors_are_masked() {
        assert_eq!(ErrorKind::Conflict.masked_message(), None);
        assert_eq!(ErrorKind::Unauthorized.masked_message(), None);
        assert_eq!(
            ErrorKind::Internal.masked_message(),
            Some("Internal server error")
        );
        assert!(ErrorKind::Unavailable.masked_message().is_some());
    }
}
