//! Signing Key
//!
//! Process-wide HMAC secret, loaded once at startup and never rotated.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::ConfigError;

/// Environment variable holding the secret
pub const SIGNING_KEY_ENV: &str = "JWT_SECRET_KEY";

/// HMAC-SHA256 secret shared by both session kinds.
///
/// Erased from memory on drop; `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Rejects an empty secret
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(Self(secret))
    }

    /// Read [`SIGNING_KEY_ENV`]; absent and empty are both fatal
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var(SIGNING_KEY_ENV).map_err(|_| ConfigError::MissingSecret)?;
        Self::new(secret)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"[REDACTED]").finish()
    }
}
