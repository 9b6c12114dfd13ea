//! Account passwords
//!
//! [`Password`] holds clear text (NFKC-normalized, wiped on drop);
//! [`StoredPassword`] is the Argon2id PHC string kept in `users.password`.

use std::fmt;
use std::sync::LazyLock;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bounds applied when a user picks a new password, counted in code points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl PasswordPolicy {
    pub const DEFAULT: Self = Self {
        min_chars: 8,
        max_chars: 128,
    };

    fn check(&self, normalized: &str) -> Result<(), PasswordPolicyError> {
        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }
        let chars = normalized.chars().count();
        if chars < self.min_chars || chars > self.max_chars {
            return Err(PasswordPolicyError::Length {
                min: self.min_chars,
                max: self.max_chars,
                actual: chars,
            });
        }
        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t')
        {
            return Err(PasswordPolicyError::ControlCharacter);
        }
        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A new password the policy refused. The message is shown to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be between {min} and {max} characters")]
    Length { min: usize, max: usize, actual: usize },

    #[error("Password cannot be blank")]
    Blank,

    #[error("Password cannot contain control characters")]
    ControlCharacter,
}

#[derive(Debug, Error)]
pub enum PasswordStoreError {
    #[error("Argon2 hashing failed: {0}")]
    Hashing(String),

    /// The stored value is not a PHC string
    #[error("Stored password is not a PHC hash")]
    UnreadableHash,
}

/// Clear text password. Not `Clone`, `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    /// A password being set, checked against `policy`.
    pub fn choose(raw: &str, policy: &PasswordPolicy) -> Result<Self, PasswordPolicyError> {
        let password = Self::presented(raw);
        policy.check(&password.0)?;
        Ok(password)
    }

    /// A password typed at login or to confirm a change; normalized only.
    pub fn presented(raw: &str) -> Self {
        Self(raw.nfkc().collect())
    }

    /// Argon2id with default parameters and a fresh salt
    pub fn hash(&self) -> Result<StoredPassword, PasswordStoreError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(self.0.as_bytes(), &salt)
            .map_err(|e| PasswordStoreError::Hashing(e.to_string()))?;
        Ok(StoredPassword(phc.to_string()))
    }

    /// Runs one Argon2 verification against a hash whose password nobody
    /// knows, for lookups that found no stored hash. A miss then costs the
    /// same as a wrong password.
    pub fn verify_against_decoy(&self) {
        if let Some(decoy) = DECOY.as_ref() {
            let _ = decoy.matches(self);
        }
    }
}

static DECOY: LazyLock<Option<StoredPassword>> = LazyLock::new(|| {
    let mut seed = [0u8; 32];
    OsRng.fill_bytes(&mut seed);
    let secret: String = seed.iter().map(|b| format!("{b:02x}")).collect();
    Password::presented(&secret).hash().ok()
});

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct StoredPassword(String);

impl StoredPassword {
    /// Accepts a value read back from the database
    pub fn parse(phc: impl Into<String>) -> Result<Self, PasswordStoreError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|_| PasswordStoreError::UnreadableHash)?;
        Ok(Self(phc))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, password: &Password) -> bool {
        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.0.as_bytes(), &parsed)
                .is_ok()
        })
    }
}

impl fmt::Debug for StoredPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StoredPassword(***)")
    }
}
