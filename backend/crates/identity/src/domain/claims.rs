//! Token Claims
//!
//! Payloads of the two session kinds. Field names are the JSON keys on the wire.

use chrono::{DateTime, Utc};
use kernel::id::{UserId, VisitorId};
use serde::{Deserialize, Serialize};

/// Claims carrying an expiry in Unix seconds
pub trait ExpiringClaims {
    fn exp(&self) -> i64;

    /// Exact comparison: a token whose `exp` is T is expired from T+1ns on.
    /// An `exp` outside chrono's range counts as expired.
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        DateTime::from_timestamp(self.exp(), 0).is_none_or(|expires_at| expires_at < now)
    }
}

/// Payload of the Auth Session token (cookie `token`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    pub user_id: UserId,
    pub email: String,
    pub username: String,
    pub exp: i64,
}

impl AuthClaims {
    pub fn new(
        user_id: UserId,
        email: impl Into<String>,
        username: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            email: email.into(),
            username: username.into(),
            exp: expires_at.timestamp(),
        }
    }
}

impl ExpiringClaims for AuthClaims {
    fn exp(&self) -> i64 {
        self.exp
    }
}

/// Payload of the Visitor Session token (cookie `visit-id-token`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorClaims {
    pub visit_id: VisitorId,
    pub exp: i64,
}

impl VisitorClaims {
    pub fn new(visit_id: VisitorId, expires_at: DateTime<Utc>) -> Self {
        Self {
            visit_id,
            exp: expires_at.timestamp(),
        }
    }
}

impl ExpiringClaims for VisitorClaims {
    fn exp(&self) -> i64 {
        self.exp
    }
}
