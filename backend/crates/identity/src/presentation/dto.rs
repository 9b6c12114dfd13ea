//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::claims::AuthClaims;
use crate::domain::entity::user::UserProfile;

/// `{"message": ...}` body of the session endpoints
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

// ============================================================================
// Login
// ============================================================================

/// Login request; missing fields read as empty and fail validation
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Auth Check
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AuthCheckResponse {
    pub message: &'static str,
    pub user_id: UserId,
    pub username: String,
    pub email: String,
}

impl From<AuthClaims> for AuthCheckResponse {
    fn from(claims: AuthClaims) -> Self {
        Self {
            message: "Authenticated",
            user_id: claims.user_id,
            username: claims.username,
            email: claims.email,
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Profile update request
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Current password
    #[serde(default)]
    pub password: String,
    pub new_password: Option<String>,
}

/// Public profile
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email.to_string(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}
