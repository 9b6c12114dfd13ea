//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::StoredPassword;

use crate::domain::value_object::email::Email;

/// Public profile of a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile together with the stored password hash.
///
/// Only handed out for credential checks; never serialized.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub profile: UserProfile,
    pub password_hash: StoredPassword,
}

/// Changes applied by a profile update
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: Email,
    /// `None` keeps the current password
    pub password_hash: Option<StoredPassword>,
}
