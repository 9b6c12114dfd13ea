//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user::{ProfileUpdate, UserCredentials, UserProfile};
use crate::domain::value_object::email::Email;
use crate::error::IdentityResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find a user and its password hash by login email
    async fn find_credentials_by_email(&self, email: &Email)
    -> IdentityResult<Option<UserCredentials>>;

    /// Find user credentials by ID
    async fn find_credentials_by_id(&self, user_id: &UserId)
    -> IdentityResult<Option<UserCredentials>>;

    /// Find user profile by ID
    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<UserProfile>>;

    /// Apply a profile update, returning the stored profile (`None` if the user is gone)
    async fn update(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> IdentityResult<Option<UserProfile>>;
}
