//! Update Profile Use Case
//!
//! Changes name, email and optionally the password of the signed-in user,
//! then rotates the Auth Session so the token carries the new claims.

use std::sync::Arc;

use kernel::id::UserId;
use platform::cookie::SessionCookie;
use platform::password::{Password, PasswordPolicy};

use crate::application::session_manager::SessionManager;
use crate::domain::entity::user::{ProfileUpdate, UserProfile};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{IdentityError, IdentityResult};

/// Update profile input
pub struct UpdateProfileInput {
    pub name: String,
    pub email: String,
    /// Current password, always required
    pub password: String,
    pub new_password: Option<String>,
}

/// Update profile output
pub struct UpdateProfileOutput {
    pub profile: UserProfile,
    /// Rotated `token` cookie
    pub cookie: SessionCookie,
}

/// Update profile use case
pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    sessions: Arc<dyn SessionManager>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, sessions: Arc<dyn SessionManager>) -> Self {
        Self {
            user_repo,
            sessions,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        input: UpdateProfileInput,
    ) -> IdentityResult<UpdateProfileOutput> {
        let name = input.name.trim();
        if name.is_empty() || input.email.trim().is_empty() || input.password.is_empty() {
            return Err(IdentityError::BadRequest(
                "Name, email and password are required".to_string(),
            ));
        }

        let email = Email::new(&input.email)?;

        let new_password_hash = match input.new_password.filter(|p| !p.is_empty()) {
            Some(raw) => Some(Password::choose(&raw, &PasswordPolicy::DEFAULT)?.hash()?),
            None => None,
        };

        let credentials = self
            .user_repo
            .find_credentials_by_id(&user_id)
            .await?
            .ok_or(IdentityError::UserNotFound)?;

        let current = Password::presented(&input.password);
        if !credentials.password_hash.matches(&current) {
            return Err(IdentityError::InvalidCredentials);
        }

        let update = ProfileUpdate {
            name: name.to_string(),
            email,
            password_hash: new_password_hash,
        };
        let profile = self
            .user_repo
            .update(&user_id, &update)
            .await?
            .ok_or(IdentityError::UserNotFound)?;

        let cookie = self.sessions.rotate_auth_session(
            profile.id,
            profile.email.as_str(),
            &profile.name,
        )?;

        tracing::info!(
            user_id = %profile.id,
            password_changed = update.password_hash.is_some(),
            "User profile updated"
        );

        Ok(UpdateProfileOutput { profile, cookie })
    }
}
