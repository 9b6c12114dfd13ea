//! Sign In Use Case
//!
//! Checks email + password and issues an Auth Session.

use std::sync::Arc;

use platform::cookie::SessionCookie;
use platform::password::Password;

use crate::application::session_manager::SessionManager;
use crate::domain::entity::user::UserProfile;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{IdentityError, IdentityResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub profile: UserProfile,
    /// `token` cookie to send back
    pub cookie: SessionCookie,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    sessions: Arc<dyn SessionManager>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, sessions: Arc<dyn SessionManager>) -> Self {
        Self {
            user_repo,
            sessions,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> IdentityResult<SignInOutput> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(IdentityError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }

        let email = Email::new(&input.email)?;

        let password = Password::presented(&input.password);

        // Unknown email and wrong password look the same, in body and in timing
        let Some(credentials) = self.user_repo.find_credentials_by_email(&email).await? else {
            password.verify_against_decoy();
            return Err(IdentityError::UserNotFound);
        };
        if !credentials.password_hash.matches(&password) {
            return Err(IdentityError::UserNotFound);
        }

        let profile = credentials.profile;
        let cookie = self.sessions.issue_auth_session(
            profile.id,
            profile.email.as_str(),
            &profile.name,
        )?;

        tracing::info!(user_id = %profile.id, "User signed in");

        Ok(SignInOutput { profile, cookie })
    }
}
