//! Application Layer
//!
//! Token codec, session manager and use cases.

pub mod config;
pub mod session_manager;
pub mod sign_in;
pub mod token_codec;
pub mod update_profile;

// Re-exports
pub use config::{DeploymentMode, IdentityConfig};
pub use session_manager::{
    AUTH_COOKIE_NAME, CookieSessionManager, SessionManager, VISITOR_COOKIE_NAME, VisitorSession,
};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use token_codec::{HmacTokenCodec, TokenCodec};
pub use update_profile::{UpdateProfileInput, UpdateProfileOutput, UpdateProfileUseCase};
