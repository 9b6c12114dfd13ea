//! Identity Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Signing key, claims, user entity, repository traits
//! - `application/` - Token codec, session manager, use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, authentication filter
//!
//! ## Sessions
//! Two stateless cookie sessions share one HS256 signing key:
//! - Auth Session (`token`): a logged-in user, issued at login, rotated on
//!   profile update, revoked at logout
//! - Visitor Session (`visit-id-token`): an anonymous browser, used to scope likes
//!
//! Both last one hour. Cookies are `HttpOnly`; production adds
//! `Secure; SameSite=None`, other deployments use `SameSite=Lax`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{DeploymentMode, IdentityConfig};
pub use application::session_manager::{CookieSessionManager, SessionManager};
pub use application::token_codec::{HmacTokenCodec, TokenCodec};
pub use domain::signing_key::SigningKey;
pub use error::{AuthFailure, ConfigError, IdentityError, IdentityResult, TokenError};
pub use infra::postgres::PgUserRepository;
pub use presentation::filter::{AuthSession, IdentityState, VisitorIdentity};
pub use presentation::router::{users_router, visitors_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
