//! Domain Layer
//!
//! Signing key, token claims, user entities and repository traits.

pub mod claims;
pub mod entity;
pub mod repository;
pub mod signing_key;
pub mod value_object;

// Re-exports
pub use claims::{AuthClaims, ExpiringClaims, VisitorClaims};
pub use entity::user::{ProfileUpdate, UserCredentials, UserProfile};
pub use repository::UserRepository;
pub use signing_key::SigningKey;
