//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations, free of domain vocabulary:
//! - Cookie rendering (`Set-Cookie`) and parsing (`Cookie`)
//! - base64url helpers
//! - Password hashing (Argon2id)

pub mod cookie;
pub mod crypto;
pub mod password;
