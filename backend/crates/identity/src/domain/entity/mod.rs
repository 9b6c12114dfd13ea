//! Entities

pub mod user;

pub use user::{ProfileUpdate, UserCredentials, UserProfile};
