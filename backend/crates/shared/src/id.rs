//! Typed UUID identifiers
//!
//! A user id and a visitor id are both UUIDs but never interchangeable;
//! the phantom marker keeps them apart at compile time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// UUID tagged with the entity it identifies.
///
/// ```
/// use kernel::id::{BlogId, VisitorId};
///
/// let visitor = VisitorId::new();
/// let blog: BlogId = "7f9c24e5-2a7d-4a1b-9a57-0c7c1d9a3b11".parse().unwrap();
/// assert_ne!(visitor.as_uuid(), blog.as_uuid());
/// ```
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Create a new random ID (UUID v4, 122 random bits)
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }
}

// Manual impls: derives would require `T: Clone` etc. on the marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self::from_uuid)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Registered user account
    pub struct User;

    /// Anonymous browser holding a visitor session
    pub struct Visitor;

    /// Blog post
    pub struct Blog;

    /// Like record (blog x visitor)
    pub struct BlogLike;

    /// Guest comment on a blog
    pub struct Comment;
}

pub type UserId = Id<markers::User>;
pub type VisitorId = Id<markers::Visitor>;
pub type BlogId = Id<markers::Blog>;
pub type BlogLikeId = Id<markers::BlogLike>;
pub type CommentId = Id<markers::Comment>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_v4_and_distinct() {
        let a = VisitorId::new();
        let b = VisitorId::new();
        assert_eq!(a.as_uuid().get_version_num(), 4);
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_and_display() {
        let uuid = Uuid::new_v4();
        let id: UserId = uuid.to_string().parse().unwrap();
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(id.to_string(), uuid.to_string());
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = BlogId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));

        let back: BlogId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
