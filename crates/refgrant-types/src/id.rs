//! Identifier types for refgrant.
//!
//! All entity identifiers are UUID-based so that grant records can
//! reference subjects and targets across processes and storage
//! backends without coordination.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a content entity.
///
/// An entity is anything a grant record can point at or be attached
/// to: a content item (subject), a user, a role, a taxonomy term, or
/// another content item used as a group. The identifier carries no
/// kind information; the kind of a grant target is fixed per field by
/// [`FieldSettings`](https://docs.rs/refgrant-auth) and the same
/// `EntityId` value is never interpreted under two kinds at once.
///
/// # Example
///
/// ```
/// use refgrant_types::EntityId;
///
/// let subject = EntityId::new();
/// let target = EntityId::new();
///
/// assert_ne!(subject, target);  // Random v4 UUIDs
/// println!("Subject: {}", subject);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Creates a new [`EntityId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID, e.g. one read back from storage.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity:{}", self.0)
    }
}

/// Machine name of a grant field.
///
/// A field is the attachment point for grant records on a subject
/// entity: one subject may carry several grant fields, and each field
/// has its own [`FieldSettings`](https://docs.rs/refgrant-auth) and
/// its own sequence of records. Field names are plain machine names
/// (`field_members`, `field_editors`, ...) — refgrant does not parse
/// or namespace them.
///
/// # Example
///
/// ```
/// use refgrant_types::FieldName;
///
/// let field = FieldName::new("field_members");
/// assert_eq!(field.as_str(), "field_members");
/// assert_eq!(field.to_string(), "field_members");
///
/// let same: FieldName = "field_members".into();
/// assert_eq!(field, same);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldName(String);

impl FieldName {
    /// Creates a field name from a machine name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the machine name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
