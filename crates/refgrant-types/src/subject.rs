//! Subject (protected entity) types.

use crate::{EntityId, FieldName};
use serde::{Deserialize, Serialize};

/// The content item whose access is being decided.
///
/// A subject owns zero or more grant fields; the records attached to
/// those fields are the only custom-permission input to a decision.
/// The author is the fallback identity: when no public record exists
/// and no record permits, only the author is allowed.
///
/// # Why No Default?
///
/// A subject requires a real id and author — there is no sensible
/// default identity, and a made-up author would silently widen the
/// fallback rule. Always construct with [`Subject::new`].
///
/// # Example
///
/// ```
/// use refgrant_types::{EntityId, Subject};
///
/// let author = EntityId::new();
/// let subject = Subject::new(EntityId::new(), author)
///     .with_grant_field("field_members");
///
/// assert_eq!(subject.author(), author);
/// assert_eq!(subject.grant_fields().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// The protected entity.
    id: EntityId,
    /// The entity's original author.
    author: EntityId,
    /// Grant fields attached to the entity, in declaration order.
    grant_fields: Vec<FieldName>,
}

impl Subject {
    /// Creates a subject with no grant fields.
    #[must_use]
    pub fn new(id: EntityId, author: EntityId) -> Self {
        Self {
            id,
            author,
            grant_fields: Vec::new(),
        }
    }

    /// Attaches a grant field to the subject.
    #[must_use]
    pub fn with_grant_field(mut self, field: impl Into<FieldName>) -> Self {
        self.grant_fields.push(field.into());
        self
    }

    /// Returns the subject's entity id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the original author's entity id.
    #[must_use]
    pub fn author(&self) -> EntityId {
        self.author
    }

    /// Returns the attached grant fields in declaration order.
    #[must_use]
    pub fn grant_fields(&self) -> &[FieldName] {
        &self.grant_fields
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "subject:{}", self.id.uuid())
    }
}
