//! Grant records.

use crate::GrantFlags;
use refgrant_types::{AccessOp, EntityId};
use serde::{Deserialize, Serialize};

/// One stored permission entry: a target reference plus a flag set.
///
/// A record is owned by the subject entity it is attached to (per
/// field, per delta) and destroyed with it; records never outlive
/// their field value. Multiple records on one subject combine by
/// permissive-OR — any matching record permits.
///
/// # Public vs. custom
///
/// [`is_public`](Self::is_public) only checks the `PUBLIC` bit. A
/// record may carry custom bits alongside `PUBLIC` (editing surfaces
/// hide, but do not clear, the custom controls); such a record is
/// still public and its custom bits are dead weight, never consulted.
///
/// # Example
///
/// ```
/// use refgrant_auth::{GrantFlags, GrantRecord};
/// use refgrant_types::{AccessOp, EntityId};
///
/// let target = EntityId::new();
/// let record = GrantRecord::custom(target, GrantFlags::VIEW | GrantFlags::UPDATE);
///
/// assert!(!record.is_public());
/// assert!(record.grants(AccessOp::View));
/// assert!(!record.grants(AccessOp::Delete));
///
/// let public = GrantRecord::public(target);
/// assert!(public.is_public());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantRecord {
    /// The referenced target entity.
    target: EntityId,
    /// The record's flag byte.
    flags: GrantFlags,
}

impl GrantRecord {
    /// Creates a public record: standard permissions govern.
    #[must_use]
    pub fn public(target: EntityId) -> Self {
        Self {
            target,
            flags: GrantFlags::PUBLIC,
        }
    }

    /// Creates a record with the given flags, as submitted.
    ///
    /// The flags are stored verbatim; this constructor does not strip
    /// `PUBLIC` or custom bits. See the type-level notes on mixed
    /// flag sets.
    #[must_use]
    pub fn custom(target: EntityId, flags: GrantFlags) -> Self {
        Self { target, flags }
    }

    /// Returns the referenced target entity.
    #[must_use]
    pub fn target(&self) -> EntityId {
        self.target
    }

    /// Returns the raw flag set.
    #[must_use]
    pub fn flags(&self) -> GrantFlags {
        self.flags
    }

    /// Returns `true` if the `PUBLIC` bit is set.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags.contains(GrantFlags::PUBLIC)
    }

    /// Returns `true` if the record's flag for `op` is set.
    ///
    /// This is a raw bit test; it does not apply the public override.
    #[must_use]
    pub fn grants(&self, op: AccessOp) -> bool {
        self.flags.contains(GrantFlags::for_op(op))
    }
}

impl std::fmt::Display for GrantRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.flags, self.target)
    }
}
