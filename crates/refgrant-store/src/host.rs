//! Static host-permission table.

use refgrant_auth::HostAccess;
use refgrant_types::{AccessOp, Actor, Subject};

/// [`HostAccess`] implementation with a fixed per-operation answer.
///
/// Stands in for the host framework's standard permission system in
/// tests and in embeddings whose standard permissions are uniform
/// (e.g. "published content is world-viewable, never world-editable").
/// Real hosts implement [`HostAccess`] against their own permission
/// layer instead.
///
/// # Example
///
/// ```
/// use refgrant_auth::HostAccess;
/// use refgrant_store::FixedHostAccess;
/// use refgrant_types::{AccessOp, Actor, EntityId, Subject};
///
/// // World-viewable, not editable.
/// let host = FixedHostAccess::new(true, false, false);
/// let subject = Subject::new(EntityId::new(), EntityId::new());
/// let actor = Actor::new(EntityId::new());
///
/// assert!(host.allows(&subject, AccessOp::View, &actor));
/// assert!(!host.allows(&subject, AccessOp::Update, &actor));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedHostAccess {
    view: bool,
    update: bool,
    delete: bool,
}

impl FixedHostAccess {
    /// Creates a table with one answer per operation.
    #[must_use]
    pub fn new(view: bool, update: bool, delete: bool) -> Self {
        Self {
            view,
            update,
            delete,
        }
    }

    /// Permits every operation.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::new(true, true, true)
    }

    /// Denies every operation.
    #[must_use]
    pub fn deny_all() -> Self {
        Self::new(false, false, false)
    }
}

impl HostAccess for FixedHostAccess {
    fn allows(&self, _subject: &Subject, op: AccessOp, _actor: &Actor) -> bool {
        match op {
            AccessOp::View => self.view,
            AccessOp::Update => self.update,
            AccessOp::Delete => self.delete,
        }
    }
}
