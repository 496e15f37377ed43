//! Actor (requesting identity) types.
//!
//! An [`Actor`] is pure identity plus the memberships needed to match
//! grant targets. It carries no permission logic: deciding whether an
//! actor may perform an operation is the evaluator's job, and the
//! evaluator only asks the actor membership questions.

use crate::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The identity requesting access, with its memberships.
///
/// Grant records reference targets of one configured kind per field;
/// an actor matches a target depending on that kind:
///
/// - `user`: the actor **is** the target (`id == target`), or reaches
///   it through its own back-reference field (see
///   [`references`](Self::references));
/// - `user_role`: the actor holds the role;
/// - `taxonomy_term`: the actor is associated with the term;
/// - `node`: the actor is a member of the node group.
///
/// Actors are immutable value types; the `with_*` builders return the
/// extended actor and are intended for construction at the access
/// boundary, not for mutation mid-check.
///
/// # Example
///
/// ```
/// use refgrant_types::{Actor, EntityId, EntityKind};
///
/// let editors = EntityId::new();
/// let actor = Actor::new(EntityId::new()).with_role(editors);
///
/// assert!(actor.is_member(EntityKind::UserRole, editors));
/// assert!(!actor.is_member(EntityKind::Node, editors));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor's own user entity.
    id: EntityId,
    /// Roles the actor holds.
    roles: HashSet<EntityId>,
    /// Taxonomy terms the actor is associated with.
    terms: HashSet<EntityId>,
    /// Node groups the actor is a member of.
    groups: HashSet<EntityId>,
    /// Users listed in the actor's own back-reference field.
    ///
    /// Only consulted for `user`-kind fields configured with
    /// back-reference expansion; grants propagate exactly one hop.
    referenced_users: HashSet<EntityId>,
}

impl Actor {
    /// Creates an actor with no memberships.
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            roles: HashSet::new(),
            terms: HashSet::new(),
            groups: HashSet::new(),
            referenced_users: HashSet::new(),
        }
    }

    /// Returns the actor's entity id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Adds a role the actor holds.
    #[must_use]
    pub fn with_role(mut self, role: EntityId) -> Self {
        self.roles.insert(role);
        self
    }

    /// Adds a taxonomy term the actor is associated with.
    #[must_use]
    pub fn with_term(mut self, term: EntityId) -> Self {
        self.terms.insert(term);
        self
    }

    /// Adds a node group the actor is a member of.
    #[must_use]
    pub fn with_group(mut self, group: EntityId) -> Self {
        self.groups.insert(group);
        self
    }

    /// Adds a user listed in the actor's own back-reference field.
    #[must_use]
    pub fn with_referenced_user(mut self, user: EntityId) -> Self {
        self.referenced_users.insert(user);
        self
    }

    /// Checks whether the actor matches `target` under `kind`.
    ///
    /// For [`EntityKind::User`] this is identity equality only;
    /// back-reference expansion is a separate, settings-gated check
    /// (see [`references`](Self::references)).
    #[must_use]
    pub fn is_member(&self, kind: EntityKind, target: EntityId) -> bool {
        match kind {
            EntityKind::User => self.id == target,
            EntityKind::UserRole => self.roles.contains(&target),
            EntityKind::TaxonomyTerm => self.terms.contains(&target),
            EntityKind::Node => self.groups.contains(&target),
        }
    }

    /// Checks whether the actor's own back-reference field lists `user`.
    #[must_use]
    pub fn references(&self, user: EntityId) -> bool {
        self.referenced_users.contains(&user)
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor:{}", self.id.uuid())
    }
}
