//! Target entity kinds.

use serde::{Deserialize, Serialize};

/// The kind of entity a grant field's records reference.
///
/// Exactly one kind is configured per field, and every record of that
/// field references an entity of that kind. The wire names match the
/// persisted configuration format:
///
/// | Variant | Wire name | Actor matches a target when |
/// |---------|-----------|------------------------------|
/// | [`UserRole`](Self::UserRole) | `user_role` | the actor holds the role |
/// | [`Node`](Self::Node) | `node` | the actor is a member of the node group |
/// | [`TaxonomyTerm`](Self::TaxonomyTerm) | `taxonomy_term` | the actor is associated with the term |
/// | [`User`](Self::User) | `user` | the actor *is* the target (or reaches it by back-reference) |
///
/// # Example
///
/// ```
/// use refgrant_types::EntityKind;
///
/// assert_eq!(EntityKind::parse("taxonomy_term"), Some(EntityKind::TaxonomyTerm));
/// assert_eq!(EntityKind::parse("comment"), None);
/// assert_eq!(EntityKind::User.as_str(), "user");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A user role; grants apply to every holder of the role.
    UserRole,
    /// A content item used as a group; grants apply to its members.
    Node,
    /// A taxonomy term; grants apply to actors associated with it.
    TaxonomyTerm,
    /// A single user account.
    User,
}

impl EntityKind {
    /// All supported kinds, in wire-name order.
    pub const ALL: [Self; 4] = [Self::UserRole, Self::Node, Self::TaxonomyTerm, Self::User];

    /// Returns the wire name of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserRole => "user_role",
            Self::Node => "node",
            Self::TaxonomyTerm => "taxonomy_term",
            Self::User => "user",
        }
    }

    /// Parses a wire name into a kind.
    ///
    /// Wire names are exact (`"user_role"`, `"node"`, `"taxonomy_term"`,
    /// `"user"`); anything else returns `None`. Callers turn `None`
    /// into an unsupported-kind configuration error.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "user_role" => Some(Self::UserRole),
            "node" => Some(Self::Node),
            "taxonomy_term" => Some(Self::TaxonomyTerm),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips_all_kinds() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(EntityKind::parse("comment"), None);
        assert_eq!(EntityKind::parse("USER"), None); // wire names are exact
        assert_eq!(EntityKind::parse(""), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&EntityKind::TaxonomyTerm).expect("serialize");
        assert_eq!(json, "\"taxonomy_term\"");

        let parsed: EntityKind = serde_json::from_str("\"user_role\"").expect("deserialize");
        assert_eq!(parsed, EntityKind::UserRole);
    }

    #[test]
    fn display_matches_as_str() {
        for kind in EntityKind::ALL {
            assert_eq!(format!("{kind}"), kind.as_str());
        }
    }
}
