//! Access operations.

use serde::{Deserialize, Serialize};

/// An operation whose permission is being decided.
///
/// Each operation corresponds to one custom-grant flag on a record;
/// the public flag is not an operation but an override that routes
/// the decision to the host's standard permission system.
///
/// [`label`](Self::label) returns the human-facing name used by
/// editing surfaces ("Grant View", "Grant Update", "Grant Delete").
///
/// # Example
///
/// ```
/// use refgrant_types::AccessOp;
///
/// assert_eq!(AccessOp::View.as_str(), "view");
/// assert_eq!(AccessOp::Update.label(), "Grant Update");
/// assert_eq!(AccessOp::ALL.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessOp {
    /// Observe the subject entity.
    View,
    /// Modify the subject entity.
    Update,
    /// Remove the subject entity.
    Delete,
}

impl AccessOp {
    /// All operations, in flag order.
    pub const ALL: [Self; 3] = [Self::View, Self::Update, Self::Delete];

    /// Returns the wire name of this operation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Returns the human-facing label for editing surfaces.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::View => "Grant View",
            Self::Update => "Grant Update",
            Self::Delete => "Grant Delete",
        }
    }
}

impl std::fmt::Display for AccessOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
