//! Per-record grant flags.
//!
//! Each grant record carries one flag set: a public override bit and
//! one bit per access operation. The set is deliberately a bitmask —
//! the persisted layout is a single-byte integer per record, and
//! stored data may legally combine `PUBLIC` with custom bits (editing
//! surfaces hide but do not clear the custom controls).

use bitflags::bitflags;
use refgrant_types::AccessOp;

bitflags! {
    /// Operation flags stored on a single grant record.
    ///
    /// | Flag | Meaning |
    /// |------|---------|
    /// | [`PUBLIC`](Self::PUBLIC) | Defer to the host's standard permission system |
    /// | [`VIEW`](Self::VIEW) | Grant the `view` operation |
    /// | [`UPDATE`](Self::UPDATE) | Grant the `update` operation |
    /// | [`DELETE`](Self::DELETE) | Grant the `delete` operation |
    ///
    /// `PUBLIC` is an override, not a grant: when set, the evaluator
    /// never consults the custom bits of **any** record on the
    /// subject, even bits set on the same record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GrantFlags: u8 {
        /// Standard permissions govern; custom bits are ignored.
        const PUBLIC = 0b0000_0001;
        /// Grants `view`.
        const VIEW   = 0b0000_0010;
        /// Grants `update`.
        const UPDATE = 0b0000_0100;
        /// Grants `delete`.
        const DELETE = 0b0000_1000;
    }
}

impl GrantFlags {
    /// All custom-grant bits: VIEW | UPDATE | DELETE.
    pub const CUSTOM: Self = Self::VIEW.union(Self::UPDATE).union(Self::DELETE);

    /// Returns the flag that grants `op`.
    ///
    /// # Example
    ///
    /// ```
    /// use refgrant_auth::GrantFlags;
    /// use refgrant_types::AccessOp;
    ///
    /// assert_eq!(GrantFlags::for_op(AccessOp::View), GrantFlags::VIEW);
    /// assert_eq!(GrantFlags::for_op(AccessOp::Delete), GrantFlags::DELETE);
    /// ```
    #[must_use]
    pub fn for_op(op: AccessOp) -> Self {
        match op {
            AccessOp::View => Self::VIEW,
            AccessOp::Update => Self::UPDATE,
            AccessOp::Delete => Self::DELETE,
        }
    }

    /// Returns the human-readable names of the set flags.
    ///
    /// `PUBLIC` maps to "Public", the custom bits to their editing
    /// labels ("Grant View", ...). Unknown bits are not named.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.contains(Self::PUBLIC) {
            names.push("Public");
        }
        for op in AccessOp::ALL {
            if self.contains(Self::for_op(op)) {
                names.push(op.label());
            }
        }
        names
    }

    /// Parses a flag name (case-insensitive).
    ///
    /// Accepts the wire names `public`, `view`, `update`, `delete`.
    ///
    /// # Example
    ///
    /// ```
    /// use refgrant_auth::GrantFlags;
    ///
    /// assert_eq!(GrantFlags::parse("public"), Some(GrantFlags::PUBLIC));
    /// assert_eq!(GrantFlags::parse("VIEW"), Some(GrantFlags::VIEW));
    /// assert_eq!(GrantFlags::parse("share"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "public" => Some(Self::PUBLIC),
            "view" => Some(Self::VIEW),
            "update" => Some(Self::UPDATE),
            "delete" => Some(Self::DELETE),
            _ => None,
        }
    }
}

impl std::fmt::Display for GrantFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.names();
        if names.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}

// The persisted form is the raw byte. Unknown bits are retained on
// read so that a round-trip through this crate never silently
// rewrites stored data.
impl serde::Serialize for GrantFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> serde::Deserialize<'de> for GrantFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = <u8 as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::from_bits_retain(bits))
    }
}
