//! Grant model and resolution core for refgrant.
//!
//! refgrant attaches fine-grained access grants (public / view /
//! update / delete) to references between content entities and
//! resolves them into permit/deny decisions. This crate holds the
//! grant model, the collaborator traits, and the evaluator; concrete
//! backends live in `refgrant-store`.
//!
//! # Decision Model
//!
//! ```text
//! decision(subject, op, actor) =
//!     any record PUBLIC        → host standard permissions
//!     any record matches op+actor → permit      (permissive-OR)
//!     otherwise                → permit iff actor is the author
//! ```
//!
//! | Piece | Type | Role |
//! |-------|------|------|
//! | [`GrantRecord`] | Data | target reference + [`GrantFlags`] byte |
//! | [`FieldSettings`] | Data | per-field target kind + user method |
//! | [`GrantStore`] | Trait | record persistence (impls elsewhere) |
//! | [`SettingsResolver`] | Trait | field configuration lookup |
//! | [`HostAccess`] | Trait | standard permissions, public path only |
//! | [`AccessEvaluator`] | Struct | the resolution algorithm |
//!
//! # Crate Architecture
//!
//! ```text
//! refgrant-types   (EntityId, Subject, Actor, AccessOp)
//!       ↑
//! refgrant-auth    (grant model, traits, evaluator)  ◄── THIS CRATE
//!       ↑
//! refgrant-store   (MemoryGrantStore, SettingsRegistry, loaders)
//! ```
//!
//! # Design Principles
//!
//! - **Trait definitions here, implementations in consumers** — the
//!   evaluator only sees `dyn GrantStore` / `dyn SettingsResolver` /
//!   `dyn HostAccess`.
//! - **Read-only evaluation** — the evaluator never writes; editing
//!   surfaces write through [`GrantStore`] directly.
//! - **No guessing on failure** — a broken collaborator aborts the
//!   check with [`AccessError`] instead of defaulting to permit or
//!   deny.

pub mod error;
pub mod evaluator;
pub mod flags;
pub mod host;
pub mod record;
pub mod settings;
pub mod store;

// Re-export core types
pub use error::AccessError;
pub use evaluator::AccessEvaluator;
pub use flags::GrantFlags;
pub use host::HostAccess;
pub use record::GrantRecord;
pub use settings::{FieldSettings, SettingsError, SettingsResolver, UserMethod};
pub use store::{GrantStore, StoreError};

// Re-export the shared identity types for convenience
pub use refgrant_types::{AccessOp, Actor, EntityId, EntityKind, FieldName, Subject};
