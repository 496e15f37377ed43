//! Core types for the refgrant access model.
//!
//! refgrant computes effective view/update/delete permissions for a
//! content entity from per-reference grant records. This crate holds
//! the foundational, logic-free types shared by every layer.
//!
//! # Crate Architecture
//!
//! ```text
//! refgrant-types   : EntityId, FieldName, EntityKind, AccessOp,
//!                    Subject, Actor, ErrorCode            ◄── HERE
//!       ↑
//! refgrant-auth    : GrantRecord, FieldSettings, traits,
//!                    AccessEvaluator
//!       ↑
//! refgrant-store   : MemoryGrantStore, SettingsRegistry,
//!                    SettingsLoader, FixedHostAccess
//! ```
//!
//! # Identity vs. Permission
//!
//! [`Subject`] and [`Actor`] are pure identity: who owns the decision
//! and who is asking, plus the memberships needed to match grant
//! targets. No type in this crate answers "is this allowed?" — that
//! is the evaluator's job in `refgrant-auth`. Keeping identity below
//! the permission logic avoids circular dependencies and lets hosts
//! construct actors at their own boundary.
//!
//! # Example
//!
//! ```
//! use refgrant_types::{Actor, EntityId, EntityKind, FieldName, Subject};
//!
//! let author = EntityId::new();
//! let subject = Subject::new(EntityId::new(), author)
//!     .with_grant_field("field_members");
//!
//! let role = EntityId::new();
//! let actor = Actor::new(EntityId::new()).with_role(role);
//!
//! assert!(actor.is_member(EntityKind::UserRole, role));
//! assert_eq!(subject.grant_fields(), [FieldName::new("field_members")]);
//! ```

mod actor;
mod error;
mod id;
mod kind;
mod op;
mod subject;

pub use actor::Actor;
pub use error::{assert_error_codes, ErrorCode};
pub use id::{EntityId, FieldName};
pub use kind::EntityKind;
pub use op::AccessOp;
pub use subject::Subject;
