//! Concrete backends for the refgrant access model.
//!
//! The traits live in `refgrant-auth`; this crate provides the
//! default implementations an embedding host can use as-is or swap
//! for its own persistence:
//!
//! - [`MemoryGrantStore`]: thread-safe in-memory
//!   [`GrantStore`](refgrant_auth::GrantStore)
//! - [`SettingsRegistry`] + [`KindCatalog`]: validated
//!   [`SettingsResolver`](refgrant_auth::SettingsResolver)
//! - [`SettingsLoader`]: TOML settings file loader
//! - [`FixedHostAccess`]: static
//!   [`HostAccess`](refgrant_auth::HostAccess) table
//!
//! # Architecture
//!
//! ```text
//! refgrant-auth (traits + data types)
//!     GrantStore, SettingsResolver, HostAccess, AccessEvaluator
//!         ↓
//! refgrant-store (implementations)            ◄── THIS CRATE
//!     MemoryGrantStore, SettingsRegistry, SettingsLoader,
//!     FixedHostAccess
//! ```
//!
//! # Example
//!
//! ```
//! use refgrant_auth::{AccessEvaluator, FieldSettings, GrantFlags, GrantRecord, GrantStore};
//! use refgrant_store::{FixedHostAccess, MemoryGrantStore, SettingsRegistry};
//! use refgrant_types::{AccessOp, Actor, EntityId, EntityKind, FieldName, Subject};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryGrantStore::new());
//! let registry = Arc::new(SettingsRegistry::new());
//! registry.submit("field_members", FieldSettings::new(EntityKind::User))?;
//!
//! let subject = Subject::new(EntityId::new(), EntityId::new())
//!     .with_grant_field("field_members");
//! let reader = EntityId::new();
//! store.put(
//!     subject.id(),
//!     &FieldName::new("field_members"),
//!     0,
//!     GrantRecord::custom(reader, GrantFlags::VIEW),
//! )?;
//!
//! let evaluator = AccessEvaluator::new(store, registry, Arc::new(FixedHostAccess::deny_all()));
//! assert!(evaluator.can_access(&subject, AccessOp::View, &Actor::new(reader))?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod host;
mod loader;
mod memory;
mod registry;

pub use host::FixedHostAccess;
pub use loader::{LoaderError, SettingsLoader};
pub use memory::MemoryGrantStore;
pub use registry::{KindCatalog, SettingsRegistry};

// Re-export the core model for convenience
pub use refgrant_auth::{
    AccessError, AccessEvaluator, FieldSettings, GrantFlags, GrantRecord, GrantStore, HostAccess,
    SettingsError, SettingsResolver, StoreError, UserMethod,
};
