//! Default implementation of [`GrantStore`].
//!
//! Provides [`MemoryGrantStore`] — a thread-safe, in-memory record
//! store keyed by (subject, field) with one record per delta.
//!
//! # Architecture
//!
//! ```text
//! GrantStore trait (refgrant-auth)       ← abstract definition
//!          │
//!          └── MemoryGrantStore (THIS MODULE)  ← concrete impl
//! ```

use refgrant_auth::{GrantRecord, GrantStore, StoreError};
use refgrant_types::{EntityId, FieldName};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// Thread-safe, in-memory grant record store.
///
/// Records are grouped per (subject, field) and ordered by delta via
/// a `BTreeMap`, so [`list_for`](GrantStore::list_for) returns delta
/// order without sorting. Writing to an occupied delta replaces that
/// record, keeping the one-record-per-delta invariant.
///
/// # Thread Safety
///
/// All operations go through an `RwLock`; read-heavy access checks
/// run concurrently. A poisoned lock surfaces as
/// [`StoreError::LockPoisoned`] — the store never answers from state
/// a panicking writer may have left behind.
///
/// # Example
///
/// ```
/// use refgrant_auth::{GrantFlags, GrantRecord, GrantStore};
/// use refgrant_store::MemoryGrantStore;
/// use refgrant_types::{EntityId, FieldName};
///
/// let store = MemoryGrantStore::new();
/// let subject = EntityId::new();
/// let field = FieldName::new("field_members");
///
/// let target = EntityId::new();
/// store.put(subject, &field, 0, GrantRecord::custom(target, GrantFlags::VIEW))?;
///
/// let records = store.list_for(subject, &field)?;
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].target(), target);
/// # Ok::<(), refgrant_auth::StoreError>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryGrantStore {
    /// (subject, field) → delta → record.
    records: RwLock<HashMap<(EntityId, FieldName), BTreeMap<u32, GrantRecord>>>,
}

impl MemoryGrantStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records across all subjects and fields.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records
            .read()
            .map(|rows| rows.values().map(BTreeMap::len).sum())
            .unwrap_or(0)
    }
}

impl GrantStore for MemoryGrantStore {
    fn put(
        &self,
        subject: EntityId,
        field: &FieldName,
        delta: u32,
        record: GrantRecord,
    ) -> Result<(), StoreError> {
        let mut rows = self.records.write().map_err(|e| {
            tracing::error!("memory store: records lock poisoned on put: {e}");
            StoreError::lock_poisoned("records (put)")
        })?;
        rows.entry((subject, field.clone()))
            .or_default()
            .insert(delta, record);
        Ok(())
    }

    fn list_for(&self, subject: EntityId, field: &FieldName) -> Result<Vec<GrantRecord>, StoreError> {
        let rows = self.records.read().map_err(|e| {
            tracing::error!("memory store: records lock poisoned on list: {e}");
            StoreError::lock_poisoned("records (list)")
        })?;
        Ok(rows
            .get(&(subject, field.clone()))
            .map(|deltas| deltas.values().copied().collect())
            .unwrap_or_default())
    }

    fn delete_all_for(&self, subject: EntityId, field: &FieldName) -> Result<(), StoreError> {
        let mut rows = self.records.write().map_err(|e| {
            tracing::error!("memory store: records lock poisoned on delete: {e}");
            StoreError::lock_poisoned("records (delete)")
        })?;
        rows.remove(&(subject, field.clone()));
        Ok(())
    }
}
