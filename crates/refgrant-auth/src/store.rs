//! Grant record storage.
//!
//! The evaluator reads records through the [`GrantStore`] trait and
//! never mutates them; writes come from the host's editing surface
//! (the presentation adapter). Concrete backends live outside this
//! crate — `MemoryGrantStore` in `refgrant-store` is the reference
//! implementation.

use crate::GrantRecord;
use refgrant_types::{EntityId, ErrorCode, FieldName};
use thiserror::Error;

/// Errors from grant record storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("grant store unavailable: {context}")]
    Unavailable {
        /// Which store operation failed.
        context: String,
    },

    /// An internal lock was poisoned (a writer panicked mid-write).
    #[error("grant store lock poisoned: {context}")]
    LockPoisoned {
        /// Which lock was poisoned.
        context: String,
    },

    /// A write could not be completed; partial writes are rolled back.
    #[error("grant write failed: {context}")]
    WriteFailed {
        /// Which write failed.
        context: String,
    },
}

impl StoreError {
    /// Creates an unavailable error.
    pub fn unavailable(context: impl Into<String>) -> Self {
        Self::Unavailable {
            context: context.into(),
        }
    }

    /// Creates a lock-poisoned error.
    pub fn lock_poisoned(context: impl Into<String>) -> Self {
        Self::LockPoisoned {
            context: context.into(),
        }
    }

    /// Creates a write-failed error.
    pub fn write_failed(context: impl Into<String>) -> Self {
        Self::WriteFailed {
            context: context.into(),
        }
    }
}

impl ErrorCode for StoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "STORE_UNAVAILABLE",
            Self::LockPoisoned { .. } => "STORE_LOCK_POISONED",
            Self::WriteFailed { .. } => "STORE_WRITE_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        // A poisoned lock means some writer panicked; the store needs
        // to be rebuilt, not retried.
        !matches!(self, Self::LockPoisoned { .. })
    }
}

/// Storage for grant records, keyed by (subject, field, delta).
///
/// # Contract
///
/// - One record per (subject, field, delta): [`put`](Self::put) with
///   an existing delta replaces that record.
/// - [`list_for`](Self::list_for) returns records in ascending delta
///   order; the returned sequence is finite and owned (restartable).
/// - Absent grants are not an error: listing an unknown subject or
///   field yields an empty vector.
/// - [`delete_all_for`](Self::delete_all_for) is the cascade hook for
///   field-value or subject deletion; deleting nothing is a no-op.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; concurrent writes to the
/// same subject's grants are serialized by the implementation.
pub trait GrantStore: Send + Sync + std::fmt::Debug {
    /// Stores `record` at (subject, field, delta), replacing any
    /// record already at that delta.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write cannot be completed; the
    /// store must not keep a partial write.
    fn put(
        &self,
        subject: EntityId,
        field: &FieldName,
        delta: u32,
        record: GrantRecord,
    ) -> Result<(), StoreError>;

    /// Returns all records for (subject, field) in delta order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if the store is unreachable —
    /// never for absent grants.
    fn list_for(&self, subject: EntityId, field: &FieldName) -> Result<Vec<GrantRecord>, StoreError>;

    /// Removes every record for (subject, field).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unreachable.
    fn delete_all_for(&self, subject: EntityId, field: &FieldName) -> Result<(), StoreError>;
}
