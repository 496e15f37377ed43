//! Unified access evaluation error.
//!
//! An access check touches two fallible collaborators:
//!
//! ```text
//! can_access ──► SettingsResolver ──► SettingsError
//!           └──► GrantStore       ──► StoreError
//! ```
//!
//! [`AccessError`] unifies both so callers can report the failing
//! layer without matching every variant.

use crate::{SettingsError, StoreError};
use refgrant_types::ErrorCode;
use thiserror::Error;

/// Error surfaced by an access evaluation.
///
/// The evaluator cannot safely default to permit or deny when a
/// collaborator fails, so both failure kinds abort the check and
/// propagate to the caller.
///
/// # Example
///
/// ```
/// use refgrant_auth::{AccessError, StoreError};
///
/// let err = AccessError::from(StoreError::unavailable("connect"));
/// assert_eq!(err.layer(), "store");
/// assert!(err.to_string().contains("connect"));
/// ```
#[derive(Debug, Error)]
pub enum AccessError {
    /// Field settings were missing or unreadable.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The grant record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AccessError {
    /// Returns the collaborator that failed.
    #[must_use]
    pub fn layer(&self) -> &'static str {
        match self {
            Self::Settings(_) => "settings",
            Self::Store(_) => "store",
        }
    }
}

impl ErrorCode for AccessError {
    fn code(&self) -> &'static str {
        match self {
            Self::Settings(e) => e.code(),
            Self::Store(e) => e.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Settings(e) => e.is_recoverable(),
            Self::Store(e) => e.is_recoverable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_layer() {
        let err = AccessError::from(SettingsError::not_configured("field_members"));
        assert_eq!(err.layer(), "settings");
        assert_eq!(err.code(), "SETTINGS_NOT_CONFIGURED");
        assert!(err.to_string().contains("field_members"), "got: {err}");
    }

    #[test]
    fn store_layer() {
        let err = AccessError::from(StoreError::lock_poisoned("records (read)"));
        assert_eq!(err.layer(), "store");
        assert_eq!(err.code(), "STORE_LOCK_POISONED");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn recoverability_delegates() {
        assert!(AccessError::from(StoreError::unavailable("connect")).is_recoverable());
        assert!(!AccessError::from(SettingsError::unsupported_kind("comment")).is_recoverable());
    }
}
