//! Field settings and their resolution.
//!
//! Every grant field is configured once: which entity kind its
//! records reference, and — for user-kind fields — how grants
//! associate with users. Settings are resolved through the
//! [`SettingsResolver`] trait; concrete resolvers (an in-memory
//! registry, a TOML loader) live in `refgrant-store`.

use refgrant_types::{EntityKind, ErrorCode, FieldName};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a user-kind field associates grants with users.
///
/// Only meaningful when the field's target kind is
/// [`EntityKind::User`]; resolvers preserve the value for other kinds
/// but the evaluator ignores it.
///
/// Wire names match the persisted configuration: `user`, `ref_user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserMethod {
    /// Grant access to the referenced users only.
    #[default]
    #[serde(rename = "user")]
    Direct,
    /// Additionally grant access to any actor whose own configured
    /// back-reference field lists a referenced user (one hop).
    #[serde(rename = "ref_user")]
    BackReference,
}

impl UserMethod {
    /// Returns the wire name of this method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "user",
            Self::BackReference => "ref_user",
        }
    }
}

impl std::fmt::Display for UserMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field grant configuration.
///
/// One instance per field definition, shared read-only by all of the
/// field's records. Immutable after creation except through an
/// explicit settings submission (see `SettingsRegistry` in
/// `refgrant-store`).
///
/// `priority` is advisory passthrough for external priority modules;
/// nothing in this engine consults it.
///
/// # Example
///
/// ```
/// use refgrant_auth::{FieldSettings, UserMethod};
/// use refgrant_types::EntityKind;
///
/// let settings = FieldSettings::new(EntityKind::User)
///     .with_user_method(UserMethod::BackReference);
///
/// assert_eq!(settings.target_kind(), EntityKind::User);
/// assert_eq!(settings.user_method(), UserMethod::BackReference);
/// assert_eq!(settings.priority(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSettings {
    /// The kind every record of the field references.
    target_kind: EntityKind,
    /// User-association method; ignored unless `target_kind` is `user`.
    #[serde(default)]
    user_method: UserMethod,
    /// Advisory priority, consumed by optional external modules.
    #[serde(default)]
    priority: i64,
}

impl FieldSettings {
    /// Creates settings for a target kind with the defaults:
    /// direct user association and priority 0.
    #[must_use]
    pub fn new(target_kind: EntityKind) -> Self {
        Self {
            target_kind,
            user_method: UserMethod::default(),
            priority: 0,
        }
    }

    /// Sets the user-association method.
    #[must_use]
    pub fn with_user_method(mut self, method: UserMethod) -> Self {
        self.user_method = method;
        self
    }

    /// Sets the advisory priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the configured target kind.
    #[must_use]
    pub fn target_kind(&self) -> EntityKind {
        self.target_kind
    }

    /// Returns the user-association method.
    #[must_use]
    pub fn user_method(&self) -> UserMethod {
        self.user_method
    }

    /// Returns the advisory priority.
    #[must_use]
    pub fn priority(&self) -> i64 {
        self.priority
    }
}

/// Errors raised when configuring or resolving field settings.
///
/// Configuration-time variants (`UnsupportedKind`, `KindLocked`) must
/// block the settings submission; they are surfaced to the editor as
/// validation messages by the embedding host.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The field was never configured; a target kind is required.
    #[error("field '{field}' has no grant configuration")]
    NotConfigured {
        /// The unresolved field.
        field: FieldName,
    },

    /// The submitted target kind is outside the supported set.
    #[error("unsupported target kind '{kind}'")]
    UnsupportedKind {
        /// The rejected kind, as submitted.
        kind: String,
    },

    /// The field already stores records; its target kind cannot change.
    #[error("field '{field}' already has data; target kind is locked to '{kind}'")]
    KindLocked {
        /// The field whose kind is locked.
        field: FieldName,
        /// The currently configured kind.
        kind: EntityKind,
    },

    /// The settings backend could not be read.
    #[error("settings unavailable: {context}")]
    Unavailable {
        /// Which backend operation failed.
        context: String,
    },
}

impl SettingsError {
    /// Creates a not-configured error.
    pub fn not_configured(field: impl Into<FieldName>) -> Self {
        Self::NotConfigured {
            field: field.into(),
        }
    }

    /// Creates an unsupported-kind error.
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedKind { kind: kind.into() }
    }

    /// Creates a kind-locked error.
    pub fn kind_locked(field: impl Into<FieldName>, kind: EntityKind) -> Self {
        Self::KindLocked {
            field: field.into(),
            kind,
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(context: impl Into<String>) -> Self {
        Self::Unavailable {
            context: context.into(),
        }
    }
}

impl ErrorCode for SettingsError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotConfigured { .. } => "SETTINGS_NOT_CONFIGURED",
            Self::UnsupportedKind { .. } => "SETTINGS_UNSUPPORTED_KIND",
            Self::KindLocked { .. } => "SETTINGS_KIND_LOCKED",
            Self::Unavailable { .. } => "SETTINGS_UNAVAILABLE",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Configuration mistakes need a changed submission, not a
        // retry; only a backend outage is transient.
        matches!(self, Self::Unavailable { .. })
    }
}

/// Resolves the settings of a grant field.
///
/// # Implementors
///
/// - `SettingsRegistry` (in `refgrant-store`) — validated in-memory
///   registry with an injected kind catalog
/// - Custom impls for testing or host-backed configuration
///
/// # Errors
///
/// [`SettingsError::NotConfigured`] when the field has no
/// configuration; backend failures as
/// [`SettingsError::Unavailable`].
pub trait SettingsResolver: Send + Sync {
    /// Resolves the settings for `field`.
    fn resolve(&self, field: &FieldName) -> Result<FieldSettings, SettingsError>;
}
