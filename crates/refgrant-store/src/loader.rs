//! Field-settings loader for TOML configuration.
//!
//! # File Shape
//!
//! One table per grant field under `[fields.*]`; only `target_type`
//! is required:
//!
//! ```toml
//! [fields.field_members]
//! target_type = "user"
//! user_method = "ref_user"
//! priority = 0
//!
//! [fields.field_editors]
//! target_type = "user_role"
//! ```
//!
//! # Validation
//!
//! Unknown `target_type` values fail with
//! [`SettingsError::UnsupportedKind`] carrying the raw string, so the
//! embedding host can surface the exact submitted value in its form
//! validation message. The loaded registry applies the same
//! [`KindCatalog`] checks as programmatic submission.

use crate::{KindCatalog, SettingsRegistry};
use refgrant_auth::{FieldSettings, SettingsError, UserMethod};
use refgrant_types::{EntityKind, ErrorCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading a settings file.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Failed to read the settings file.
    #[error("failed to read settings file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the settings file as TOML.
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A parsed field failed settings validation.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl LoaderError {
    /// Creates a read error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse error.
    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

impl ErrorCode for LoaderError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "LOADER_READ_FILE",
            Self::Parse { .. } => "LOADER_PARSE",
            Self::Settings(e) => e.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // A missing or unreadable file may appear on retry.
            Self::ReadFile { .. } => true,
            Self::Parse { .. } => false,
            Self::Settings(e) => e.is_recoverable(),
        }
    }
}

/// Raw per-field table as persisted.
#[derive(Debug, Deserialize)]
struct RawFieldSettings {
    target_type: String,
    #[serde(default)]
    user_method: Option<UserMethod>,
    #[serde(default)]
    priority: Option<i64>,
}

/// Top-level settings file.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    fields: BTreeMap<String, RawFieldSettings>,
}

/// Loads field settings from TOML into a [`SettingsRegistry`].
///
/// # Example
///
/// ```
/// use refgrant_store::SettingsLoader;
/// use refgrant_types::{EntityKind, FieldName};
/// use refgrant_auth::SettingsResolver;
///
/// let registry = SettingsLoader::new().load_str(
///     "[fields.field_members]\ntarget_type = \"user\"\n",
/// )?;
///
/// let settings = registry.resolve(&FieldName::new("field_members"))?;
/// assert_eq!(settings.target_kind(), EntityKind::User);
/// # Ok::<(), refgrant_store::LoaderError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    catalog: KindCatalog,
}

impl SettingsLoader {
    /// Creates a loader accepting every supported kind.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the loader to a custom kind catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: KindCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Loads settings from a file.
    ///
    /// # Errors
    ///
    /// [`LoaderError::ReadFile`] / [`LoaderError::Parse`] for I/O and
    /// syntax failures, [`LoaderError::Settings`] when a field's
    /// target kind is unknown or outside the catalog.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<SettingsRegistry, LoaderError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::read_file(path, e))?;
        let file: SettingsFile =
            toml::from_str(&raw).map_err(|e| LoaderError::parse(path, e))?;
        tracing::debug!(path = %path.display(), fields = file.fields.len(), "settings file loaded");
        self.into_registry(file)
    }

    /// Parses settings from an in-memory TOML string.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), with `<inline>` as the reported
    /// path for parse failures.
    pub fn load_str(&self, raw: &str) -> Result<SettingsRegistry, LoaderError> {
        let file: SettingsFile =
            toml::from_str(raw).map_err(|e| LoaderError::parse("<inline>", e))?;
        self.into_registry(file)
    }

    fn into_registry(&self, file: SettingsFile) -> Result<SettingsRegistry, LoaderError> {
        let registry = SettingsRegistry::with_catalog(self.catalog.clone());
        for (name, raw) in file.fields {
            let kind = EntityKind::parse(&raw.target_type)
                .ok_or_else(|| SettingsError::unsupported_kind(raw.target_type.clone()))?;
            let mut settings = FieldSettings::new(kind);
            if let Some(method) = raw.user_method {
                settings = settings.with_user_method(method);
            }
            if let Some(priority) = raw.priority {
                settings = settings.with_priority(priority);
            }
            registry.submit(name, settings)?;
        }
        Ok(registry)
    }
}
