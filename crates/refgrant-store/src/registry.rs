//! Validated field-settings registry.
//!
//! Provides [`SettingsRegistry`] — the default [`SettingsResolver`]
//! backed by memory — and [`KindCatalog`], the injected lookup of
//! entity kinds the embedding host actually supports.
//!
//! # Architecture
//!
//! ```text
//! SettingsResolver trait (refgrant-auth)   ← abstract definition
//!          │
//!          └── SettingsRegistry (THIS MODULE)
//!                   │ validates against
//!                   ▼
//!              KindCatalog (injected at construction)
//! ```

use refgrant_auth::{FieldSettings, SettingsError, SettingsResolver};
use refgrant_types::{EntityKind, FieldName};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// The entity kinds an embedding host supports as grant targets.
///
/// The engine itself understands the four [`EntityKind`]s; a host may
/// enable fewer (e.g. no taxonomy). The catalog is passed into
/// [`SettingsRegistry`] at construction instead of being looked up
/// globally, so different registries can serve different hosts in one
/// process.
///
/// # Example
///
/// ```
/// use refgrant_store::KindCatalog;
/// use refgrant_types::EntityKind;
///
/// let all = KindCatalog::all();
/// assert!(all.supports(EntityKind::TaxonomyTerm));
///
/// let narrow = KindCatalog::only(&[EntityKind::User, EntityKind::UserRole]);
/// assert!(narrow.supports(EntityKind::User));
/// assert!(!narrow.supports(EntityKind::Node));
/// ```
#[derive(Debug, Clone)]
pub struct KindCatalog {
    enabled: HashSet<EntityKind>,
}

impl KindCatalog {
    /// Catalog with every supported kind enabled.
    #[must_use]
    pub fn all() -> Self {
        Self {
            enabled: EntityKind::ALL.into_iter().collect(),
        }
    }

    /// Catalog restricted to the given kinds.
    #[must_use]
    pub fn only(kinds: &[EntityKind]) -> Self {
        Self {
            enabled: kinds.iter().copied().collect(),
        }
    }

    /// Returns `true` if `kind` is enabled.
    #[must_use]
    pub fn supports(&self, kind: EntityKind) -> bool {
        self.enabled.contains(&kind)
    }
}

impl Default for KindCatalog {
    fn default() -> Self {
        Self::all()
    }
}

/// Thread-safe, validated registry of per-field grant settings.
///
/// Submissions are validated against the injected [`KindCatalog`];
/// resubmitting identical settings is idempotent. Once a field holds
/// data, its target kind is locked — pass `has_data` to
/// [`submit_with_data`](Self::submit_with_data) and a kind change is
/// refused with [`SettingsError::KindLocked`].
///
/// # Example
///
/// ```
/// use refgrant_auth::{FieldSettings, SettingsResolver};
/// use refgrant_store::SettingsRegistry;
/// use refgrant_types::{EntityKind, FieldName};
///
/// let registry = SettingsRegistry::new();
/// registry.submit("field_members", FieldSettings::new(EntityKind::User))?;
///
/// let settings = registry.resolve(&FieldName::new("field_members"))?;
/// assert_eq!(settings.target_kind(), EntityKind::User);
/// # Ok::<(), refgrant_auth::SettingsError>(())
/// ```
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    catalog: KindCatalog,
    fields: RwLock<HashMap<FieldName, FieldSettings>>,
}

impl SettingsRegistry {
    /// Creates a registry accepting every supported kind.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry validating against a custom catalog.
    #[must_use]
    pub fn with_catalog(catalog: KindCatalog) -> Self {
        Self {
            catalog,
            fields: RwLock::new(HashMap::new()),
        }
    }

    /// Stores the settings for `field`, validating the target kind.
    ///
    /// Identical resubmissions are idempotent; differing settings for
    /// a field without data simply replace the previous ones.
    ///
    /// # Errors
    ///
    /// [`SettingsError::UnsupportedKind`] if the catalog does not
    /// enable the submitted target kind.
    pub fn submit(
        &self,
        field: impl Into<FieldName>,
        settings: FieldSettings,
    ) -> Result<(), SettingsError> {
        self.submit_with_data(field, settings, false)
    }

    /// Stores the settings for `field`, refusing a target-kind change
    /// when the field already holds records (`has_data`).
    ///
    /// # Errors
    ///
    /// [`SettingsError::UnsupportedKind`] for a kind outside the
    /// catalog; [`SettingsError::KindLocked`] for a kind change on a
    /// field with data.
    pub fn submit_with_data(
        &self,
        field: impl Into<FieldName>,
        settings: FieldSettings,
        has_data: bool,
    ) -> Result<(), SettingsError> {
        let field = field.into();
        if !self.catalog.supports(settings.target_kind()) {
            return Err(SettingsError::unsupported_kind(
                settings.target_kind().as_str(),
            ));
        }

        let mut fields = self
            .fields
            .write()
            .map_err(|_| SettingsError::unavailable("fields (write)"))?;

        if has_data {
            if let Some(existing) = fields.get(&field) {
                if existing.target_kind() != settings.target_kind() {
                    return Err(SettingsError::kind_locked(field, existing.target_kind()));
                }
            }
        }

        fields.insert(field, settings);
        Ok(())
    }

    /// Returns the settings for `field`, if configured.
    #[must_use]
    pub fn get(&self, field: &FieldName) -> Option<FieldSettings> {
        self.fields
            .read()
            .ok()
            .and_then(|fields| fields.get(field).copied())
    }

    /// Returns `true` if `field` has been configured.
    #[must_use]
    pub fn is_configured(&self, field: &FieldName) -> bool {
        self.get(field).is_some()
    }

    /// Returns the number of configured fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.read().map(|fields| fields.len()).unwrap_or(0)
    }

    /// Returns `true` if no field is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SettingsResolver for SettingsRegistry {
    fn resolve(&self, field: &FieldName) -> Result<FieldSettings, SettingsError> {
        let fields = self
            .fields
            .read()
            .map_err(|_| SettingsError::unavailable("fields (read)"))?;
        fields
            .get(field)
            .copied()
            .ok_or_else(|| SettingsError::not_configured(field.clone()))
    }
}
