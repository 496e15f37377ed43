//! Access evaluation.
//!
//! [`AccessEvaluator`] turns a subject's grant records into a single
//! permit/deny decision:
//!
//! ```text
//! can_access(subject, op, actor)
//!     │
//!     ├── any record PUBLIC?  ──► host standard permissions decide
//!     │
//!     ├── any record grants op AND its target matches actor?  ──► permit
//!     │       (permissive-OR across records and fields)
//!     │
//!     └── otherwise  ──► permit only the subject's author
//! ```
//!
//! The evaluator is read-only: it never writes to the store, holds no
//! cache, and completes in one bounded pass over the subject's
//! records.

use crate::{AccessError, FieldSettings, GrantRecord, GrantStore, HostAccess, SettingsResolver,
            UserMethod};
use refgrant_types::{AccessOp, Actor, EntityId, EntityKind, Subject};
use std::sync::Arc;

/// Computes effective permissions from per-reference grant records.
///
/// # Collaborators
///
/// | Dependency | Provides |
/// |------------|----------|
/// | [`GrantStore`] | the subject's records, per field |
/// | [`SettingsResolver`] | each field's target kind and user method |
/// | [`HostAccess`] | the standard answer on the public-override path |
///
/// All three are injected; the evaluator has no global lookups.
///
/// # Decision rules
///
/// - A single public record anywhere on the subject defers the whole
///   decision to the host, regardless of every record's custom bits.
/// - Non-public records combine by permissive-OR: any record that
///   grants the operation and whose target matches the actor permits.
///   Adding a record can therefore only widen access.
/// - With no public record and no match, only the subject's author is
///   permitted (the host's documented default when zero custom grants
///   apply).
///
/// # Failures
///
/// Absent grants are not an error — an empty store answer flows into
/// the author fallback. Collaborator failures abort the check with
/// [`AccessError`]; the evaluator never guesses on a broken backend.
pub struct AccessEvaluator {
    store: Arc<dyn GrantStore>,
    settings: Arc<dyn SettingsResolver>,
    host: Arc<dyn HostAccess>,
}

impl AccessEvaluator {
    /// Creates an evaluator over the given collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn GrantStore>,
        settings: Arc<dyn SettingsResolver>,
        host: Arc<dyn HostAccess>,
    ) -> Self {
        Self {
            store,
            settings,
            host,
        }
    }

    /// Decides whether `actor` may perform `op` on `subject`.
    ///
    /// # Errors
    ///
    /// [`AccessError::Settings`] if a grant field of the subject has
    /// no resolvable configuration, [`AccessError::Store`] if the
    /// record store is unreachable.
    pub fn can_access(
        &self,
        subject: &Subject,
        op: AccessOp,
        actor: &Actor,
    ) -> Result<bool, AccessError> {
        let mut fields: Vec<(FieldSettings, Vec<GrantRecord>)> =
            Vec::with_capacity(subject.grant_fields().len());
        for field in subject.grant_fields() {
            let settings = self.settings.resolve(field)?;
            if settings.target_kind() != EntityKind::User
                && settings.user_method() == UserMethod::BackReference
            {
                tracing::debug!(
                    field = %field,
                    kind = %settings.target_kind(),
                    "user_method is only meaningful for user targets; ignoring"
                );
            }
            let records = self.store.list_for(subject.id(), field)?;
            fields.push((settings, records));
        }

        // A single public record is sufficient to defer entirely to
        // the host; custom bits on every record are dead from here.
        if fields
            .iter()
            .any(|(_, records)| records.iter().any(GrantRecord::is_public))
        {
            let allowed = self.host.allows(subject, op, actor);
            if allowed {
                tracing::debug!(
                    subject = %subject,
                    op = %op,
                    actor = %actor,
                    "public override: host permits"
                );
            } else {
                tracing::warn!(
                    subject = %subject,
                    op = %op,
                    actor = %actor,
                    "public override: host denies"
                );
            }
            return Ok(allowed);
        }

        for (settings, records) in &fields {
            for record in records {
                if record.grants(op) && actor_matches(settings, record.target(), actor) {
                    tracing::debug!(
                        subject = %subject,
                        op = %op,
                        actor = %actor,
                        target = %record.target(),
                        kind = %settings.target_kind(),
                        "grant record permits"
                    );
                    return Ok(true);
                }
            }
        }

        let allowed = actor.id() == subject.author();
        if allowed {
            tracing::debug!(
                subject = %subject,
                op = %op,
                actor = %actor,
                "no grant matched: author fallback permits"
            );
        } else {
            tracing::warn!(
                subject = %subject,
                op = %op,
                actor = %actor,
                "no grant matched: denied"
            );
        }
        Ok(allowed)
    }
}

impl std::fmt::Debug for AccessEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessEvaluator").finish_non_exhaustive()
    }
}

/// Checks whether `target` reaches `actor` under the field's settings.
///
/// Identity and membership matching is kind-driven; the one-hop
/// back-reference expansion applies only to user targets on fields
/// configured with [`UserMethod::BackReference`].
fn actor_matches(settings: &FieldSettings, target: EntityId, actor: &Actor) -> bool {
    if actor.is_member(settings.target_kind(), target) {
        return true;
    }
    settings.target_kind() == EntityKind::User
        && settings.user_method() == UserMethod::BackReference
        && actor.references(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GrantFlags, SettingsError, StoreError};
    use refgrant_types::FieldName;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;

    // ─── Test doubles ───────────────────────────────────────────────

    #[derive(Debug, Default)]
    struct TestStore {
        rows: Mutex<HashMap<(EntityId, FieldName), BTreeMap<u32, GrantRecord>>>,
    }

    impl GrantStore for TestStore {
        fn put(
            &self,
            subject: EntityId,
            field: &FieldName,
            delta: u32,
            record: GrantRecord,
        ) -> Result<(), StoreError> {
            let mut rows = self
                .rows
                .lock()
                .map_err(|_| StoreError::lock_poisoned("rows (put)"))?;
            rows.entry((subject, field.clone()))
                .or_default()
                .insert(delta, record);
            Ok(())
        }

        fn list_for(
            &self,
            subject: EntityId,
            field: &FieldName,
        ) -> Result<Vec<GrantRecord>, StoreError> {
            let rows = self
                .rows
                .lock()
                .map_err(|_| StoreError::lock_poisoned("rows (list)"))?;
            Ok(rows
                .get(&(subject, field.clone()))
                .map(|deltas| deltas.values().copied().collect())
                .unwrap_or_default())
        }

        fn delete_all_for(&self, subject: EntityId, field: &FieldName) -> Result<(), StoreError> {
            let mut rows = self
                .rows
                .lock()
                .map_err(|_| StoreError::lock_poisoned("rows (delete)"))?;
            rows.remove(&(subject, field.clone()));
            Ok(())
        }
    }

    /// Store whose reads always fail, for error propagation tests.
    #[derive(Debug)]
    struct BrokenStore;

    impl GrantStore for BrokenStore {
        fn put(
            &self,
            _subject: EntityId,
            _field: &FieldName,
            _delta: u32,
            _record: GrantRecord,
        ) -> Result<(), StoreError> {
            Err(StoreError::write_failed("broken"))
        }

        fn list_for(
            &self,
            _subject: EntityId,
            _field: &FieldName,
        ) -> Result<Vec<GrantRecord>, StoreError> {
            Err(StoreError::unavailable("broken"))
        }

        fn delete_all_for(&self, _subject: EntityId, _field: &FieldName) -> Result<(), StoreError> {
            Err(StoreError::unavailable("broken"))
        }
    }

    struct MapResolver(HashMap<FieldName, FieldSettings>);

    impl MapResolver {
        fn single(field: &str, settings: FieldSettings) -> Self {
            let mut map = HashMap::new();
            map.insert(FieldName::new(field), settings);
            Self(map)
        }
    }

    impl SettingsResolver for MapResolver {
        fn resolve(&self, field: &FieldName) -> Result<FieldSettings, SettingsError> {
            self.0
                .get(field)
                .copied()
                .ok_or_else(|| SettingsError::not_configured(field.clone()))
        }
    }

    /// Host that answers the same for every operation.
    #[derive(Debug)]
    struct StubHost(bool);

    impl HostAccess for StubHost {
        fn allows(&self, _subject: &Subject, _op: AccessOp, _actor: &Actor) -> bool {
            self.0
        }
    }

    const FIELD: &str = "field_members";

    fn evaluator_with(
        store: TestStore,
        settings: FieldSettings,
        host_allows: bool,
    ) -> AccessEvaluator {
        AccessEvaluator::new(
            Arc::new(store),
            Arc::new(MapResolver::single(FIELD, settings)),
            Arc::new(StubHost(host_allows)),
        )
    }

    fn subject() -> Subject {
        Subject::new(EntityId::new(), EntityId::new()).with_grant_field(FIELD)
    }

    // ─── Author fallback ────────────────────────────────────────────

    #[test]
    fn no_grant_fields_permits_author_only() {
        let evaluator = evaluator_with(TestStore::default(), FieldSettings::new(EntityKind::User), true);
        let subject = Subject::new(EntityId::new(), EntityId::new());

        let author = Actor::new(subject.author());
        let stranger = Actor::new(EntityId::new());

        assert!(evaluator.can_access(&subject, AccessOp::View, &author).expect("check"));
        assert!(!evaluator.can_access(&subject, AccessOp::View, &stranger).expect("check"));
    }

    #[test]
    fn zero_records_permits_author_only() {
        let evaluator = evaluator_with(TestStore::default(), FieldSettings::new(EntityKind::User), true);
        let subject = subject();

        let author = Actor::new(subject.author());
        let stranger = Actor::new(EntityId::new());

        for op in AccessOp::ALL {
            assert!(evaluator.can_access(&subject, op, &author).expect("check"));
            assert!(!evaluator.can_access(&subject, op, &stranger).expect("check"));
        }
    }

    #[test]
    fn author_fallback_applies_when_no_record_matches() {
        let store = TestStore::default();
        let subject = subject();
        let field = FieldName::new(FIELD);
        // A grant for some unrelated user.
        store
            .put(subject.id(), &field, 0, GrantRecord::custom(EntityId::new(), GrantFlags::VIEW))
            .expect("put");

        let evaluator = evaluator_with(store, FieldSettings::new(EntityKind::User), false);
        let author = Actor::new(subject.author());

        assert!(evaluator.can_access(&subject, AccessOp::View, &author).expect("check"));
    }

    // ─── Direct user grants ─────────────────────────────────────────

    #[test]
    fn direct_user_grant_scenario() {
        let store = TestStore::default();
        let subject = subject();
        let field = FieldName::new(FIELD);
        let u1 = EntityId::new();
        store
            .put(subject.id(), &field, 0, GrantRecord::custom(u1, GrantFlags::VIEW))
            .expect("put");

        let evaluator = evaluator_with(store, FieldSettings::new(EntityKind::User), false);
        let actor_u1 = Actor::new(u1);
        let actor_u2 = Actor::new(EntityId::new());

        assert!(evaluator.can_access(&subject, AccessOp::View, &actor_u1).expect("check"));
        assert!(!evaluator.can_access(&subject, AccessOp::Update, &actor_u1).expect("check"));
        assert!(!evaluator.can_access(&subject, AccessOp::View, &actor_u2).expect("check"));
    }

    #[test]
    fn records_combine_by_permissive_or() {
        let store = TestStore::default();
        let subject = subject();
        let field = FieldName::new(FIELD);
        let u1 = EntityId::new();
        // Delta 0 does not grant update; delta 1 does.
        store
            .put(subject.id(), &field, 0, GrantRecord::custom(u1, GrantFlags::VIEW))
            .expect("put");
        store
            .put(subject.id(), &field, 1, GrantRecord::custom(u1, GrantFlags::UPDATE))
            .expect("put");

        let evaluator = evaluator_with(store, FieldSettings::new(EntityKind::User), false);
        let actor = Actor::new(u1);

        assert!(evaluator.can_access(&subject, AccessOp::View, &actor).expect("check"));
        assert!(evaluator.can_access(&subject, AccessOp::Update, &actor).expect("check"));
        assert!(!evaluator.can_access(&subject, AccessOp::Delete, &actor).expect("check"));
    }

    // ─── Public override ────────────────────────────────────────────

    #[test]
    fn public_record_defers_to_host() {
        for host_allows in [true, false] {
            let store = TestStore::default();
            let subject = subject();
            let field = FieldName::new(FIELD);
            store
                .put(subject.id(), &field, 0, GrantRecord::public(EntityId::new()))
                .expect("put");

            let evaluator =
                evaluator_with(store, FieldSettings::new(EntityKind::User), host_allows);
            let stranger = Actor::new(EntityId::new());

            assert_eq!(
                evaluator.can_access(&subject, AccessOp::View, &stranger).expect("check"),
                host_allows
            );
        }
    }

    #[test]
    fn public_with_unset_view_still_defers_to_host() {
        // { public: true, view: false } must yield the host answer,
        // not false.
        let store = TestStore::default();
        let subject = subject();
        let field = FieldName::new(FIELD);
        store
            .put(subject.id(), &field, 0, GrantRecord::public(EntityId::new()))
            .expect("put");

        let evaluator = evaluator_with(store, FieldSettings::new(EntityKind::User), true);
        let stranger = Actor::new(EntityId::new());

        assert!(evaluator.can_access(&subject, AccessOp::View, &stranger).expect("check"));
    }

    #[test]
    fn public_record_silences_custom_grants() {
        let store = TestStore::default();
        let subject = subject();
        let field = FieldName::new(FIELD);
        let u1 = EntityId::new();
        store
            .put(subject.id(), &field, 0, GrantRecord::custom(u1, GrantFlags::VIEW))
            .expect("put");
        store
            .put(subject.id(), &field, 1, GrantRecord::public(EntityId::new()))
            .expect("put");

        // Host denies; the view grant at delta 0 must not resurface.
        let evaluator = evaluator_with(store, FieldSettings::new(EntityKind::User), false);
        let actor = Actor::new(u1);

        assert!(!evaluator.can_access(&subject, AccessOp::View, &actor).expect("check"));
    }

    #[test]
    fn mixed_public_and_custom_bits_on_one_record() {
        // PUBLIC|VIEW stored on a single record: still a public
        // record, custom bit ignored.
        let store = TestStore::default();
        let subject = subject();
        let field = FieldName::new(FIELD);
        let u1 = EntityId::new();
        store
            .put(
                subject.id(),
                &field,
                0,
                GrantRecord::custom(u1, GrantFlags::PUBLIC | GrantFlags::VIEW),
            )
            .expect("put");

        let evaluator = evaluator_with(store, FieldSettings::new(EntityKind::User), false);
        let actor = Actor::new(u1);

        assert!(!evaluator.can_access(&subject, AccessOp::View, &actor).expect("check"));
    }

    // ─── Membership kinds ───────────────────────────────────────────

    #[test]
    fn role_grant_matches_role_holders() {
        let store = TestStore::default();
        let subject = subject();
        let field = FieldName::new(FIELD);
        let editors = EntityId::new();
        store
            .put(subject.id(), &field, 0, GrantRecord::custom(editors, GrantFlags::UPDATE))
            .expect("put");

        let evaluator = evaluator_with(store, FieldSettings::new(EntityKind::UserRole), false);
        let holder = Actor::new(EntityId::new()).with_role(editors);
        let outsider = Actor::new(EntityId::new());

        assert!(evaluator.can_access(&subject, AccessOp::Update, &holder).expect("check"));
        assert!(!evaluator.can_access(&subject, AccessOp::Update, &outsider).expect("check"));
    }

    #[test]
    fn term_grant_matches_term_association() {
        let store = TestStore::default();
        let subject = subject();
        let field = FieldName::new(FIELD);
        let term = EntityId::new();
        store
            .put(subject.id(), &field, 0, GrantRecord::custom(term, GrantFlags::VIEW))
            .expect("put");

        let evaluator = evaluator_with(store, FieldSettings::new(EntityKind::TaxonomyTerm), false);
        let tagged = Actor::new(EntityId::new()).with_term(term);

        assert!(evaluator.can_access(&subject, AccessOp::View, &tagged).expect("check"));
    }

    #[test]
    fn node_grant_matches_group_members() {
        let store = TestStore::default();
        let subject = subject();
        let field = FieldName::new(FIELD);
        let group = EntityId::new();
        store
            .put(subject.id(), &field, 0, GrantRecord::custom(group, GrantFlags::DELETE))
            .expect("put");

        let evaluator = evaluator_with(store, FieldSettings::new(EntityKind::Node), false);
        let member = Actor::new(EntityId::new()).with_group(group);

        assert!(evaluator.can_access(&subject, AccessOp::Delete, &member).expect("check"));
        assert!(!evaluator.can_access(&subject, AccessOp::View, &member).expect("check"));
    }

    // ─── Back-reference expansion ───────────────────────────────────

    #[test]
    fn back_reference_expansion_permits_one_hop() {
        let store = TestStore::default();
        let subject = subject();
        let field = FieldName::new(FIELD);
        let direct = EntityId::new();
        store
            .put(subject.id(), &field, 0, GrantRecord::custom(direct, GrantFlags::VIEW))
            .expect("put");

        let settings =
            FieldSettings::new(EntityKind::User).with_user_method(UserMethod::BackReference);
        let evaluator = evaluator_with(store, settings, false);

        // B is not the direct target but references A.
        let b = Actor::new(EntityId::new()).with_referenced_user(direct);
        assert!(evaluator.can_access(&subject, AccessOp::View, &b).expect("check"));
        // The expansion grants only what the record grants.
        assert!(!evaluator.can_access(&subject, AccessOp::Update, &b).expect("check"));
    }

    #[test]
    fn back_reference_requires_ref_user_method() {
        let store = TestStore::default();
        let subject = subject();
        let field = FieldName::new(FIELD);
        let direct = EntityId::new();
        store
            .put(subject.id(), &field, 0, GrantRecord::custom(direct, GrantFlags::VIEW))
            .expect("put");

        // Direct method: referencing the target is not enough.
        let evaluator = evaluator_with(store, FieldSettings::new(EntityKind::User), false);
        let b = Actor::new(EntityId::new()).with_referenced_user(direct);

        assert!(!evaluator.can_access(&subject, AccessOp::View, &b).expect("check"));
    }

    #[test]
    fn user_method_is_ignored_for_non_user_kinds() {
        let store = TestStore::default();
        let subject = subject();
        let field = FieldName::new(FIELD);
        let role = EntityId::new();
        store
            .put(subject.id(), &field, 0, GrantRecord::custom(role, GrantFlags::VIEW))
            .expect("put");

        let settings =
            FieldSettings::new(EntityKind::UserRole).with_user_method(UserMethod::BackReference);
        let evaluator = evaluator_with(store, settings, false);

        // Referencing a role id through the back-reference field means
        // nothing; only holding the role matches.
        let referencing = Actor::new(EntityId::new()).with_referenced_user(role);
        let holder = Actor::new(EntityId::new()).with_role(role);

        assert!(!evaluator.can_access(&subject, AccessOp::View, &referencing).expect("check"));
        assert!(evaluator.can_access(&subject, AccessOp::View, &holder).expect("check"));
    }

    // ─── Multiple fields ────────────────────────────────────────────

    #[test]
    fn grants_aggregate_across_fields() {
        let store = TestStore::default();
        let members = FieldName::new("field_members");
        let editors = FieldName::new("field_editors");
        let subject = Subject::new(EntityId::new(), EntityId::new())
            .with_grant_field(members.clone())
            .with_grant_field(editors.clone());
        let u1 = EntityId::new();
        store
            .put(subject.id(), &editors, 0, GrantRecord::custom(u1, GrantFlags::UPDATE))
            .expect("put");

        let mut map = HashMap::new();
        map.insert(members, FieldSettings::new(EntityKind::UserRole));
        map.insert(editors, FieldSettings::new(EntityKind::User));
        let evaluator = AccessEvaluator::new(
            Arc::new(store),
            Arc::new(MapResolver(map)),
            Arc::new(StubHost(false)),
        );

        let actor = Actor::new(u1);
        assert!(evaluator.can_access(&subject, AccessOp::Update, &actor).expect("check"));
    }

    #[test]
    fn public_record_in_any_field_overrides_all() {
        let store = TestStore::default();
        let members = FieldName::new("field_members");
        let editors = FieldName::new("field_editors");
        let subject = Subject::new(EntityId::new(), EntityId::new())
            .with_grant_field(members.clone())
            .with_grant_field(editors.clone());
        let u1 = EntityId::new();
        store
            .put(subject.id(), &members, 0, GrantRecord::custom(u1, GrantFlags::VIEW))
            .expect("put");
        store
            .put(subject.id(), &editors, 0, GrantRecord::public(EntityId::new()))
            .expect("put");

        let mut map = HashMap::new();
        map.insert(members, FieldSettings::new(EntityKind::User));
        map.insert(editors, FieldSettings::new(EntityKind::User));
        let evaluator = AccessEvaluator::new(
            Arc::new(store),
            Arc::new(MapResolver(map)),
            Arc::new(StubHost(false)),
        );

        // Host denies, so even u1's own view grant is silenced.
        let actor = Actor::new(u1);
        assert!(!evaluator.can_access(&subject, AccessOp::View, &actor).expect("check"));
    }

    // ─── Failure propagation ────────────────────────────────────────

    #[test]
    fn store_failure_surfaces() {
        let evaluator = AccessEvaluator::new(
            Arc::new(BrokenStore),
            Arc::new(MapResolver::single(FIELD, FieldSettings::new(EntityKind::User))),
            Arc::new(StubHost(true)),
        );
        let subject = subject();
        let actor = Actor::new(EntityId::new());

        let err = evaluator
            .can_access(&subject, AccessOp::View, &actor)
            .expect_err("store is broken");
        assert_eq!(err.layer(), "store");
    }

    #[test]
    fn unconfigured_field_surfaces_settings_error() {
        let evaluator = AccessEvaluator::new(
            Arc::new(TestStore::default()),
            Arc::new(MapResolver(HashMap::new())),
            Arc::new(StubHost(true)),
        );
        let subject = subject();
        let actor = Actor::new(EntityId::new());

        let err = evaluator
            .can_access(&subject, AccessOp::View, &actor)
            .expect_err("field is not configured");
        assert_eq!(err.layer(), "settings");
        assert!(err.to_string().contains(FIELD), "got: {err}");
    }
}
