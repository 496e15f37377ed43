//! Property tests for the resolution laws, over the default backends.

use proptest::prelude::*;
use refgrant_auth::{AccessEvaluator, FieldSettings, GrantFlags, GrantRecord, GrantStore};
use refgrant_store::{FixedHostAccess, MemoryGrantStore, SettingsRegistry};
use refgrant_types::{AccessOp, Actor, EntityId, EntityKind, FieldName, Subject};
use std::sync::Arc;

const FIELD: &str = "field_members";

/// Builds a user-kind evaluator over the given records.
///
/// Each record's target is either the actor (when `at_actor` is true)
/// or an unrelated entity.
fn evaluate(
    records: &[(u8, bool)],
    extra: Option<GrantRecord>,
    op: AccessOp,
    actor: &Actor,
    host_allows: bool,
) -> bool {
    let store = Arc::new(MemoryGrantStore::new());
    let registry = Arc::new(SettingsRegistry::new());
    registry
        .submit(FIELD, FieldSettings::new(EntityKind::User))
        .expect("submit");

    let subject = Subject::new(EntityId::new(), EntityId::new()).with_grant_field(FIELD);
    let field = FieldName::new(FIELD);
    for (delta, (bits, at_actor)) in records.iter().enumerate() {
        let target = if *at_actor { actor.id() } else { EntityId::new() };
        let record = GrantRecord::custom(target, GrantFlags::from_bits_retain(*bits));
        store
            .put(subject.id(), &field, delta as u32, record)
            .expect("put");
    }
    if let Some(record) = extra {
        store
            .put(subject.id(), &field, records.len() as u32, record)
            .expect("put");
    }

    let host = if host_allows {
        FixedHostAccess::allow_all()
    } else {
        FixedHostAccess::deny_all()
    };
    let evaluator = AccessEvaluator::new(store, registry, Arc::new(host));
    evaluator.can_access(&subject, op, actor).expect("check")
}

fn ops() -> impl Strategy<Value = AccessOp> {
    prop::sample::select(AccessOp::ALL.to_vec())
}

proptest! {
    /// Adding one more permitting, non-public record never turns a
    /// permit into a deny.
    #[test]
    fn prop_permissive_or_is_monotone(
        records in prop::collection::vec((any::<u8>(), any::<bool>()), 0..6),
        op in ops(),
        host_allows in any::<bool>(),
    ) {
        let actor = Actor::new(EntityId::new());
        let before = evaluate(&records, None, op, &actor, host_allows);

        let permitting = GrantRecord::custom(actor.id(), GrantFlags::for_op(op));
        let after = evaluate(&records, Some(permitting), op, &actor, host_allows);

        prop_assert!(after || !before, "adding a permitting record flipped permit to deny");
    }

    /// With any public record present, the decision equals the host's
    /// standard answer — whatever the custom bits on any record say.
    #[test]
    fn prop_public_override_matches_host(
        records in prop::collection::vec((any::<u8>(), any::<bool>()), 0..5),
        public_bits in any::<u8>(),
        op in ops(),
        host_allows in any::<bool>(),
    ) {
        let actor = Actor::new(EntityId::new());
        // Force one record public; its other bits are arbitrary.
        let public = GrantRecord::custom(
            EntityId::new(),
            GrantFlags::from_bits_retain(public_bits) | GrantFlags::PUBLIC,
        );
        let result = evaluate(&records, Some(public), op, &actor, host_allows);

        prop_assert_eq!(result, host_allows);
    }

    /// Without records, only the author is permitted.
    #[test]
    fn prop_author_only_without_records(op in ops(), host_allows in any::<bool>()) {
        let stranger = Actor::new(EntityId::new());
        prop_assert!(!evaluate(&[], None, op, &stranger, host_allows));
    }
}
