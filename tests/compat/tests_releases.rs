#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use alcheck::compat::{ConstantResolver, ConstantSource, Domain, ObsoleteStates, ResolvePolicy};
use alcheck::hir::HostRelease;
use rstest::rstest;

#[test]
fn test_ordinals_differ_between_releases() {
    let current = HostRelease::Current.lookup(Domain::FieldClassKind, "FlowField").unwrap();
    let legacy = HostRelease::Legacy.lookup(Domain::FieldClassKind, "FlowField").unwrap();
    assert_ne!(current, legacy);
}

#[rstest]
#[case::current(HostRelease::Current)]
#[case::legacy(HostRelease::Legacy)]
fn test_pending_and_removed_resolve_by_name(#[case] release: HostRelease) {
    let resolver = release.shared_resolver(ResolvePolicy::Strict);
    let states = resolver.obsolete_states().unwrap();
    assert_eq!(
        release.name_of(Domain::ObsoleteState, states.pending),
        Some(ObsoleteStates::PENDING)
    );
    assert_eq!(
        release.name_of(Domain::ObsoleteState, states.removed),
        Some(ObsoleteStates::REMOVED)
    );
}

#[test]
fn test_legacy_lacks_move_states() {
    let strict = ConstantResolver::new(Arc::new(HostRelease::Legacy), ResolvePolicy::Strict);
    assert!(!strict.is_defined(Domain::ObsoleteState, ObsoleteStates::MOVED));
    assert!(strict.resolve(Domain::ObsoleteState, ObsoleteStates::PENDING_MOVE).is_err());

    let tolerant = ConstantResolver::new(Arc::new(HostRelease::Legacy), ResolvePolicy::Tolerant);
    let moved = tolerant.resolve(Domain::ObsoleteState, ObsoleteStates::MOVED).unwrap();
    assert!(moved.is_absent());
}

#[test]
fn test_shared_resolver_is_reused() {
    let a = HostRelease::Legacy.shared_resolver(ResolvePolicy::Tolerant);
    let b = HostRelease::Legacy.shared_resolver(ResolvePolicy::Tolerant);
    let c = HostRelease::Current.shared_resolver(ResolvePolicy::Tolerant);
    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
}

#[test]
fn test_concurrent_resolution_agrees() {
    let resolver = Arc::new(ConstantResolver::new(
        Arc::new(HostRelease::Current),
        ResolvePolicy::Strict,
    ));
    let values: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                scope.spawn(move || resolver.field_classes().unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(values.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(resolver.lookups(), 3);
}
