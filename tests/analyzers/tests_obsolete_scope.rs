#![allow(clippy::unwrap_used)]

use alcheck::hir::HostRelease;
use rstest::rstest;

use crate::helpers::host_helpers::{diagnostics_with, strict};
use crate::helpers::source_fixtures::*;

fn field_with_state(state: &str) -> String {
    table_with_fields(&flowfield(
        1,
        "Total",
        &format!("{EDITABLE_TRUE}            ObsoleteState = {state};\n"),
    ))
}

#[rstest]
#[case::not_obsolete("No", 1)]
#[case::pending("Pending", 0)]
#[case::removed("Removed", 0)]
#[case::pending_move("PendingMove", 0)]
#[case::moved("Moved", 0)]
fn test_field_obsolete_state_current(#[case] state: &str, #[case] expected: usize) {
    let diagnostics = diagnostics_with(strict(HostRelease::Current), &field_with_state(state));
    assert_eq!(diagnostics.len(), expected);
}

#[rstest]
#[case::not_obsolete("No", 1)]
#[case::pending("Pending", 0)]
#[case::removed("Removed", 0)]
#[case::pending_move("PendingMove", 0)]
#[case::moved("Moved", 0)]
fn test_containing_table_obsolete_state_current(#[case] state: &str, #[case] expected: usize) {
    let source = obsolete_table_with_fields(state, &flowfield(1, "Total", EDITABLE_TRUE));
    let diagnostics = diagnostics_with(strict(HostRelease::Current), &source);
    assert_eq!(diagnostics.len(), expected);
}

/// The legacy release knows only `Pending` and `Removed`; the newer
/// spellings read as not obsolete there.
#[rstest]
#[case::not_obsolete("No", 1)]
#[case::pending("Pending", 0)]
#[case::removed("Removed", 0)]
#[case::pending_move("PendingMove", 1)]
#[case::moved("Moved", 1)]
fn test_field_obsolete_state_legacy(#[case] state: &str, #[case] expected: usize) {
    let diagnostics = diagnostics_with(strict(HostRelease::Legacy), &field_with_state(state));
    assert_eq!(diagnostics.len(), expected);
}

#[rstest]
#[case::pending("Pending")]
#[case::removed("Removed")]
fn test_containing_table_obsolete_state_legacy(#[case] state: &str) {
    let source = obsolete_table_with_fields(state, &flowfield(1, "Total", EDITABLE_TRUE));
    assert!(diagnostics_with(strict(HostRelease::Legacy), &source).is_empty());
}

#[test]
fn test_obsolete_state_value_is_case_insensitive() {
    let source = field_with_state("pending");
    assert!(diagnostics_with(strict(HostRelease::Current), &source).is_empty());
}
