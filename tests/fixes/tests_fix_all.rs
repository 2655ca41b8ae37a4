#![allow(clippy::unwrap_used)]

use alcheck::fixes::{FixAllScope, flowfield_editable::EQUIVALENCE_KEY};
use alcheck::hir::HostRelease;
use alcheck::ide::AnalysisHost;
use tokio_util::sync::CancellationToken;

use crate::helpers::host_helpers::{analyze, host_from_source, strict};
use crate::helpers::source_fixtures::*;

const MIXED_FIELDS_FIXED: &str = r#"table 50100 Totals
{
    fields
    {
        field(1; Amount; Decimal)
        {
            FieldClass = FlowField;
            CalcFormula = sum("Ledger Entry".Amount);
            Editable = false;
        }
        field(2; Plain; Decimal)
        {
            Editable = true;
        }
        field(3; Quantity; Decimal)
        {
            FieldClass = FlowField;
            Editable = false;
        }
        field(4; Filter; Date)
        {
            FieldClass = FlowFilter;
        }
        field(5; Compliant; Decimal)
        {
            FieldClass = FlowField;
            Editable = false;
        }
    }
}
"#;

#[test]
fn test_fix_all_in_document() {
    let (mut host, file) = host_from_source(MIXED_FIELDS);
    let changed = host
        .fix_all(FixAllScope::Document, file, EQUIVALENCE_KEY, &CancellationToken::new())
        .unwrap();
    assert_eq!(changed, 1);
    assert_eq!(host.text(file).unwrap(), MIXED_FIELDS_FIXED);
    assert!(analyze(&host).diagnostics.is_empty());
}

#[test]
fn test_fix_all_twice_changes_nothing() {
    let (mut host, file) = host_from_source(MIXED_FIELDS);
    let cancel = CancellationToken::new();
    host.fix_all(FixAllScope::Document, file, EQUIVALENCE_KEY, &cancel);
    let changed = host
        .fix_all(FixAllScope::Document, file, EQUIVALENCE_KEY, &cancel)
        .unwrap();
    assert_eq!(changed, 0);
    assert_eq!(host.text(file).unwrap(), MIXED_FIELDS_FIXED);
}

#[test]
fn test_document_scope_leaves_other_files() {
    let mut host = AnalysisHost::with_options(strict(HostRelease::Current));
    let a = host.set_file_content("a.al", MIXED_FIELDS);
    let b = host.set_file_content("b.al", MY_CALC_FIELD);

    host.fix_all(FixAllScope::Document, a, EQUIVALENCE_KEY, &CancellationToken::new());
    assert_eq!(host.text(a).unwrap(), MIXED_FIELDS_FIXED);
    assert_eq!(host.text(b).unwrap(), MY_CALC_FIELD);
}

#[test]
fn test_fix_all_in_workspace() {
    let mut host = AnalysisHost::with_options(strict(HostRelease::Current));
    let a = host.set_file_content("a.al", MIXED_FIELDS);
    let b = host.set_file_content("b.al", MY_CALC_FIELD);
    let c = host.set_file_content("c.al", MY_CALC_FIELD_FIXED);

    let changed = host
        .fix_all(FixAllScope::Workspace, a, EQUIVALENCE_KEY, &CancellationToken::new())
        .unwrap();
    assert_eq!(changed, 2);
    assert_eq!(host.text(a).unwrap(), MIXED_FIELDS_FIXED);
    assert_eq!(host.text(b).unwrap(), MY_CALC_FIELD_FIXED);
    assert_eq!(host.text(c).unwrap(), MY_CALC_FIELD_FIXED);
}

#[test]
fn test_cancelled_fix_all_stores_nothing() {
    let mut host = AnalysisHost::with_options(strict(HostRelease::Current));
    let a = host.set_file_content("a.al", MIXED_FIELDS);
    let b = host.set_file_content("b.al", MY_CALC_FIELD);

    let cancel = CancellationToken::new();
    cancel.cancel();
    assert_eq!(host.fix_all(FixAllScope::Workspace, a, EQUIVALENCE_KEY, &cancel), None);
    assert_eq!(host.text(a).unwrap(), MIXED_FIELDS);
    assert_eq!(host.text(b).unwrap(), MY_CALC_FIELD);
}

#[test]
fn test_unknown_equivalence_key_changes_nothing() {
    let (mut host, file) = host_from_source(MIXED_FIELDS);
    let changed = host
        .fix_all(FixAllScope::Document, file, "LC9999.Other", &CancellationToken::new())
        .unwrap();
    assert_eq!(changed, 0);
    assert_eq!(host.text(file).unwrap(), MIXED_FIELDS);
}
