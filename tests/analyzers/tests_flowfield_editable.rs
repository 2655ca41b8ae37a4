#![allow(clippy::unwrap_used)]

use alcheck::hir::{HostRelease, Severity, codes};
use alcheck::ide::AnalysisOptions;
use rstest::rstest;

use crate::helpers::host_helpers::{
    diagnostics_from_source, diagnostics_with, host_from_source, strict,
};
use crate::helpers::source_fixtures::*;

#[test]
fn test_editable_flowfield_reported_at_field() {
    let (host, file) = host_from_source(MY_CALC_FIELD);
    let diagnostics = host.diagnostics(file);
    assert_eq!(diagnostics.len(), 1);

    let diagnostic = &diagnostics[0];
    assert!(diagnostic.has_code(codes::FLOWFIELD_EDITABLE));
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert!(diagnostic.message.contains("MyCalcField"));

    let start = MY_CALC_FIELD.find("field(2").unwrap();
    let end = MY_CALC_FIELD.find("        }\n    }").unwrap() + "        }".len();
    assert_eq!(usize::from(diagnostic.range.start()), start);
    assert_eq!(usize::from(diagnostic.range.end()), end);

    let span = host.span(diagnostic).unwrap();
    assert_eq!((span.start.line, span.start.column), (5, 8));
    assert_eq!((span.end.line, span.end.column), (9, 9));
}

#[test]
fn test_moved_flowfield_not_reported() {
    assert!(diagnostics_from_source(MY_CALC_FIELD_MOVED).is_empty());
}

#[rstest]
#[case::editable_true(EDITABLE_TRUE, 1)]
#[case::no_editable_property("", 1)]
#[case::editable_false("            Editable = false;\n", 0)]
#[case::editable_false_any_case("            editable = FALSE;\n", 0)]
#[case::non_literal_value("            Editable = IsEditable;\n", 1)]
#[case::line_comment("            Editable = true; // needed by the journal page\n", 0)]
#[case::block_comment("            Editable = true; /* why */\n", 1)]
#[case::comment_on_next_line("            Editable = true;\n            // unrelated\n", 1)]
fn test_flowfield_editable_property(#[case] extra: &str, #[case] expected: usize) {
    let source = table_with_fields(&flowfield(1, "Total", extra));
    assert_eq!(diagnostics_from_source(&source).len(), expected, "{source}");
}

#[rstest]
#[case::normal("Normal")]
#[case::flow_filter("FlowFilter")]
fn test_non_flowfield_classes_not_reported(#[case] class: &str) {
    let source = table_with_fields(&format!(
        "        field(1; F; Date)\n        {{\n            FieldClass = {class};\n            Editable = true;\n        }}\n"
    ));
    assert!(diagnostics_from_source(&source).is_empty());
}

#[test]
fn test_field_without_field_class_is_normal() {
    let source = table_with_fields("        field(1; F; Decimal) { Editable = true; }\n");
    assert!(diagnostics_from_source(&source).is_empty());
}

#[test]
fn test_only_offending_fields_reported() {
    let diagnostics = diagnostics_from_source(MIXED_FIELDS);
    let names: Vec<_> = diagnostics
        .iter()
        .map(|d| d.message.to_string())
        .collect();
    assert_eq!(diagnostics.len(), 2, "{names:?}");
    assert!(names[0].contains("Amount"));
    assert!(names[1].contains("Quantity"));
}

#[test]
fn test_table_extension_fields_are_checked() {
    let source = format!(
        "tableextension 50101 CustExt extends Customer\n{{\n    fields\n    {{\n{}    }}\n}}\n",
        flowfield(50100, "Balance", EDITABLE_TRUE)
    );
    assert_eq!(diagnostics_from_source(&source).len(), 1);
}

#[test]
fn test_severity_override() {
    let options = strict(HostRelease::Current).with_flowfield_editable_severity(Severity::Error);
    let diagnostics = diagnostics_with(options, MY_CALC_FIELD);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
}

#[rstest]
#[case::current(HostRelease::Current)]
#[case::legacy(HostRelease::Legacy)]
fn test_rule_fires_on_both_releases(#[case] release: HostRelease) {
    assert_eq!(diagnostics_with(strict(release), MY_CALC_FIELD).len(), 1);
}

#[test]
fn test_tolerant_current_release_matches_strict() {
    let tolerant = AnalysisOptions::default().with_resolve_policy(alcheck::ResolvePolicy::Tolerant);
    assert_eq!(
        diagnostics_with(tolerant, MIXED_FIELDS),
        diagnostics_from_source(MIXED_FIELDS)
    );
}
