#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use alcheck::compat::{ConstantResolver, ConstantSource, Domain, EnumValue, ResolvePolicy};
use alcheck::hir::{HostRelease, codes};
use alcheck::ide::{AnalysisHost, AnalysisOptions};
use tokio_util::sync::CancellationToken;

use crate::helpers::host_helpers::{analyze, strict};
use crate::helpers::source_fixtures::*;

/// Current release without one trivia kind.
struct WithoutLineComments;

impl ConstantSource for WithoutLineComments {
    fn lookup(&self, domain: Domain, name: &str) -> Option<EnumValue> {
        if domain == Domain::SyntaxKind && name == "LineCommentTrivia" {
            return None;
        }
        HostRelease::Current.lookup(domain, name)
    }
}

fn host_without_line_comments(policy: ResolvePolicy) -> AnalysisHost {
    let resolver = Arc::new(ConstantResolver::new(Arc::new(WithoutLineComments), policy));
    AnalysisHost::with_resolver(AnalysisOptions::default(), resolver)
}

#[test]
fn test_results_are_ordered_across_files() {
    let mut host = AnalysisHost::with_options(strict(HostRelease::Current));
    let a = host.set_file_content("a.al", MIXED_FIELDS);
    let b = host.set_file_content("b.al", MY_CALC_FIELD);

    let result = analyze(&host);
    let files: Vec<_> = result.diagnostics.iter().map(|d| d.file).collect();
    assert_eq!(files, vec![a, a, b]);
    assert_eq!(result.diagnostics_for_file(b).count(), 1);
}

#[test]
fn test_cancelled_pass_yields_nothing() {
    let mut host = AnalysisHost::with_options(strict(HostRelease::Current));
    host.set_file_content("a.al", MIXED_FIELDS);
    let cancel = CancellationToken::new();
    cancel.cancel();
    assert!(host.analyze(&cancel).is_none());
}

#[test]
fn test_strict_missing_constant_becomes_failure() {
    let mut host = host_without_line_comments(ResolvePolicy::Strict);
    let file = host.set_file_content("a.al", MIXED_FIELDS);

    let result = host.analyze(&CancellationToken::new()).unwrap();
    // Quantity declares Editable and needs the trivia kind; Amount does not.
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].message.contains("Amount"));
    assert_eq!(result.failures.len(), 1);

    let failure = &result.failures[0];
    assert_eq!(failure.file, file);
    assert_eq!(failure.symbol, "Quantity");
    assert_eq!(failure.rule, codes::FLOWFIELD_EDITABLE);
    assert!(failure.error.to_string().contains("LineCommentTrivia"));
}

#[test]
fn test_tolerant_missing_constant_under_fires_without_failing() {
    let mut host = host_without_line_comments(ResolvePolicy::Tolerant);
    let file = host.set_file_content(
        "a.al",
        &table_with_fields(&flowfield(1, "Total", "            Editable = true; // kept\n")),
    );

    let result = host.analyze(&CancellationToken::new()).unwrap();
    assert!(result.failures.is_empty());
    // The acknowledgement comment cannot be recognized, so the rule reports.
    assert_eq!(host.diagnostics(file).len(), 1);
}

#[test]
fn test_removed_file_is_not_analyzed() {
    let mut host = AnalysisHost::with_options(strict(HostRelease::Current));
    host.set_file_content("a.al", MIXED_FIELDS);
    host.set_file_content("b.al", MY_CALC_FIELD);
    assert!(host.remove_file("a.al"));

    let result = analyze(&host);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(host.file_count(), 1);
}

#[test]
fn test_updating_content_reanalyzes() {
    let mut host = AnalysisHost::with_options(strict(HostRelease::Current));
    let file = host.set_file_content("a.al", MY_CALC_FIELD);
    assert_eq!(host.diagnostics(file).len(), 1);

    assert_eq!(host.set_file_content("a.al", MY_CALC_FIELD_FIXED), file);
    assert!(host.diagnostics(file).is_empty());
}

#[test]
fn test_syntax_errors_are_reported_separately() {
    let mut host = AnalysisHost::with_options(strict(HostRelease::Current));
    let file = host.set_file_content(
        "a.al",
        "table 50100 T\n{\n    fields\n    {\n        field(1; A Decimal)\n        {\n            FieldClass = FlowField;\n        }\n    }\n}\n",
    );
    let syntax = host.syntax_diagnostics(file);
    assert!(!syntax.is_empty());
    assert!(syntax.iter().all(|d| d.has_code(codes::SYNTAX_ERROR)));
    assert!(analyze(&host).diagnostics.iter().all(|d| !d.has_code(codes::SYNTAX_ERROR)));
}
