//! Analysis host helpers.

use alcheck::base::FileId;
use alcheck::hir::{Diagnostic, HostRelease};
use alcheck::ide::{AnalysisHost, AnalysisOptions, AnalysisResult};
use alcheck::ResolvePolicy;
use tokio_util::sync::CancellationToken;

/// Options for a strict host of `release`.
pub fn strict(release: HostRelease) -> AnalysisOptions {
    AnalysisOptions::default()
        .with_release(release)
        .with_resolve_policy(ResolvePolicy::Strict)
}

/// Creates a strict host on the current release with a single file.
pub fn host_from_source(source: &str) -> (AnalysisHost, FileId) {
    host_from_source_with(strict(HostRelease::Current), source)
}

/// Creates a host with a single file, asserting it parses cleanly.
pub fn host_from_source_with(options: AnalysisOptions, source: &str) -> (AnalysisHost, FileId) {
    let mut host = AnalysisHost::with_options(options);
    let file = host.set_file_content("test.al", source);
    let errors = host.syntax_diagnostics(file);
    assert!(errors.is_empty(), "Parse errors: {errors:?}");
    (host, file)
}

/// Run a full pass, failing the test on cancellation or rule failures.
pub fn analyze(host: &AnalysisHost) -> AnalysisResult {
    let result = host
        .analyze(&CancellationToken::new())
        .expect("pass was not cancelled");
    assert!(result.failures.is_empty(), "Rule failures: {:?}", result.failures);
    result
}

/// LC0001 diagnostics for a source on the current release.
pub fn diagnostics_from_source(source: &str) -> Vec<Diagnostic> {
    diagnostics_with(strict(HostRelease::Current), source)
}

pub fn diagnostics_with(options: AnalysisOptions, source: &str) -> Vec<Diagnostic> {
    let (host, _) = host_from_source_with(options, source);
    analyze(&host).diagnostics
}

/// Apply the first action of the only diagnostic and return the new text.
pub fn fix_once(source: &str) -> String {
    let (mut host, file) = host_from_source(source);
    let diagnostics = analyze(&host).diagnostics;
    assert_eq!(diagnostics.len(), 1, "Expected one diagnostic: {diagnostics:?}");
    let actions = host.code_actions(&diagnostics[0]);
    assert_eq!(actions.len(), 1);
    assert!(host.apply_code_action(&actions[0], &CancellationToken::new()));
    host.text(file).expect("file present")
}
