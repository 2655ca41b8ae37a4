//! Diagnostics - analyzer findings and syntax errors.
//!
//! Diagnostics are immutable records addressed by [`FileId`] and byte range.
//! Line/column positions are derived on demand through a
//! [`LineIndex`](crate::base::LineIndex) so that records stay cheap to
//! produce from parallel analysis threads.

use std::sync::Arc;

use crate::base::{FileId, LineIndex, Location, Span, TextRange};
use crate::parser::SyntaxError;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file containing this diagnostic.
    pub file: FileId,
    /// Byte range the diagnostic is anchored at.
    pub range: TextRange,
    /// Severity level.
    pub severity: Severity,
    /// Rule or error code (e.g., "LC0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
}

impl Diagnostic {
    pub fn new(location: Location, severity: Severity, message: impl Into<Arc<str>>) -> Self {
        Self {
            file: location.file,
            range: location.range,
            severity,
            code: None,
            message: message.into(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(location: Location, message: impl Into<Arc<str>>) -> Self {
        Self::new(location, Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(location: Location, message: impl Into<Arc<str>>) -> Self {
        Self::new(location, Severity::Warning, message)
    }

    /// Error diagnostic for a parse error.
    pub fn syntax(file: FileId, error: &SyntaxError) -> Self {
        Self::error(Location::new(file, error.range), error.message.as_str())
            .with_code(codes::SYNTAX_ERROR)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn location(&self) -> Location {
        Location::new(self.file, self.range)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }

    /// Line/column span of the anchor.
    pub fn span(&self, index: &LineIndex) -> Span {
        index.span(self.range)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes.
///
/// - **E0001-E0099**: Front-end errors
/// - **LC0001-LC9999**: Analyzer rules
pub mod codes {
    /// Source text could not be parsed.
    pub const SYNTAX_ERROR: &str = "E0001";

    /// FlowFields should not be editable.
    pub const FLOWFIELD_EDITABLE: &str = "LC0001";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during an analysis pass.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get diagnostics for a specific file.
    pub fn diagnostics_for_file(&self, file: FileId) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.file == file).collect()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Diagnostics in file/offset order with exact duplicates removed.
    ///
    /// Parallel passes report in nondeterministic order; this is the stable
    /// form handed to callers.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by(|a, b| {
            (a.file, a.range.start(), a.range.end(), &a.code)
                .cmp(&(b.file, b.range.start(), b.range.end(), &b.code))
        });
        self.diagnostics.dedup();
        self.diagnostics
    }
}
