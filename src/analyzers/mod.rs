//! Analyzers - rules evaluated over host symbols.
//!
//! Analyzers read symbols only through the [`compat`](crate::compat) traits
//! and obtain every host enumeration value from a shared
//! [`ConstantResolver`](crate::compat::ConstantResolver).

pub mod context;
pub mod flowfield_editable;

pub use context::{
    CodeBlockAnalysisContext, DiagnosticSink, OperationAnalysisContext, SymbolAnalysisContext,
    SyntaxNodeAnalysisContext,
};
pub use flowfield_editable::FlowFieldEditable;

use crate::compat::ResolveError;
use crate::hir::Severity;

/// Static description of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescriptor {
    /// Stable rule id, also used to match code fixes.
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub default_severity: Severity,
    pub description: &'static str,
}

/// A rule invoked once per declared symbol.
pub trait SymbolAnalyzer: Send + Sync {
    fn descriptor(&self) -> &'static RuleDescriptor;

    /// Evaluate one symbol.
    ///
    /// Only strict-mode resolution failures are returned; everything else is
    /// handled inside the rule.
    fn analyze_symbol(&self, ctx: &SymbolAnalysisContext<'_>) -> Result<(), ResolveError>;
}
