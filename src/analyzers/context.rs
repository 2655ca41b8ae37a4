//! Analysis contexts handed to analyzer callbacks.
//!
//! The host invokes analyzers through four callback shapes. Each context
//! carries the symbol whose declaration is being analyzed, a cancellation
//! token and a diagnostic sink, and implements [`ObsoleteScope`] so every
//! entry point applies the same direct and containment obsolescence check.

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::compat::{ObsoleteScope, SymbolHandle};
use crate::hir::{Diagnostic, DiagnosticCollector};
use crate::parser::SyntaxNode;

/// Where analyzers report findings.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Mutex<Vec<Diagnostic>> {
    fn report(&self, diagnostic: Diagnostic) {
        self.lock().push(diagnostic);
    }
}

impl DiagnosticSink for Mutex<DiagnosticCollector> {
    fn report(&self, diagnostic: Diagnostic) {
        self.lock().add(diagnostic);
    }
}

macro_rules! analysis_context {
    (
        $(#[$meta:meta])*
        $name:ident, $scope:ident { $($field:ident : $ty:ty),* $(,)? }
    ) => {
        $(#[$meta])*
        pub struct $name<'a> {
            $scope: &'a dyn SymbolHandle,
            $($field: $ty,)*
            cancel: &'a CancellationToken,
            sink: &'a dyn DiagnosticSink,
        }

        impl<'a> $name<'a> {
            pub fn new(
                $scope: &'a dyn SymbolHandle,
                $($field: $ty,)*
                cancel: &'a CancellationToken,
                sink: &'a dyn DiagnosticSink,
            ) -> Self {
                Self { $scope, $($field,)* cancel, sink }
            }

            pub fn $scope(&self) -> &'a dyn SymbolHandle {
                self.$scope
            }

            pub fn cancellation_token(&self) -> &CancellationToken {
                self.cancel
            }

            pub fn is_cancelled(&self) -> bool {
                self.cancel.is_cancelled()
            }

            pub fn report(&self, diagnostic: Diagnostic) {
                self.sink.report(diagnostic);
            }
        }

        impl ObsoleteScope for $name<'_> {
            fn scope_symbol(&self) -> Option<&dyn SymbolHandle> {
                Some(self.$scope)
            }
        }
    };
}

analysis_context!(
    /// Invoked once per declared symbol.
    SymbolAnalysisContext, symbol {}
);

analysis_context!(
    /// Invoked per syntax node inside a declaration.
    SyntaxNodeAnalysisContext, containing_symbol { node: SyntaxNode }
);

analysis_context!(
    /// Invoked per code block (trigger or procedure body).
    CodeBlockAnalysisContext, owning_symbol { block: SyntaxNode }
);

analysis_context!(
    /// Invoked per operation inside a code block.
    OperationAnalysisContext, containing_symbol { operation: SyntaxNode }
);

impl SyntaxNodeAnalysisContext<'_> {
    pub fn node(&self) -> &SyntaxNode {
        &self.node
    }
}

impl CodeBlockAnalysisContext<'_> {
    pub fn block(&self) -> &SyntaxNode {
        &self.block
    }
}

impl OperationAnalysisContext<'_> {
    pub fn operation(&self) -> &SyntaxNode {
        &self.operation
    }
}
