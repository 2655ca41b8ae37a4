//! LC0001: FlowFields should not be editable.
//!
//! A FlowField's value is computed from its `CalcFormula`, so letting users
//! edit it is always a mistake. Any line comment after the `Editable`
//! property acknowledges the setting and silences the rule.

use std::sync::Arc;

use super::{RuleDescriptor, SymbolAnalysisContext, SymbolAnalyzer};
use crate::compat::{ConstantResolver, ObsoleteClassifier, ObsoleteScope, ResolveError};
use crate::hir::{Diagnostic, Severity, codes};

pub static DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: codes::FLOWFIELD_EDITABLE,
    title: "FlowFields should not be editable",
    category: "Design",
    default_severity: Severity::Warning,
    description: "FlowFields are calculated from their CalcFormula and should set Editable = false.",
};

pub struct FlowFieldEditable {
    resolver: Arc<ConstantResolver>,
    classifier: ObsoleteClassifier,
    severity: Severity,
}

impl FlowFieldEditable {
    pub fn new(resolver: Arc<ConstantResolver>) -> Self {
        let classifier = ObsoleteClassifier::new(&resolver);
        Self {
            resolver,
            classifier,
            severity: DESCRIPTOR.default_severity,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl SymbolAnalyzer for FlowFieldEditable {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &DESCRIPTOR
    }

    fn analyze_symbol(&self, ctx: &SymbolAnalysisContext<'_>) -> Result<(), ResolveError> {
        if ctx.is_cancelled() || ctx.is_obsolete(&self.classifier) {
            return Ok(());
        }

        let symbol = ctx.symbol();
        if !self.resolver.symbol_kinds()?.field.matches(symbol.kind()) {
            return Ok(());
        }
        let flow_field = self.resolver.field_classes()?.flow_field;
        if !symbol.field_class().is_some_and(|class| flow_field.matches(class)) {
            return Ok(());
        }

        if ctx.is_cancelled() {
            return Ok(());
        }
        let editable_kind = self.resolver.property_kinds()?.editable;
        if let Some(editable) = symbol.property(editable_kind) {
            if editable.bool_value() == Some(false) {
                return Ok(());
            }
            let line_comment = self.resolver.trivia_kinds()?.line_comment;
            if editable
                .trailing_trivia()
                .iter()
                .any(|&kind| line_comment.matches(kind))
            {
                tracing::trace!(field = symbol.name(), "editable flowfield acknowledged by comment");
                return Ok(());
            }
        }

        if ctx.is_cancelled() {
            return Ok(());
        }
        ctx.report(
            Diagnostic::new(
                symbol.location(),
                self.severity,
                format!("FlowField '{}' should not be editable", symbol.name()),
            )
            .with_code(DESCRIPTOR.id),
        );
        Ok(())
    }
}
