//! Code fixes - syntax-preserving rewrites for analyzer diagnostics.
//!
//! Fix providers never mutate trees. Each action maps a [`Document`]
//! snapshot to a new one built by splicing replacement green nodes into the
//! original root, so every byte outside the edited node is kept.

pub mod code_action;
pub mod flowfield_editable;

pub use code_action::{ActionCapabilities, CodeAction, FIX_ALL_TITLE, SUPPORTS_FIX_ALL, SettingValue};
pub use flowfield_editable::{FixOutcome, FlowFieldEditableFix, StaleReason, fix_editable};

use tokio_util::sync::CancellationToken;

use crate::hir::Diagnostic;
use crate::syntax::Document;

/// What a fix provider is asked to act on.
#[derive(Debug, Clone, Copy)]
pub struct CodeFixContext<'a> {
    pub document: &'a Document,
    pub diagnostic: &'a Diagnostic,
    pub capabilities: &'a ActionCapabilities,
}

/// Offers code actions for diagnostics with matching ids.
pub trait CodeFixProvider: Send + Sync {
    /// Rule ids this provider can fix.
    fn fixable_diagnostic_ids(&self) -> &'static [&'static str];

    fn can_fix(&self, diagnostic: &Diagnostic) -> bool {
        self.fixable_diagnostic_ids()
            .iter()
            .any(|id| diagnostic.has_code(id))
    }

    fn register_code_fixes(&self, ctx: &CodeFixContext<'_>) -> Vec<CodeAction>;

    fn fix_all_provider(&self) -> Option<FixAllProvider> {
        None
    }
}

/// Reach of a fix-all batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixAllScope {
    Document,
    Workspace,
}

/// Applies every equivalent action of a batch in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixAllProvider {
    equivalence_key: &'static str,
    scopes: &'static [FixAllScope],
}

impl FixAllProvider {
    /// Batch fixer over actions sharing `equivalence_key`.
    pub fn batch(equivalence_key: &'static str) -> Self {
        Self {
            equivalence_key,
            scopes: &[FixAllScope::Document, FixAllScope::Workspace],
        }
    }

    pub fn equivalence_key(&self) -> &'static str {
        self.equivalence_key
    }

    pub fn supported_scopes(&self) -> &'static [FixAllScope] {
        self.scopes
    }

    pub fn supports(&self, scope: FixAllScope) -> bool {
        self.scopes.contains(&scope)
    }

    /// Apply the matching actions for one document.
    ///
    /// Actions run from the last anchor to the first so that each rewrite
    /// leaves the offsets of the remaining anchors intact. A cancelled batch
    /// returns the document unchanged.
    pub fn fix_document(
        &self,
        document: &Document,
        actions: &[CodeAction],
        cancel: &CancellationToken,
    ) -> Document {
        let mut batch: Vec<_> = actions
            .iter()
            .filter(|a| a.equivalence_key == self.equivalence_key)
            .filter(|a| a.diagnostic.file == document.file())
            .collect();
        batch.sort_by_key(|a| std::cmp::Reverse(a.diagnostic.range.start()));

        let mut fixed = document.clone();
        for action in batch {
            if cancel.is_cancelled() {
                tracing::debug!(file = document.file().index(), "fix-all cancelled");
                return document.clone();
            }
            fixed = action.apply(&fixed, cancel);
        }
        if cancel.is_cancelled() {
            return document.clone();
        }
        fixed
    }
}
