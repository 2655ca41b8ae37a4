//! AnalysisHost - owns documents and drives analyzers and fixes.
//!
//! The host keeps one immutable [`Document`] per file together with the
//! symbols extracted from it. Analysis passes borrow those snapshots, fan out
//! over symbols on the rayon pool and funnel findings into a shared collector.
//! Fixes never touch stored documents directly; they produce new snapshots
//! that the host swaps in.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! let file = host.set_file_content("Customer.Table.al", text);
//!
//! let cancel = CancellationToken::new();
//! let result = host.analyze(&cancel).unwrap_or_default();
//! for diagnostic in &result.diagnostics {
//!     for action in host.code_actions(diagnostic) {
//!         host.apply_code_action(&action, &cancel);
//!     }
//! }
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use crate::analyzers::{FlowFieldEditable, SymbolAnalysisContext, SymbolAnalyzer};
use crate::base::{FileId, Span};
use crate::compat::{ConstantResolver, ResolveError, SymbolHandle};
use crate::fixes::{
    ActionCapabilities, CodeAction, CodeFixContext, CodeFixProvider, FixAllScope,
    FlowFieldEditableFix,
};
use crate::hir::{Diagnostic, DiagnosticCollector, FileSymbols, file_symbols};
use crate::syntax::Document;

use super::AnalysisOptions;

/// A rule that could not be evaluated for one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisFailure {
    pub file: FileId,
    pub symbol: SmolStr,
    pub rule: &'static str,
    pub error: ResolveError,
}

/// Outcome of a completed analysis pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Sorted by file and anchor, without duplicates
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<AnalysisFailure>,
}

impl AnalysisResult {
    pub fn diagnostics_for_file(&self, file: FileId) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.file == file)
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.failures.is_empty()
    }
}

/// One stored file.
struct FileEntry {
    path: SmolStr,
    document: Document,
    symbols: FileSymbols,
}

/// Owns all mutable state for analysis and fixing.
pub struct AnalysisHost {
    options: AnalysisOptions,
    resolver: Arc<ConstantResolver>,
    analyzers: Vec<Box<dyn SymbolAnalyzer>>,
    fixers: Vec<Box<dyn CodeFixProvider>>,
    capabilities: ActionCapabilities,
    /// Documents in insertion order
    files: IndexMap<FileId, FileEntry>,
    /// Map from file path to FileId
    file_id_map: FxHashMap<SmolStr, FileId>,
    next_file_id: u32,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// Create a host with default options.
    pub fn new() -> Self {
        Self::with_options(AnalysisOptions::default())
    }

    /// Create a host backed by the shared resolver of the configured release.
    pub fn with_options(options: AnalysisOptions) -> Self {
        let resolver = options.release.shared_resolver(options.resolve_policy);
        Self::with_resolver(options, resolver)
    }

    /// Create a host with an explicit resolver.
    ///
    /// Symbols are still extracted against `options.release`; the resolver
    /// decides which constants the rules can see.
    pub fn with_resolver(options: AnalysisOptions, resolver: Arc<ConstantResolver>) -> Self {
        let mut editable = FlowFieldEditable::new(Arc::clone(&resolver));
        if let Some(severity) = options.flowfield_editable_severity {
            editable = editable.with_severity(severity);
        }
        let fix = FlowFieldEditableFix::new(&resolver).with_indent_unit(&options.indent_unit());

        Self {
            options,
            resolver,
            analyzers: vec![Box::new(editable)],
            fixers: vec![Box::new(fix)],
            capabilities: ActionCapabilities::all(),
            files: IndexMap::new(),
            file_id_map: FxHashMap::default(),
            next_file_id: 0,
        }
    }

    /// Restrict the optional action settings the client understands.
    pub fn with_capabilities(mut self, capabilities: ActionCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn resolver(&self) -> &Arc<ConstantResolver> {
        &self.resolver
    }

    // ==================== Files ====================

    /// Set the content of a file, parsing it and extracting its symbols.
    ///
    /// A path keeps its FileId across updates.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> FileId {
        let file = match self.file_id_map.get(path) {
            Some(&file) => file,
            None => {
                let file = FileId::new(self.next_file_id);
                self.next_file_id += 1;
                self.file_id_map.insert(SmolStr::new(path), file);
                file
            }
        };

        let document = Document::parse(file, content);
        if document.has_errors() {
            tracing::debug!(path, errors = document.errors().len(), "parsed with errors");
        }
        self.store(SmolStr::new(path), document);
        file
    }

    fn store(&mut self, path: SmolStr, document: Document) {
        let symbols = file_symbols(&document, self.options.release);
        self.files.insert(
            document.file(),
            FileEntry {
                path,
                document,
                symbols,
            },
        );
    }

    /// Remove a file. Returns whether it was present.
    pub fn remove_file(&mut self, path: &str) -> bool {
        let Some(file) = self.file_id_map.remove(path) else {
            return false;
        };
        self.files.shift_remove(&file).is_some()
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.file_id_map.contains_key(path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Get the FileId for a path, if it exists.
    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.file_id_map.get(path).copied()
    }

    /// Get the path for a FileId, if it exists.
    pub fn file_path(&self, file: FileId) -> Option<&str> {
        self.files.get(&file).map(|entry| entry.path.as_str())
    }

    pub fn document(&self, file: FileId) -> Option<&Document> {
        self.files.get(&file).map(|entry| &entry.document)
    }

    pub fn symbols(&self, file: FileId) -> Option<&FileSymbols> {
        self.files.get(&file).map(|entry| &entry.symbols)
    }

    /// Current text of a file.
    pub fn text(&self, file: FileId) -> Option<String> {
        self.document(file).map(Document::text)
    }

    /// Parse errors of a file as diagnostics.
    pub fn syntax_diagnostics(&self, file: FileId) -> Vec<Diagnostic> {
        self.document(file)
            .map(|doc| {
                doc.errors()
                    .iter()
                    .map(|err| Diagnostic::syntax(file, err))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Line/column span of a diagnostic anchor.
    pub fn span(&self, diagnostic: &Diagnostic) -> Option<Span> {
        self.document(diagnostic.file)
            .map(|doc| diagnostic.span(&doc.line_index()))
    }

    // ==================== Analysis ====================

    /// Run every analyzer over every symbol of every file.
    ///
    /// Returns `None` if the pass was cancelled.
    pub fn analyze(&self, cancel: &CancellationToken) -> Option<AnalysisResult> {
        self.run(self.files.values(), cancel)
    }

    /// Run every analyzer over the symbols of one file.
    ///
    /// Returns `None` if the pass was cancelled. An unknown file yields an
    /// empty result.
    pub fn analyze_file(&self, file: FileId, cancel: &CancellationToken) -> Option<AnalysisResult> {
        self.run(self.files.get(&file).into_iter(), cancel)
    }

    /// Diagnostics for one file from an uncancellable pass.
    pub fn diagnostics(&self, file: FileId) -> Vec<Diagnostic> {
        self.analyze_file(file, &CancellationToken::new())
            .map(|result| result.diagnostics)
            .unwrap_or_default()
    }

    fn run<'a>(
        &'a self,
        entries: impl Iterator<Item = &'a FileEntry>,
        cancel: &CancellationToken,
    ) -> Option<AnalysisResult> {
        let work: Vec<(FileId, &dyn SymbolHandle)> = entries
            .flat_map(|entry| {
                let file = entry.document.file();
                entry.symbols.symbols().map(move |symbol| (file, symbol))
            })
            .collect();

        let sink = Mutex::new(DiagnosticCollector::new());
        let failures = Mutex::new(Vec::new());

        let visit = |&(file, symbol): &(FileId, &dyn SymbolHandle)| {
            if cancel.is_cancelled() {
                return;
            }
            let ctx = SymbolAnalysisContext::new(symbol, cancel, &sink);
            for analyzer in &self.analyzers {
                if let Err(error) = analyzer.analyze_symbol(&ctx) {
                    let rule = analyzer.descriptor().id;
                    tracing::error!(
                        file = file.index(),
                        symbol = symbol.name(),
                        rule,
                        %error,
                        "analyzer failed"
                    );
                    failures.lock().push(AnalysisFailure {
                        file,
                        symbol: SmolStr::new(symbol.name()),
                        rule,
                        error,
                    });
                }
            }
        };

        if self.options.parallel {
            work.par_iter().for_each(visit);
        } else {
            work.iter().for_each(visit);
        }

        if cancel.is_cancelled() {
            tracing::debug!(symbols = work.len(), "analysis cancelled");
            return None;
        }

        let mut failures = failures.into_inner();
        failures.sort_by(|a, b| (a.file, &a.symbol).cmp(&(b.file, &b.symbol)));
        Some(AnalysisResult {
            diagnostics: sink.into_inner().finish(),
            failures,
        })
    }

    // ==================== Fixes ====================

    /// Code actions offered for a diagnostic.
    pub fn code_actions(&self, diagnostic: &Diagnostic) -> Vec<CodeAction> {
        let Some(document) = self.document(diagnostic.file) else {
            return Vec::new();
        };
        let ctx = CodeFixContext {
            document,
            diagnostic,
            capabilities: &self.capabilities,
        };
        self.fixers
            .iter()
            .filter(|fixer| fixer.can_fix(diagnostic))
            .flat_map(|fixer| fixer.register_code_fixes(&ctx))
            .collect()
    }

    /// Apply one action to the current version of its file.
    ///
    /// Returns whether the document changed.
    pub fn apply_code_action(&mut self, action: &CodeAction, cancel: &CancellationToken) -> bool {
        let file = action.diagnostic.file;
        let Some(entry) = self.files.get(&file) else {
            return false;
        };
        let fixed = action.apply(&entry.document, cancel);
        if fixed == entry.document || cancel.is_cancelled() {
            return false;
        }
        let path = entry.path.clone();
        self.store(path, fixed);
        true
    }

    /// Apply every fix sharing `equivalence_key` within `scope`.
    ///
    /// `file` selects the document for [`FixAllScope::Document`] and is
    /// ignored for the workspace scope. Nothing is stored unless the whole
    /// batch completes; returns the number of documents changed, or `None`
    /// if cancelled.
    pub fn fix_all(
        &mut self,
        scope: FixAllScope,
        file: FileId,
        equivalence_key: &str,
        cancel: &CancellationToken,
    ) -> Option<usize> {
        let targets: Vec<FileId> = match scope {
            FixAllScope::Document => self
                .files
                .contains_key(&file)
                .then_some(file)
                .into_iter()
                .collect(),
            FixAllScope::Workspace => self.files.keys().copied().collect(),
        };

        let mut fixed = Vec::new();
        for target in targets {
            let result = self.analyze_file(target, cancel)?;
            let actions: Vec<CodeAction> = result
                .diagnostics
                .iter()
                .flat_map(|d| self.code_actions(d))
                .filter(|a| a.equivalence_key == equivalence_key && a.supports_fix_all())
                .collect();
            if actions.is_empty() {
                continue;
            }

            let Some(entry) = self.files.get(&target) else {
                continue;
            };
            let mut document = entry.document.clone();
            for provider in self.fixers.iter().filter_map(|f| f.fix_all_provider()) {
                if provider.equivalence_key() == equivalence_key && provider.supports(scope) {
                    document = provider.fix_document(&document, &actions, cancel);
                }
            }
            if cancel.is_cancelled() {
                return None;
            }
            if document != entry.document {
                fixed.push((entry.path.clone(), document));
            }
        }

        let changed = fixed.len();
        for (path, document) in fixed {
            self.store(path, document);
        }
        tracing::debug!(?scope, equivalence_key, changed, "fix-all applied");
        Some(changed)
    }
}
