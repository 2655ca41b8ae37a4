//! # alcheck-base
//!
//! Version-tolerant analyzers and code fixes for AL extension objects.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide        → AnalysisHost: file store, analysis passes, fix application
//!   ↓
//! fixes      → Code actions and syntax-preserving rewrites
//!   ↓
//! analyzers  → Rules and analysis contexts
//!   ↓
//! hir        → Host releases, symbols, diagnostics
//!   ↓
//! compat     → Constant resolution, obsolescence, host symbol traits
//!   ↓
//! syntax     → Document snapshots
//!   ↓
//! parser     → Logos lexer, recursive-descent parser, rowan AST
//!   ↓
//! base       → Primitives (FileId, Location, LineIndex, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → compat → hir → analyzers → fixes → ide)
// ============================================================================

/// Foundation types: FileId, Location, LineIndex, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Syntax: immutable document snapshots
pub mod syntax;

/// Host compatibility: constant resolver, obsolescence classifier
pub mod compat;

/// High-level IR: host releases, symbols, diagnostics
pub mod hir;

/// Analyzer rules and their contexts
pub mod analyzers;

/// Code fixes and code actions
pub mod fixes;

/// Analysis host
pub mod ide;

// Re-export foundation types
pub use base::{FileId, LineIndex, Location, Position, Span, TextRange, TextSize};

pub use compat::{ConstantResolver, EnumValue, ResolveError, ResolvePolicy};
pub use hir::{Diagnostic, HostRelease, Severity};
pub use ide::{AnalysisHost, AnalysisOptions};
pub use syntax::Document;
