//! High-level IR (HIR) - the reference host's symbol model.
//!
//! ## Key Types
//!
//! - [`HostRelease`] - Enumeration catalogs of one host version
//! - [`ObjectSymbol`], [`FieldSymbol`], [`PropertySymbol`] - Symbols extracted
//!   from the AST, implementing the [`compat`](crate::compat) traits
//! - [`Diagnostic`] - Findings reported by analyzers
//!
//! ## Layers
//!
//! ```text
//! Document                     ← immutable green tree
//!     │
//!     ▼
//! file_symbols(doc, release)   ← objects + fields, host enum values
//!     │
//!     ▼
//! analyzers                    ← Diagnostic records
//! ```

mod diagnostics;
mod release;
mod symbols;

pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity, codes};
pub use release::HostRelease;
pub use symbols::{FieldSymbol, FileSymbols, ObjectSymbol, PropertySymbol, file_symbols};
