//! IDE layer - the analysis host that clients drive.
//!
//! This module ties documents, symbols, analyzers and fixes together behind
//! one owner of mutable state.
//!
//! ## Design Principles
//!
//! 1. **Snapshots**: documents are immutable; edits swap in new versions
//! 2. **Cancellable**: every pass and fix takes a `CancellationToken`
//! 3. **Host-agnostic rules**: analyzers see only the compat traits
//!
//! ## Usage
//!
//! ```ignore
//! use alcheck::ide::{AnalysisHost, AnalysisOptions};
//!
//! let mut host = AnalysisHost::with_options(AnalysisOptions::default());
//! let file = host.set_file_content("Item.Table.al", text);
//! let diagnostics = host.diagnostics(file);
//! ```

mod analysis;
mod options;

pub use analysis::{AnalysisFailure, AnalysisHost, AnalysisResult};
pub use options::AnalysisOptions;
