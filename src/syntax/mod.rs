//! Versioned document snapshots.
//!
//! Sits between the parser and everything that edits or analyzes trees, so
//! code fixes can work on documents without depending on the analysis host.

pub mod file;

pub use file::Document;
