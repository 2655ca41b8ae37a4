//! Foundation types for the alcheck toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Identifiers for loaded documents
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`] - Offset to line/column conversion
//! - [`Position`], [`Span`] - Line/column positions for diagnostics
//!
//! This module has NO dependencies on other alcheck modules.

mod position;

pub use position::{LineIndex, Position, Span};

pub use text_size::{TextRange, TextSize};

/// Identifier of a document known to the analysis host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

/// A file plus a byte range inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: FileId,
    pub range: TextRange,
}

impl Location {
    pub fn new(file: FileId, range: TextRange) -> Self {
        Self { file, range }
    }
}
