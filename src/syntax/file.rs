//! Document snapshots for parsed AL files.
//!
//! A [`Document`] pairs a [`FileId`] with the green tree of one version of a
//! file. Green trees are immutable and `Send + Sync`, so documents can be
//! shared across analysis threads and handed to code fixes; every edit
//! produces a new document instead of mutating the old one.

use std::fmt;

use crate::base::{FileId, LineIndex};
use crate::parser::{AstNode, GreenNode, Parse, SourceFile, SyntaxError, SyntaxNode, parse};

/// An immutable snapshot of one parsed file.
#[derive(Clone, PartialEq, Eq)]
pub struct Document {
    file: FileId,
    green: GreenNode,
    errors: Vec<SyntaxError>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("file", &self.file)
            .field("len", &self.green.text_len())
            .field("errors", &self.errors.len())
            .finish()
    }
}

impl Document {
    /// Parse `text` into a new document.
    pub fn parse(file: FileId, text: &str) -> Self {
        Self::from_parse(file, parse(text))
    }

    pub fn from_parse(file: FileId, parse: Parse) -> Self {
        Self {
            file,
            green: parse.green,
            errors: parse.errors,
        }
    }

    /// A new version of this document with a rewritten tree.
    ///
    /// The text of `green` is parsed again, so the stored tree and errors
    /// always describe the new text rather than the splice that produced it.
    pub fn with_green(&self, green: GreenNode) -> Self {
        let text = SyntaxNode::new_root(green).to_string();
        Self::parse(self.file, &text)
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// A fresh red tree over the snapshot.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn source_file(&self) -> Option<SourceFile> {
        SourceFile::cast(self.syntax())
    }

    /// The full text of the document, reconstructed from the tree.
    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }

    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.text())
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
