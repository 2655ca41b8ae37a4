//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! It covers the object/field/property subset of AL that the analyzers read.

/// All syntax kinds (tokens and nodes) for AL objects
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (objects, fields, property lists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    NEWLINE,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,        // MyField
    QUOTED_IDENT, // "My Field"
    INTEGER,      // 42
    DECIMAL,      // 3.14
    STRING,       // 'text'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,     // {
    R_BRACE,     // }
    L_BRACKET,   // [
    R_BRACKET,   // ]
    L_PAREN,     // (
    R_PAREN,     // )
    SEMICOLON,   // ;
    COLON,       // :
    COLON_COLON, // ::
    COLON_EQ,    // :=
    COMMA,       // ,
    DOT,         // .
    DOT_DOT,     // ..
    EQ,          // =
    LT,          // <
    GT,          // >
    LT_EQ,       // <=
    GT_EQ,       // >=
    LT_GT,       // <>
    PLUS,        // +
    MINUS,       // -
    STAR,        // *
    SLASH,       // /

    // =========================================================================
    // KEYWORDS (case-insensitive in source)
    // =========================================================================
    TABLE_KW,
    TABLEEXTENSION_KW,
    PAGE_KW,
    PAGEEXTENSION_KW,
    CODEUNIT_KW,
    REPORT_KW,
    QUERY_KW,
    ENUM_KW,
    ENUMEXTENSION_KW,
    EXTENDS_KW,
    FIELDS_KW,
    FIELD_KW,
    TRUE_KW,
    FALSE_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    OBJECT,
    NAME,
    EXTENDS_CLAUSE,
    OBJECT_BODY,
    FIELDS_SECTION,
    FIELD,
    DATA_TYPE,
    PROPERTY_LIST,
    PROPERTY,
    PROPERTY_VALUE,
    /// Members the analyzers do not inspect (keys, triggers, procedures, ...)
    SECTION,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, newline or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::NEWLINE | Self::LINE_COMMENT | Self::BLOCK_COMMENT
        )
    }

    /// Check if this is a comment token
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::TABLE_KW as u16) && (self as u16) <= (Self::FALSE_KW as u16)
    }

    /// Check if this token starts an object declaration
    pub fn is_object_keyword(self) -> bool {
        (self as u16) >= (Self::TABLE_KW as u16) && (self as u16) <= (Self::ENUMEXTENSION_KW as u16)
    }

    /// Tokens that may be used where a plain identifier is expected
    pub fn is_ident_like(self) -> bool {
        matches!(self, Self::IDENT | Self::QUOTED_IDENT) || self.is_keyword()
    }

    /// Map identifier text to a keyword kind (AL keywords are case-insensitive)
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text.to_ascii_lowercase().as_str() {
            "table" => Self::TABLE_KW,
            "tableextension" => Self::TABLEEXTENSION_KW,
            "page" => Self::PAGE_KW,
            "pageextension" => Self::PAGEEXTENSION_KW,
            "codeunit" => Self::CODEUNIT_KW,
            "report" => Self::REPORT_KW,
            "query" => Self::QUERY_KW,
            "enum" => Self::ENUM_KW,
            "enumextension" => Self::ENUMEXTENSION_KW,
            "extends" => Self::EXTENDS_KW,
            "fields" => Self::FIELDS_KW,
            "field" => Self::FIELD_KW,
            "true" => Self::TRUE_KW,
            "false" => Self::FALSE_KW,
            _ => return None,
        };
        Some(kind)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlLanguage {}

impl rowan::Language for AlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<AlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<AlLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<AlLanguage>;
