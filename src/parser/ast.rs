//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for AL syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens().filter_map(|e| e.into_token())
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn objects(&self) -> impl Iterator<Item = Object> + '_ {
        self.0.children().filter_map(Object::cast)
    }
}

// ============================================================================
// Objects
// ============================================================================

ast_node!(Object, OBJECT);

impl Object {
    /// The object keyword (`table`, `page`, ...)
    pub fn keyword(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind().is_object_keyword())
    }

    pub fn object_id(&self) -> Option<u32> {
        tokens(&self.0)
            .find(|t| t.kind() == SyntaxKind::INTEGER)
            .and_then(|t| t.text().parse().ok())
    }

    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }

    pub fn extends(&self) -> Option<Name> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::EXTENDS_CLAUSE)
            .and_then(|clause| clause.children().find_map(Name::cast))
    }

    pub fn body(&self) -> Option<ObjectBody> {
        self.0.children().find_map(ObjectBody::cast)
    }

    /// Object-level properties (`ObsoleteState = Pending;`, ...)
    pub fn properties(&self) -> impl Iterator<Item = Property> + use<> {
        self.body()
            .into_iter()
            .flat_map(|body| body.0.children().filter_map(Property::cast).collect::<Vec<_>>())
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + use<> {
        self.body().into_iter().flat_map(|body| {
            body.0
                .children()
                .filter_map(FieldsSection::cast)
                .flat_map(|section| section.fields().collect::<Vec<_>>())
                .collect::<Vec<_>>()
        })
    }
}

ast_node!(ObjectBody, OBJECT_BODY);

ast_node!(Name, NAME);

impl Name {
    /// Identifier text with the quotes of a quoted identifier removed
    pub fn text(&self) -> String {
        let raw = self.0.text().to_string();
        raw.strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .map(str::to_string)
            .unwrap_or(raw)
    }
}

// ============================================================================
// Fields
// ============================================================================

ast_node!(FieldsSection, FIELDS_SECTION);

impl FieldsSection {
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.children().filter_map(Field::cast)
    }
}

ast_node!(Field, FIELD);

impl Field {
    pub fn field_id(&self) -> Option<u32> {
        tokens(&self.0)
            .find(|t| t.kind() == SyntaxKind::INTEGER)
            .and_then(|t| t.text().parse().ok())
    }

    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }

    pub fn data_type(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::DATA_TYPE)
            .map(|n| n.text().to_string())
    }

    pub fn property_list(&self) -> Option<PropertyList> {
        self.0.children().find_map(PropertyList::cast)
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + use<> {
        self.property_list()
            .into_iter()
            .flat_map(|list| list.properties().collect::<Vec<_>>())
    }

    /// First property whose name matches case-insensitively
    pub fn property(&self, name: &str) -> Option<Property> {
        self.properties().find(|p| p.is_named(name))
    }

    /// The object declaring this field
    pub fn object(&self) -> Option<Object> {
        self.0.ancestors().find_map(Object::cast)
    }
}

ast_node!(PropertyList, PROPERTY_LIST);

impl PropertyList {
    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.0.children().filter_map(Property::cast)
    }

    pub fn r_brace(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::R_BRACE)
    }
}

// ============================================================================
// Properties
// ============================================================================

ast_node!(Property, PROPERTY);

impl Property {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| !t.kind().is_trivia())
    }

    pub fn name_text(&self) -> String {
        self.name_token()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name_token()
            .is_some_and(|t| t.text().eq_ignore_ascii_case(name))
    }

    pub fn value(&self) -> Option<PropertyValue> {
        self.0.children().find_map(PropertyValue::cast)
    }

    /// Trivia after the terminating `;` on the same line
    pub fn trailing_trivia(&self) -> Vec<SyntaxToken> {
        tokens(&self.0)
            .skip_while(|t| t.kind() != SyntaxKind::SEMICOLON)
            .skip(1)
            .filter(|t| t.kind().is_trivia())
            .collect()
    }
}

ast_node!(PropertyValue, PROPERTY_VALUE);

impl PropertyValue {
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }

    /// `Some` only when the value is a single boolean literal
    pub fn bool_literal(&self) -> Option<bool> {
        let mut significant = self
            .0
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia());
        let first = significant.next()?;
        if significant.next().is_some() {
            return None;
        }
        match first.kind() {
            SyntaxKind::TRUE_KW => Some(true),
            SyntaxKind::FALSE_KW => Some(false),
            _ => None,
        }
    }
}
