//! Symbol extraction - the host's symbol model for one document.
//!
//! Symbols are extracted from the typed AST once per document version and
//! hold only owned, thread-safe data so that analyzers can run over them in
//! parallel. All enumeration-typed attributes are values of the document's
//! [`HostRelease`].

use std::sync::Arc;

use smol_str::SmolStr;

use super::release::HostRelease;
use crate::base::{FileId, Location};
use crate::compat::{Domain, EnumValue, PropertyHandle, SymbolFlag, SymbolHandle, TriviaKinds};
use crate::parser::{AstNode, Field, Object, Property, SyntaxKind};
use crate::syntax::Document;

// ============================================================================
// PROPERTIES
// ============================================================================

/// A `Name = Value;` property on an object or field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySymbol {
    pub kind: EnumValue,
    pub name: SmolStr,
    pub value: SmolStr,
    pub bool_value: Option<bool>,
    pub trailing_trivia: Vec<EnumValue>,
    pub location: Location,
}

impl PropertySymbol {
    fn from_ast(file: FileId, property: &Property, release: HostRelease) -> Self {
        let name = property.name_text();
        let value = property.value();
        Self {
            kind: release
                .value_of(Domain::PropertyKind, &name)
                .unwrap_or_default(),
            name: SmolStr::new(&name),
            value: value
                .as_ref()
                .map(|v| SmolStr::new(v.text()))
                .unwrap_or_default(),
            bool_value: value.and_then(|v| v.bool_literal()),
            trailing_trivia: property
                .trailing_trivia()
                .iter()
                .filter_map(|token| trivia_kind(release, token.kind()))
                .collect(),
            location: Location::new(file, property.syntax().text_range()),
        }
    }
}

impl PropertyHandle for PropertySymbol {
    fn kind(&self) -> EnumValue {
        self.kind
    }

    fn value_text(&self) -> &str {
        &self.value
    }

    fn bool_value(&self) -> Option<bool> {
        self.bool_value
    }

    fn trailing_trivia(&self) -> &[EnumValue] {
        &self.trailing_trivia
    }

    fn location(&self) -> Location {
        self.location
    }
}

fn trivia_kind(release: HostRelease, kind: SyntaxKind) -> Option<EnumValue> {
    let name = match kind {
        SyntaxKind::WHITESPACE => TriviaKinds::WHITESPACE,
        SyntaxKind::NEWLINE => TriviaKinds::END_OF_LINE,
        SyntaxKind::LINE_COMMENT => TriviaKinds::LINE_COMMENT,
        SyntaxKind::BLOCK_COMMENT => TriviaKinds::BLOCK_COMMENT,
        _ => return None,
    };
    release.value_of(Domain::SyntaxKind, name)
}

fn find_property(properties: &[PropertySymbol], kind: EnumValue) -> Option<&dyn PropertyHandle> {
    properties
        .iter()
        .find(|p| kind.matches(p.kind))
        .map(|p| p as &dyn PropertyHandle)
}

/// Obsolete state, defaulting to the release's `No` member.
fn obsolete_state(properties: &[PropertySymbol], release: HostRelease) -> EnumValue {
    let declared = release
        .value_of(Domain::PropertyKind, "ObsoleteState")
        .and_then(|kind| properties.iter().find(|p| kind.matches(p.kind)))
        .and_then(|p| release.value_of(Domain::ObsoleteState, &p.value));
    declared
        .or_else(|| release.value_of(Domain::ObsoleteState, "No"))
        .unwrap_or_default()
}

fn probe(release: HostRelease, state: EnumValue, flag: SymbolFlag) -> Option<bool> {
    if !release.supports_flag(flag) {
        return None;
    }
    let expected = match flag {
        SymbolFlag::IsObsoleteMoved => "Moved",
        SymbolFlag::IsObsoletePendingMove => "PendingMove",
    };
    Some(release.name_of(Domain::ObsoleteState, state) == Some(expected))
}

// ============================================================================
// OBJECTS
// ============================================================================

/// A top-level object declaration (`table`, `tableextension`, `page`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSymbol {
    pub name: SmolStr,
    pub object_id: Option<u32>,
    pub kind: EnumValue,
    pub extends: Option<SmolStr>,
    pub obsolete_state: EnumValue,
    pub properties: Vec<PropertySymbol>,
    pub location: Location,
    release: HostRelease,
}

impl ObjectSymbol {
    fn from_ast(file: FileId, object: &Object, release: HostRelease) -> Self {
        let properties: Vec<_> = object
            .properties()
            .map(|p| PropertySymbol::from_ast(file, &p, release))
            .collect();
        let kind = object
            .keyword()
            .and_then(|kw| object_kind_name(kw.kind()))
            .and_then(|name| release.value_of(Domain::SymbolKind, name))
            .unwrap_or_default();
        Self {
            name: object.name().map(|n| SmolStr::new(n.text())).unwrap_or_default(),
            object_id: object.object_id(),
            kind,
            extends: object.extends().map(|n| SmolStr::new(n.text())),
            obsolete_state: obsolete_state(&properties, release),
            properties,
            location: Location::new(file, object.syntax().text_range()),
            release,
        }
    }
}

fn object_kind_name(keyword: SyntaxKind) -> Option<&'static str> {
    Some(match keyword {
        SyntaxKind::TABLE_KW => "Table",
        SyntaxKind::TABLEEXTENSION_KW => "TableExtension",
        SyntaxKind::PAGE_KW => "Page",
        SyntaxKind::PAGEEXTENSION_KW => "PageExtension",
        SyntaxKind::CODEUNIT_KW => "Codeunit",
        SyntaxKind::REPORT_KW => "Report",
        SyntaxKind::QUERY_KW => "Query",
        SyntaxKind::ENUM_KW => "Enum",
        SyntaxKind::ENUMEXTENSION_KW => "EnumExtension",
        _ => return None,
    })
}

impl SymbolHandle for ObjectSymbol {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EnumValue {
        self.kind
    }

    fn obsolete_state(&self) -> EnumValue {
        self.obsolete_state
    }

    fn probe_flag(&self, flag: SymbolFlag) -> Option<bool> {
        probe(self.release, self.obsolete_state, flag)
    }

    fn containing_symbol(&self) -> Option<&dyn SymbolHandle> {
        None
    }

    fn location(&self) -> Location {
        self.location
    }

    fn field_class(&self) -> Option<EnumValue> {
        None
    }

    fn property(&self, kind: EnumValue) -> Option<&dyn PropertyHandle> {
        find_property(&self.properties, kind)
    }
}

// ============================================================================
// FIELDS
// ============================================================================

/// A `field(Id; Name; Type) { ... }` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSymbol {
    pub name: SmolStr,
    pub field_id: Option<u32>,
    pub data_type: SmolStr,
    pub kind: EnumValue,
    pub field_class: EnumValue,
    pub obsolete_state: EnumValue,
    pub properties: Vec<PropertySymbol>,
    /// Range of the whole `FIELD` node.
    pub location: Location,
    pub containing: Arc<ObjectSymbol>,
    release: HostRelease,
}

impl FieldSymbol {
    fn from_ast(
        file: FileId,
        field: &Field,
        containing: &Arc<ObjectSymbol>,
        release: HostRelease,
    ) -> Self {
        let properties: Vec<_> = field
            .properties()
            .map(|p| PropertySymbol::from_ast(file, &p, release))
            .collect();
        let declared_class = release
            .value_of(Domain::PropertyKind, "FieldClass")
            .and_then(|kind| properties.iter().find(|p| kind.matches(p.kind)))
            .and_then(|p| release.value_of(Domain::FieldClassKind, &p.value));
        let field_class = declared_class
            .or_else(|| release.value_of(Domain::FieldClassKind, "Normal"))
            .unwrap_or_default();
        Self {
            name: field.name().map(|n| SmolStr::new(n.text())).unwrap_or_default(),
            field_id: field.field_id(),
            data_type: field.data_type().map(SmolStr::from).unwrap_or_default(),
            kind: release
                .value_of(Domain::SymbolKind, "Field")
                .unwrap_or_default(),
            field_class,
            obsolete_state: obsolete_state(&properties, release),
            properties,
            location: Location::new(file, field.syntax().text_range()),
            containing: Arc::clone(containing),
            release,
        }
    }
}

impl SymbolHandle for FieldSymbol {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EnumValue {
        self.kind
    }

    fn obsolete_state(&self) -> EnumValue {
        self.obsolete_state
    }

    fn probe_flag(&self, flag: SymbolFlag) -> Option<bool> {
        probe(self.release, self.obsolete_state, flag)
    }

    fn containing_symbol(&self) -> Option<&dyn SymbolHandle> {
        Some(&*self.containing as &dyn SymbolHandle)
    }

    fn location(&self) -> Location {
        self.location
    }

    fn field_class(&self) -> Option<EnumValue> {
        Some(self.field_class)
    }

    fn property(&self, kind: EnumValue) -> Option<&dyn PropertyHandle> {
        find_property(&self.properties, kind)
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Everything declared in one document.
#[derive(Debug, Clone, Default)]
pub struct FileSymbols {
    pub objects: Vec<Arc<ObjectSymbol>>,
    pub fields: Vec<FieldSymbol>,
}

impl FileSymbols {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All symbols, objects first, in declaration order within each group.
    pub fn symbols(&self) -> impl Iterator<Item = &dyn SymbolHandle> {
        self.objects
            .iter()
            .map(|o| &**o as &dyn SymbolHandle)
            .chain(self.fields.iter().map(|f| f as &dyn SymbolHandle))
    }
}

/// Extract the symbols of `document` as seen by `release`.
pub fn file_symbols(document: &Document, release: HostRelease) -> FileSymbols {
    let file = document.file();
    let mut symbols = FileSymbols::default();
    let Some(source) = document.source_file() else {
        return symbols;
    };

    for object in source.objects() {
        let object_symbol = Arc::new(ObjectSymbol::from_ast(file, &object, release));
        symbols.fields.extend(
            object
                .fields()
                .map(|field| FieldSymbol::from_ast(file, &field, &object_symbol, release)),
        );
        symbols.objects.push(object_symbol);
    }

    tracing::trace!(
        file = file.index(),
        objects = symbols.objects.len(),
        fields = symbols.fields.len(),
        "extracted symbols"
    );
    symbols
}
