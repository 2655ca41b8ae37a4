//! In-memory host doubles for unit tests.

use std::sync::Arc;

use crate::base::{FileId, Location, TextRange, TextSize};
use crate::compat::resolver::{ConstantResolver, ConstantSource, Domain, EnumValue, ResolvePolicy};
use crate::compat::symbol::{PropertyHandle, SymbolFlag, SymbolHandle};

/// Enumeration table of a fake host; ordinals are positions within a domain
/// shifted by `base` so that two hosts never agree on them.
pub(crate) struct TableSource {
    base: u16,
    members: Vec<(Domain, &'static str)>,
}

impl ConstantSource for TableSource {
    fn lookup(&self, domain: Domain, name: &str) -> Option<EnumValue> {
        self.members
            .iter()
            .filter(|(d, _)| *d == domain)
            .position(|(_, n)| *n == name)
            .map(|idx| EnumValue::new(self.base + idx as u16))
    }
}

pub(crate) struct FakeHost {
    source: Arc<TableSource>,
    has_move_flags: bool,
}

impl FakeHost {
    pub(crate) fn current() -> Self {
        let mut members = common_members();
        members.extend(
            ["No", "Pending", "Removed", "PendingMove", "Moved"]
                .map(|n| (Domain::ObsoleteState, n)),
        );
        Self {
            source: Arc::new(TableSource { base: 0, members }),
            has_move_flags: true,
        }
    }

    pub(crate) fn legacy() -> Self {
        let mut members = common_members();
        members.reverse();
        members.extend(["No", "Pending", "Removed"].map(|n| (Domain::ObsoleteState, n)));
        Self {
            source: Arc::new(TableSource { base: 100, members }),
            has_move_flags: false,
        }
    }

    pub(crate) fn without_obsolete_states() -> Self {
        Self {
            source: Arc::new(TableSource {
                base: 200,
                members: common_members(),
            }),
            has_move_flags: false,
        }
    }

    /// The same host with one member removed.
    pub(crate) fn without(self, domain: Domain, name: &str) -> Self {
        let mut members = self.source.members.clone();
        members.retain(|(d, n)| !(*d == domain && *n == name));
        Self {
            source: Arc::new(TableSource {
                base: self.source.base,
                members,
            }),
            has_move_flags: self.has_move_flags,
        }
    }

    pub(crate) fn resolver(&self, policy: ResolvePolicy) -> ConstantResolver {
        ConstantResolver::new(self.source.clone(), policy)
    }

    pub(crate) fn value(&self, domain: Domain, name: &str) -> EnumValue {
        self.source.lookup(domain, name).unwrap_or_default()
    }

    pub(crate) fn symbol_kind(&self, name: &str) -> EnumValue {
        self.value(Domain::SymbolKind, name)
    }

    pub(crate) fn line_comment(&self) -> EnumValue {
        self.value(Domain::SyntaxKind, "LineCommentTrivia")
    }

    pub(crate) fn whitespace(&self) -> EnumValue {
        self.value(Domain::SyntaxKind, "WhiteSpaceTrivia")
    }

    pub(crate) fn table(&self, name: &str) -> FakeSymbol {
        let mut symbol = FakeSymbol::new(name, self.symbol_kind("Table"));
        symbol.state = self.value(Domain::ObsoleteState, "No");
        symbol.flags = self.has_move_flags.then_some([false, false]);
        symbol
    }

    pub(crate) fn field(&self, name: &str, class: &str) -> FakeSymbol {
        let mut symbol = self.table(name);
        symbol.kind = self.symbol_kind("Field");
        symbol.field_class = Some(self.value(Domain::FieldClassKind, class));
        symbol
    }

    pub(crate) fn flow_field(&self, name: &str) -> FakeSymbol {
        self.field(name, "FlowField")
    }

    pub(crate) fn property(&self, name: &str, value: &str) -> FakeProperty {
        FakeProperty::new(self.value(Domain::PropertyKind, name), value)
    }
}

fn common_members() -> Vec<(Domain, &'static str)> {
    let mut members = Vec::new();
    members.extend(["Normal", "FlowField", "FlowFilter"].map(|n| (Domain::FieldClassKind, n)));
    members.extend(
        ["Caption", "Editable", "FieldClass", "ObsoleteState"].map(|n| (Domain::PropertyKind, n)),
    );
    members.extend(["Field", "Table", "TableExtension", "Page"].map(|n| (Domain::SymbolKind, n)));
    members.extend(
        [
            "WhiteSpaceTrivia",
            "EndOfLineTrivia",
            "LineCommentTrivia",
            "BlockCommentTrivia",
        ]
        .map(|n| (Domain::SyntaxKind, n)),
    );
    members
}

fn location() -> Location {
    Location::new(FileId::new(0), TextRange::empty(TextSize::new(0)))
}

pub(crate) struct FakeSymbol {
    name: String,
    kind: EnumValue,
    state: EnumValue,
    flags: Option<[bool; 2]>,
    containing: Option<Box<FakeSymbol>>,
    field_class: Option<EnumValue>,
    properties: Vec<FakeProperty>,
    location: Location,
}

impl FakeSymbol {
    pub(crate) fn new(name: &str, kind: EnumValue) -> Self {
        Self {
            name: name.to_string(),
            kind,
            state: EnumValue::ABSENT,
            flags: None,
            containing: None,
            field_class: None,
            properties: Vec::new(),
            location: location(),
        }
    }

    pub(crate) fn with_state(mut self, host: &FakeHost, state: &str) -> Self {
        self.state = host.value(Domain::ObsoleteState, state);
        if let Some(flags) = self.flags.as_mut() {
            *flags = [state == "Moved", state == "PendingMove"];
        }
        self
    }

    pub(crate) fn contained_in(mut self, parent: FakeSymbol) -> Self {
        self.containing = Some(Box::new(parent));
        self
    }

    pub(crate) fn with_property(mut self, property: FakeProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub(crate) fn at(mut self, range: TextRange) -> Self {
        self.location = Location::new(self.location.file, range);
        self
    }
}

impl SymbolHandle for FakeSymbol {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EnumValue {
        self.kind
    }

    fn obsolete_state(&self) -> EnumValue {
        self.state
    }

    fn probe_flag(&self, flag: SymbolFlag) -> Option<bool> {
        let [moved, pending_move] = self.flags?;
        Some(match flag {
            SymbolFlag::IsObsoleteMoved => moved,
            SymbolFlag::IsObsoletePendingMove => pending_move,
        })
    }

    fn containing_symbol(&self) -> Option<&dyn SymbolHandle> {
        self.containing.as_deref().map(|s| s as &dyn SymbolHandle)
    }

    fn location(&self) -> Location {
        self.location
    }

    fn field_class(&self) -> Option<EnumValue> {
        self.field_class
    }

    fn property(&self, kind: EnumValue) -> Option<&dyn PropertyHandle> {
        self.properties
            .iter()
            .find(|p| kind.matches(p.kind))
            .map(|p| p as &dyn PropertyHandle)
    }
}

pub(crate) struct FakeProperty {
    kind: EnumValue,
    value: String,
    trivia: Vec<EnumValue>,
}

impl FakeProperty {
    pub(crate) fn new(kind: EnumValue, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            trivia: Vec::new(),
        }
    }

    pub(crate) fn with_trivia(mut self, trivia: Vec<EnumValue>) -> Self {
        self.trivia = trivia;
        self
    }
}

impl PropertyHandle for FakeProperty {
    fn kind(&self) -> EnumValue {
        self.kind
    }

    fn value_text(&self) -> &str {
        &self.value
    }

    fn bool_value(&self) -> Option<bool> {
        match self.value.to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    fn trailing_trivia(&self) -> &[EnumValue] {
        &self.trivia
    }

    fn location(&self) -> Location {
        location()
    }
}
