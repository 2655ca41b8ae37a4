//! The host's symbol surface as seen by analyzers.
//!
//! Symbols and properties are owned by the host for one analysis pass; the
//! analyzers only read them through these traits. Every enumeration-typed
//! attribute is an [`EnumValue`] in the host's own ordinal space, to be
//! compared against values obtained from the
//! [`ConstantResolver`](super::ConstantResolver).

use std::fmt;

use crate::base::Location;

use super::EnumValue;

/// Boolean symbol attributes that only newer hosts expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolFlag {
    IsObsoleteMoved,
    IsObsoletePendingMove,
}

impl SymbolFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolFlag::IsObsoleteMoved => "IsObsoleteMoved",
            SymbolFlag::IsObsoletePendingMove => "IsObsoletePendingMove",
        }
    }
}

impl fmt::Display for SymbolFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared program entity (object, field, method, variable, ...).
pub trait SymbolHandle: Send + Sync {
    fn name(&self) -> &str;

    /// Member of the host's `SymbolKind` domain.
    fn kind(&self) -> EnumValue;

    /// Member of the host's `ObsoleteStateKind` domain.
    ///
    /// Available on every host release; symbols without an explicit state
    /// report the host's `No` member.
    fn obsolete_state(&self) -> EnumValue;

    /// Probe a flag that may not exist on the loaded host.
    ///
    /// `None` means the host does not expose the flag at all.
    fn probe_flag(&self, flag: SymbolFlag) -> Option<bool>;

    /// The declaration this symbol lives in, if any.
    fn containing_symbol(&self) -> Option<&dyn SymbolHandle>;

    fn location(&self) -> Location;

    /// Member of the host's `FieldClassKind` domain, for field symbols.
    fn field_class(&self) -> Option<EnumValue>;

    /// A property declared on this symbol, by host `PropertyKind`.
    fn property(&self, kind: EnumValue) -> Option<&dyn PropertyHandle>;
}

/// A `Name = Value;` property declared on a symbol.
pub trait PropertyHandle: Send + Sync {
    /// Member of the host's `PropertyKind` domain.
    fn kind(&self) -> EnumValue;

    /// Value text exactly as written.
    fn value_text(&self) -> &str;

    /// `Some` only when the value is a single boolean literal.
    fn bool_value(&self) -> Option<bool>;

    /// Host syntax kinds of the trivia after the property's `;` on its line.
    fn trailing_trivia(&self) -> &[EnumValue];

    fn location(&self) -> Location;
}
