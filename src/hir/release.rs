//! Host release catalogs.
//!
//! Each [`HostRelease`] ships its own enumeration tables. Members are only
//! ever looked up by name; the position of a name in its table is the
//! ordinal that release hands out, and ordinals deliberately differ between
//! releases.

use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::compat::{ConstantResolver, ConstantSource, Domain, EnumValue, ResolvePolicy, SymbolFlag};

/// A version of the host compiler's symbol model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HostRelease {
    /// Obsolescence limited to `Pending` and `Removed`.
    Legacy,
    /// Adds `PendingMove`/`Moved` and the matching symbol flags.
    #[default]
    Current,
}

// ============================================================================
// CATALOGS
// ============================================================================

const LEGACY_FIELD_CLASSES: &[&str] = &["Normal", "FlowField", "FlowFilter"];
const CURRENT_FIELD_CLASSES: &[&str] = &["Undefined", "Normal", "FlowFilter", "FlowField"];

const LEGACY_PROPERTY_KINDS: &[&str] = &[
    "Caption",
    "CalcFormula",
    "DataClassification",
    "Editable",
    "FieldClass",
    "ObsoleteReason",
    "ObsoleteState",
    "ObsoleteTag",
    "TableRelation",
];
const CURRENT_PROPERTY_KINDS: &[&str] = &[
    "AllowInCustomizations",
    "AutoFormatType",
    "Caption",
    "CalcFormula",
    "DataClassification",
    "Editable",
    "FieldClass",
    "ObsoleteReason",
    "ObsoleteState",
    "ObsoleteTag",
    "TableRelation",
];

const LEGACY_SYMBOL_KINDS: &[&str] = &[
    "Codeunit",
    "Field",
    "Method",
    "Page",
    "PageExtension",
    "Query",
    "Report",
    "Table",
    "TableExtension",
    "Variable",
    "Enum",
    "EnumExtension",
];
const CURRENT_SYMBOL_KINDS: &[&str] = &[
    "Undefined",
    "Table",
    "TableExtension",
    "Page",
    "PageExtension",
    "Codeunit",
    "Report",
    "Query",
    "Enum",
    "EnumExtension",
    "PermissionSet",
    "Field",
    "Method",
    "Variable",
];

const LEGACY_TRIVIA: &[&str] = &[
    "WhiteSpaceTrivia",
    "EndOfLineTrivia",
    "LineCommentTrivia",
    "BlockCommentTrivia",
];
const CURRENT_TRIVIA: &[&str] = &[
    "EndOfLineTrivia",
    "WhiteSpaceTrivia",
    "SingleLineDocumentationCommentTrivia",
    "LineCommentTrivia",
    "BlockCommentTrivia",
];

const LEGACY_OBSOLETE_STATES: &[&str] = &["No", "Pending", "Removed"];
const CURRENT_OBSOLETE_STATES: &[&str] = &["No", "Pending", "Removed", "PendingMove", "Moved"];

/// Resolvers shared by every analysis host in the process.
static SHARED_RESOLVERS: LazyLock<Mutex<FxHashMap<(HostRelease, ResolvePolicy), Arc<ConstantResolver>>>> =
    LazyLock::new(|| Mutex::new(FxHashMap::default()));

impl HostRelease {
    pub fn as_str(self) -> &'static str {
        match self {
            HostRelease::Legacy => "legacy",
            HostRelease::Current => "current",
        }
    }

    /// The members of `domain`, in ordinal order.
    pub fn members(self, domain: Domain) -> &'static [&'static str] {
        match (self, domain) {
            (HostRelease::Legacy, Domain::FieldClassKind) => LEGACY_FIELD_CLASSES,
            (HostRelease::Legacy, Domain::PropertyKind) => LEGACY_PROPERTY_KINDS,
            (HostRelease::Legacy, Domain::SymbolKind) => LEGACY_SYMBOL_KINDS,
            (HostRelease::Legacy, Domain::SyntaxKind) => LEGACY_TRIVIA,
            (HostRelease::Legacy, Domain::ObsoleteState) => LEGACY_OBSOLETE_STATES,
            (HostRelease::Current, Domain::FieldClassKind) => CURRENT_FIELD_CLASSES,
            (HostRelease::Current, Domain::PropertyKind) => CURRENT_PROPERTY_KINDS,
            (HostRelease::Current, Domain::SymbolKind) => CURRENT_SYMBOL_KINDS,
            (HostRelease::Current, Domain::SyntaxKind) => CURRENT_TRIVIA,
            (HostRelease::Current, Domain::ObsoleteState) => CURRENT_OBSOLETE_STATES,
        }
    }

    /// Value of the member spelled `text` in source, ignoring case.
    ///
    /// The host's own view of source text; analyzers never call this.
    pub fn value_of(self, domain: Domain, text: &str) -> Option<EnumValue> {
        self.members(domain)
            .iter()
            .position(|member| member.eq_ignore_ascii_case(text))
            .map(|idx| EnumValue::new(idx as u16))
    }

    /// Canonical member name for a value of this release.
    pub fn name_of(self, domain: Domain, value: EnumValue) -> Option<&'static str> {
        self.members(domain).get(usize::from(value.raw())).copied()
    }

    pub fn supports_flag(self, flag: SymbolFlag) -> bool {
        match flag {
            SymbolFlag::IsObsoleteMoved | SymbolFlag::IsObsoletePendingMove => {
                self == HostRelease::Current
            }
        }
    }

    /// Process-wide resolver for this release and policy.
    pub fn shared_resolver(self, policy: ResolvePolicy) -> Arc<ConstantResolver> {
        let mut resolvers = SHARED_RESOLVERS.lock();
        let resolver = resolvers.entry((self, policy)).or_insert_with(|| {
            tracing::debug!(release = self.as_str(), ?policy, "creating shared constant resolver");
            Arc::new(ConstantResolver::new(Arc::new(self), policy))
        });
        Arc::clone(resolver)
    }
}

impl ConstantSource for HostRelease {
    fn lookup(&self, domain: Domain, name: &str) -> Option<EnumValue> {
        self.members(domain)
            .iter()
            .position(|member| *member == name)
            .map(|idx| EnumValue::new(idx as u16))
    }
}
