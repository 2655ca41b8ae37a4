//! Constant resolution against the host's evolving enumerations.
//!
//! Host releases add, remove and reorder enumeration members, so the only
//! stable identity of a member is its name. Every value the analyzers compare
//! against (field classes, property kinds, symbol kinds, trivia kinds,
//! obsolete states) goes through [`ConstantResolver`], which looks each
//! `(domain, name)` pair up once and caches the result for the lifetime of
//! the resolver.
//!
//! Two policies decide what happens when the loaded host lacks a name:
//!
//! - [`ResolvePolicy::Strict`] returns [`ResolveError::MissingConstant`] so a
//!   breaking host change shows up immediately during development.
//! - [`ResolvePolicy::Tolerant`] returns [`EnumValue::ABSENT`], which never
//!   matches a value handed out by the host, so rules silently stop firing on
//!   the affected condition instead of failing the analysis run.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use thiserror::Error;

// ============================================================================
// VALUES AND KEYS
// ============================================================================

/// Runtime representation of a host enumeration member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue(u16);

impl EnumValue {
    /// Sentinel for "not available on this host".
    pub const ABSENT: EnumValue = EnumValue(u16::MAX);

    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    pub fn is_absent(self) -> bool {
        self == Self::ABSENT
    }

    /// Equality that never holds when either side is absent.
    pub fn matches(self, other: EnumValue) -> bool {
        !self.is_absent() && self == other
    }
}

impl Default for EnumValue {
    fn default() -> Self {
        Self::ABSENT
    }
}

/// Logical enumeration domains exposed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    FieldClassKind,
    PropertyKind,
    SymbolKind,
    SyntaxKind,
    ObsoleteState,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::FieldClassKind => "FieldClassKind",
            Domain::PropertyKind => "PropertyKind",
            Domain::SymbolKind => "SymbolKind",
            Domain::SyntaxKind => "SyntaxKind",
            Domain::ObsoleteState => "ObsoleteStateKind",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a named constant within a domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstantKey {
    pub domain: Domain,
    pub name: SmolStr,
}

impl ConstantKey {
    pub fn new(domain: Domain, name: &str) -> Self {
        Self {
            domain,
            name: SmolStr::new(name),
        }
    }
}

/// The host side of the resolution: the enumerations of the loaded release.
pub trait ConstantSource: Send + Sync {
    /// Look up a member of `domain` by its exact name.
    fn lookup(&self, domain: Domain, name: &str) -> Option<EnumValue>;
}

// ============================================================================
// POLICY AND ERRORS
// ============================================================================

/// What to do when a name is missing from the loaded host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvePolicy {
    Strict,
    Tolerant,
}

impl ResolvePolicy {
    /// Strict in debug builds, tolerant in release builds.
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) {
            ResolvePolicy::Strict
        } else {
            ResolvePolicy::Tolerant
        }
    }
}

impl Default for ResolvePolicy {
    fn default() -> Self {
        Self::for_build()
    }
}

/// Errors surfaced by strict resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The loaded host does not define the constant.
    #[error("constant '{name}' is not defined in {domain} of the loaded host")]
    MissingConstant { domain: Domain, name: SmolStr },
}

impl ResolveError {
    pub fn missing(domain: Domain, name: &str) -> Self {
        Self::MissingConstant {
            domain,
            name: SmolStr::new(name),
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

type ResolvedConstant = Arc<OnceLock<Option<EnumValue>>>;

/// Name-keyed, lazily populated cache over a [`ConstantSource`].
///
/// The map lock is only held long enough to fetch or insert the per-key
/// cell; the lookup itself runs inside [`OnceLock::get_or_init`], so callers
/// of the same key share one lookup and callers of different keys never wait
/// on each other.
pub struct ConstantResolver {
    source: Arc<dyn ConstantSource>,
    policy: ResolvePolicy,
    cache: RwLock<FxHashMap<ConstantKey, ResolvedConstant>>,
    lookups: AtomicUsize,
}

impl fmt::Debug for ConstantResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstantResolver")
            .field("policy", &self.policy)
            .field("cached", &self.cache.read().len())
            .field("lookups", &self.lookups())
            .finish()
    }
}

impl ConstantResolver {
    pub fn new(source: Arc<dyn ConstantSource>, policy: ResolvePolicy) -> Self {
        Self {
            source,
            policy,
            cache: RwLock::new(FxHashMap::default()),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn policy(&self) -> ResolvePolicy {
        self.policy
    }

    /// Resolve `name` in `domain`, applying the resolver's policy on absence.
    pub fn resolve(&self, domain: Domain, name: &str) -> Result<EnumValue, ResolveError> {
        match (self.lookup(domain, name), self.policy) {
            (Some(value), _) => Ok(value),
            (None, ResolvePolicy::Strict) => Err(ResolveError::missing(domain, name)),
            (None, ResolvePolicy::Tolerant) => Ok(EnumValue::default()),
        }
    }

    /// Capability probe: whether the loaded host defines `name`.
    ///
    /// Never fails, regardless of policy.
    pub fn is_defined(&self, domain: Domain, name: &str) -> bool {
        self.lookup(domain, name).is_some()
    }

    /// Number of lookups that reached the underlying source.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Number of distinct keys requested so far.
    pub fn cached_keys(&self) -> usize {
        self.cache.read().len()
    }

    fn lookup(&self, domain: Domain, name: &str) -> Option<EnumValue> {
        let cell = self.cell(domain, name);
        *cell.get_or_init(|| {
            self.lookups.fetch_add(1, Ordering::Relaxed);
            let found = self.source.lookup(domain, name);
            match found {
                Some(value) => tracing::trace!(%domain, name, raw = value.raw(), "resolved constant"),
                None => tracing::warn!(
                    %domain,
                    name,
                    policy = ?self.policy,
                    "constant is not defined by the loaded host"
                ),
            }
            found
        })
    }

    fn cell(&self, domain: Domain, name: &str) -> ResolvedConstant {
        let key = ConstantKey::new(domain, name);
        if let Some(cell) = self.cache.read().get(&key) {
            return Arc::clone(cell);
        }
        Arc::clone(self.cache.write().entry(key).or_default())
    }

    // ------------------------------------------------------------------------
    // Domain groupings
    // ------------------------------------------------------------------------

    pub fn field_classes(&self) -> Result<FieldClasses, ResolveError> {
        Ok(FieldClasses {
            normal: self.resolve(Domain::FieldClassKind, FieldClasses::NORMAL)?,
            flow_field: self.resolve(Domain::FieldClassKind, FieldClasses::FLOW_FIELD)?,
            flow_filter: self.resolve(Domain::FieldClassKind, FieldClasses::FLOW_FILTER)?,
        })
    }

    pub fn property_kinds(&self) -> Result<PropertyKinds, ResolveError> {
        Ok(PropertyKinds {
            editable: self.resolve(Domain::PropertyKind, PropertyKinds::EDITABLE)?,
            field_class: self.resolve(Domain::PropertyKind, PropertyKinds::FIELD_CLASS)?,
            obsolete_state: self.resolve(Domain::PropertyKind, PropertyKinds::OBSOLETE_STATE)?,
        })
    }

    pub fn symbol_kinds(&self) -> Result<SymbolKinds, ResolveError> {
        Ok(SymbolKinds {
            field: self.resolve(Domain::SymbolKind, SymbolKinds::FIELD)?,
            table: self.resolve(Domain::SymbolKind, SymbolKinds::TABLE)?,
            table_extension: self.resolve(Domain::SymbolKind, SymbolKinds::TABLE_EXTENSION)?,
        })
    }

    pub fn trivia_kinds(&self) -> Result<TriviaKinds, ResolveError> {
        Ok(TriviaKinds {
            whitespace: self.resolve(Domain::SyntaxKind, TriviaKinds::WHITESPACE)?,
            end_of_line: self.resolve(Domain::SyntaxKind, TriviaKinds::END_OF_LINE)?,
            line_comment: self.resolve(Domain::SyntaxKind, TriviaKinds::LINE_COMMENT)?,
            block_comment: self.resolve(Domain::SyntaxKind, TriviaKinds::BLOCK_COMMENT)?,
        })
    }

    pub fn obsolete_states(&self) -> Result<ObsoleteStates, ResolveError> {
        Ok(ObsoleteStates {
            no: self.resolve(Domain::ObsoleteState, ObsoleteStates::NO)?,
            pending: self.resolve(Domain::ObsoleteState, ObsoleteStates::PENDING)?,
            removed: self.resolve(Domain::ObsoleteState, ObsoleteStates::REMOVED)?,
        })
    }
}

// ============================================================================
// GROUPINGS
// ============================================================================

/// `FieldClassKind` members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldClasses {
    pub normal: EnumValue,
    pub flow_field: EnumValue,
    pub flow_filter: EnumValue,
}

impl FieldClasses {
    pub const NORMAL: &'static str = "Normal";
    pub const FLOW_FIELD: &'static str = "FlowField";
    pub const FLOW_FILTER: &'static str = "FlowFilter";
}

/// `PropertyKind` members used by the analyzers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropertyKinds {
    pub editable: EnumValue,
    pub field_class: EnumValue,
    pub obsolete_state: EnumValue,
}

impl PropertyKinds {
    pub const EDITABLE: &'static str = "Editable";
    pub const FIELD_CLASS: &'static str = "FieldClass";
    pub const OBSOLETE_STATE: &'static str = "ObsoleteState";
}

/// `SymbolKind` members used by the analyzers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SymbolKinds {
    pub field: EnumValue,
    pub table: EnumValue,
    pub table_extension: EnumValue,
}

impl SymbolKinds {
    pub const FIELD: &'static str = "Field";
    pub const TABLE: &'static str = "Table";
    pub const TABLE_EXTENSION: &'static str = "TableExtension";
}

/// Trivia members of the host's `SyntaxKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriviaKinds {
    pub whitespace: EnumValue,
    pub end_of_line: EnumValue,
    pub line_comment: EnumValue,
    pub block_comment: EnumValue,
}

impl TriviaKinds {
    pub const WHITESPACE: &'static str = "WhiteSpaceTrivia";
    pub const END_OF_LINE: &'static str = "EndOfLineTrivia";
    pub const LINE_COMMENT: &'static str = "LineCommentTrivia";
    pub const BLOCK_COMMENT: &'static str = "BlockCommentTrivia";
}

/// `ObsoleteStateKind` members present on every host release.
///
/// `PendingMove` and `Moved` only exist on newer hosts and are reached
/// through symbol flag probes instead (see [`crate::compat::SymbolFlag`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObsoleteStates {
    pub no: EnumValue,
    pub pending: EnumValue,
    pub removed: EnumValue,
}

impl ObsoleteStates {
    pub const NO: &'static str = "No";
    pub const PENDING: &'static str = "Pending";
    pub const REMOVED: &'static str = "Removed";
    pub const PENDING_MOVE: &'static str = "PendingMove";
    pub const MOVED: &'static str = "Moved";
}
