//! Obsolescence classification across host lifecycle vocabularies.
//!
//! Older hosts only know `Pending` and `Removed` as obsolete states. Newer
//! hosts additionally track moves (`PendingMove`, `Moved`) as boolean symbol
//! flags. A symbol is obsolete if any tier says so, and a member is treated
//! as obsolete when any declaration containing it is.

use crate::compat::resolver::{ConstantResolver, Domain, EnumValue, ObsoleteStates};
use crate::compat::symbol::{SymbolFlag, SymbolHandle};

/// Flags probed after the always-available state check, in order.
const TIER_TWO_FLAGS: [SymbolFlag; 2] = [SymbolFlag::IsObsoleteMoved, SymbolFlag::IsObsoletePendingMove];

/// Decides whether symbols are retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObsoleteClassifier {
    pending: EnumValue,
    removed: EnumValue,
}

impl ObsoleteClassifier {
    /// Resolve the tier-one states once.
    ///
    /// Never fails: a state the host does not define is treated as one no
    /// symbol can be in.
    pub fn new(resolver: &ConstantResolver) -> Self {
        Self {
            pending: guarded(resolver, ObsoleteStates::PENDING),
            removed: guarded(resolver, ObsoleteStates::REMOVED),
        }
    }

    /// Whether the symbol itself is obsolete.
    pub fn is_obsolete(&self, symbol: &dyn SymbolHandle) -> bool {
        let state = symbol.obsolete_state();
        if self.pending.matches(state) || self.removed.matches(state) {
            return true;
        }
        TIER_TWO_FLAGS
            .into_iter()
            .any(|flag| symbol.probe_flag(flag).unwrap_or(false))
    }

    /// Whether the symbol or any declaration containing it is obsolete.
    pub fn is_obsolete_or_contained(&self, symbol: &dyn SymbolHandle) -> bool {
        containing_chain(symbol).any(|s| self.is_obsolete(s))
    }
}

/// The symbol followed by each of its containing declarations.
pub fn containing_chain<'a>(
    symbol: &'a dyn SymbolHandle,
) -> impl Iterator<Item = &'a dyn SymbolHandle> {
    std::iter::successors(Some(symbol), |&s| s.containing_symbol())
}

fn guarded(resolver: &ConstantResolver, name: &str) -> EnumValue {
    resolver
        .resolve(Domain::ObsoleteState, name)
        .unwrap_or_else(|err| {
            tracing::debug!(%err, "obsolete state unavailable, treating as never set");
            EnumValue::ABSENT
        })
}

/// Anything an analysis callback runs in that can name a scope symbol.
pub trait ObsoleteScope {
    /// The symbol whose declaration the callback is analyzing.
    fn scope_symbol(&self) -> Option<&dyn SymbolHandle>;

    /// Direct and containment check on the scope symbol.
    fn is_obsolete(&self, classifier: &ObsoleteClassifier) -> bool {
        self.scope_symbol()
            .is_some_and(|symbol| classifier.is_obsolete_or_contained(symbol))
    }
}
