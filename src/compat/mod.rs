//! Compatibility layer over the evolving host symbol model.
//!
//! Everything the analyzers know about the host goes through here:
//!
//! - [`ConstantResolver`] - name-keyed, cached access to host enumerations
//! - [`SymbolHandle`], [`PropertyHandle`] - read-only view of host symbols
//! - [`ObsoleteClassifier`] - retirement checks across lifecycle vocabularies
//!
//! Depends only on `base`.

pub mod obsolete;
pub mod resolver;
pub mod symbol;

#[cfg(test)]
pub(crate) mod testing;

pub use obsolete::{ObsoleteClassifier, ObsoleteScope, containing_chain};
pub use resolver::{
    ConstantKey, ConstantResolver, ConstantSource, Domain, EnumValue, FieldClasses,
    ObsoleteStates, PropertyKinds, ResolveError, ResolvePolicy, SymbolKinds, TriviaKinds,
};
pub use symbol::{PropertyHandle, SymbolFlag, SymbolHandle};
