//! Code actions offered to the host.
//!
//! An action pairs a title and an equivalence key with a thunk that maps a
//! document snapshot to a fixed one. Hosts differ in which optional action
//! settings they understand; [`ActionCapabilities`] records what the host
//! advertised once, and [`CodeAction::try_set`] silently skips the rest.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use crate::hir::Diagnostic;
use crate::syntax::Document;

/// Setting that marks an action as eligible for fix-all batches.
pub const SUPPORTS_FIX_ALL: &str = "SupportsFixAll";
/// Title shown for the fix-all batch of an action.
pub const FIX_ALL_TITLE: &str = "FixAllTitle";

/// Value of an optional action setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Text(SmolStr),
}

/// Optional action settings the host understands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionCapabilities {
    settings: Vec<SmolStr>,
}

impl ActionCapabilities {
    /// A host without optional settings.
    pub fn none() -> Self {
        Self::default()
    }

    /// A host that understands every setting this crate uses.
    pub fn all() -> Self {
        Self::none().with(SUPPORTS_FIX_ALL).with(FIX_ALL_TITLE)
    }

    pub fn with(mut self, setting: &str) -> Self {
        if !self.supports(setting) {
            self.settings.push(SmolStr::new(setting));
        }
        self
    }

    pub fn supports(&self, setting: &str) -> bool {
        self.settings.iter().any(|s| s == setting)
    }
}

type ApplyFn = dyn Fn(&Document, &CancellationToken) -> Document + Send + Sync;

/// A named, keyed fix for one diagnostic.
#[derive(Clone)]
pub struct CodeAction {
    pub title: SmolStr,
    /// Actions with the same key are interchangeable in a batch.
    pub equivalence_key: SmolStr,
    pub diagnostic: Diagnostic,
    capabilities: ActionCapabilities,
    settings: IndexMap<SmolStr, SettingValue>,
    apply: Arc<ApplyFn>,
}

impl fmt::Debug for CodeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeAction")
            .field("title", &self.title)
            .field("equivalence_key", &self.equivalence_key)
            .field("range", &self.diagnostic.range)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl CodeAction {
    pub fn new(
        title: impl Into<SmolStr>,
        equivalence_key: impl Into<SmolStr>,
        diagnostic: Diagnostic,
        capabilities: ActionCapabilities,
        apply: impl Fn(&Document, &CancellationToken) -> Document + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            equivalence_key: equivalence_key.into(),
            diagnostic,
            capabilities,
            settings: IndexMap::new(),
            apply: Arc::new(apply),
        }
    }

    /// Set an optional setting if the host supports it.
    ///
    /// Returns whether the setting was applied.
    pub fn try_set(&mut self, name: &str, value: SettingValue) -> bool {
        if !self.capabilities.supports(name) {
            tracing::trace!(setting = name, "host does not support action setting");
            return false;
        }
        self.settings.insert(SmolStr::new(name), value);
        true
    }

    pub fn setting(&self, name: &str) -> Option<&SettingValue> {
        self.settings.get(name)
    }

    pub fn supports_fix_all(&self) -> bool {
        self.setting(SUPPORTS_FIX_ALL) == Some(&SettingValue::Bool(true))
    }

    /// Produce the fixed document.
    pub fn apply(&self, document: &Document, cancel: &CancellationToken) -> Document {
        (self.apply)(document, cancel)
    }
}
