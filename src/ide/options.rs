//! Analysis options

use crate::compat::ResolvePolicy;
use crate::hir::{HostRelease, Severity};

/// Options for an [`AnalysisHost`](super::AnalysisHost).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Host release whose enumerations symbols are expressed in
    pub release: HostRelease,
    /// What to do when the host lacks a constant
    pub resolve_policy: ResolvePolicy,
    /// Analyze symbols on the rayon pool
    pub parallel: bool,
    /// Severity for LC0001 (`None` keeps the rule default)
    pub flowfield_editable_severity: Option<Severity>,
    /// Spaces per indentation level for inserted properties
    pub tab_size: usize,
    /// Use spaces for indentation (false = use tabs)
    pub insert_spaces: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            release: HostRelease::default(),
            resolve_policy: ResolvePolicy::for_build(),
            parallel: true,
            flowfield_editable_severity: None,
            tab_size: 4,
            insert_spaces: true,
        }
    }
}

impl AnalysisOptions {
    pub fn with_release(mut self, release: HostRelease) -> Self {
        self.release = release;
        self
    }

    pub fn with_resolve_policy(mut self, policy: ResolvePolicy) -> Self {
        self.resolve_policy = policy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_flowfield_editable_severity(mut self, severity: Severity) -> Self {
        self.flowfield_editable_severity = Some(severity);
        self
    }

    pub fn with_tabs(mut self) -> Self {
        self.insert_spaces = false;
        self
    }

    /// One level of indentation
    pub fn indent_unit(&self) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size)
        } else {
            "\t".to_string()
        }
    }
}
