//! Analyzer tests
//!
//! LC0001 evaluated end to end over parsed tables:
//! - Field class and Editable property combinations
//! - Comment acknowledgement
//! - Obsolescence of the field and of its table under both releases

mod tests_flowfield_editable;
mod tests_obsolete_scope;
