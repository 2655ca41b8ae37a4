//! Code fix tests
//!
//! - Single `Editable = false` rewrites and their formatting
//! - Fix-all batches over documents and the workspace

mod tests_fix_all;
