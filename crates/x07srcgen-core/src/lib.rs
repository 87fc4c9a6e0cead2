//! Deterministic source emitters for Unicode lookup data.
//!
//! Turns already-built tries, code point maps and sets into C array literals and
//! struct initializers or TOML data, in a layout that keeps regenerated files
//! diff-stable.

pub mod array;
pub mod bytes;
pub mod cpmap;
pub mod diagnostics;
pub mod document;
pub mod escape;
pub mod header;
pub mod ranges;
pub mod sink;
pub mod syntax;
pub mod trie;
pub mod trie_emit;
pub mod util;

pub use crate::diagnostics::{Diagnostic, DiagnosticCode};
pub use crate::syntax::TargetSyntax;
