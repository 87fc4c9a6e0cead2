//! Shared, version-pinned protocol identifiers.
//!
//! These constants are the single source of truth for schema/version strings that
//! appear in machine-readable I/O of the source generators.

pub const X07SRCGEN_INPUT_SCHEMA_VERSION: &str = "x07srcgen.input@0.1.0";
pub const X07SRCGEN_MANIFEST_SCHEMA_VERSION: &str = "x07srcgen.manifest@0.1.0";
pub const X07SRCGEN_REPORT_SCHEMA_VERSION: &str = "x07srcgen.report@0.1.0";
