//! Shared module for functionality used by both the library and the CLI

pub mod logger;

/// Returns the current version of the `DegreeAudit` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
