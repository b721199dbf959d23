//! Error types for the evaluator and snapshot loading.
//!
//! Unknown majors and missing catalog entries are not errors; see the resolver
//! and accumulator for how those are handled.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building filters, loading definitions or reading snapshots.
#[derive(Debug, Error)]
pub enum AuditError {
    /// A filter pattern in a requirement definition is not a valid regex.
    #[error("Invalid filter pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern as written in the definition, delimiters included
        pattern: String,
        /// Underlying regex compilation error
        #[source]
        source: Box<regex::Error>,
    },

    /// A requirement definition file could not be parsed.
    #[error("Failed to parse requirement definition '{name}': {source}")]
    DefinitionParse {
        /// Definition name or file path
        name: String,
        /// Underlying TOML error
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A snapshot or catalog file could not be parsed.
    #[error("Failed to parse {}: {source}", path.display())]
    SnapshotParse {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File or directory that failed to read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result alias for evaluator operations.
pub type Result<T> = std::result::Result<T, AuditError>;
