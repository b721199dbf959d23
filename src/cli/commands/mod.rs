//! CLI command handlers for `DegreeAudit`.
//!
//! Each command is implemented in its own submodule. Helpers shared by the
//! snapshot-driven commands live here.

pub mod audit;
pub mod config;
pub mod majors;
pub mod prereqs;

use degree_audit::config::Config;
use degree_audit::core::audit::RequirementResolver;
use degree_audit::core::models::TermOrder;
use degree_audit::core::planner::JsonSnapshotSource;
use degree_audit::{debug, warn};
use std::path::{Path, PathBuf};

/// Built-in definitions plus any descriptors in the configured majors directory
pub fn build_resolver(config: &Config) -> Result<RequirementResolver, String> {
    let mut resolver =
        RequirementResolver::with_builtin().map_err(|e| format!("✗ Built-in definitions: {e}"))?;

    if !config.data.majors_dir.is_empty() {
        let dir = Path::new(&config.data.majors_dir);
        if dir.is_dir() {
            resolver
                .load_dir(dir)
                .map_err(|e| format!("✗ Failed to load definitions: {e}"))?;
        } else {
            debug!("Majors directory {} does not exist", dir.display());
        }
    }
    Ok(resolver)
}

/// Configured term order, or the default order with a warning when invalid
pub fn term_order(config: &Config) -> TermOrder {
    config.term_order().unwrap_or_else(|e| {
        warn!("Ignoring configured term order: {e}");
        TermOrder::default()
    })
}

/// Resolve a snapshot argument: paths that don't exist are looked up in the
/// configured plans directory
pub fn resolve_snapshot_path(path: &Path, config: &Config) -> PathBuf {
    if path.exists() || config.paths.plans_dir.is_empty() {
        return path.to_path_buf();
    }
    let candidate = Path::new(&config.paths.plans_dir).join(path);
    if candidate.exists() {
        candidate
    } else {
        path.to_path_buf()
    }
}

/// Snapshot source for `path`, merging the CLI catalog or the configured one
pub fn snapshot_source(path: &Path, catalog: Option<&Path>, config: &Config) -> JsonSnapshotSource {
    let source = JsonSnapshotSource::new(resolve_snapshot_path(path, config));
    match catalog {
        Some(catalog) => source.with_catalog(catalog),
        None if !config.data.catalog.is_empty() => source.with_catalog(&config.data.catalog),
        None => source,
    }
}
