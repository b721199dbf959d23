//! Snapshot sources
//!
//! The evaluator never reads files. Callers obtain a [`PlanSnapshot`] from a
//! [`PlanSource`] and pass it to `audit_plan`.

use crate::core::audit::PlanSnapshot;
use crate::core::error::{AuditError, Result};
use crate::core::models::Catalog;
use crate::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Anything that can produce a consistent plan snapshot
pub trait PlanSource {
    /// Load a snapshot
    ///
    /// # Errors
    /// Returns an error if the underlying data can't be read or parsed
    fn load(&self) -> Result<PlanSnapshot>;
}

/// Reads a snapshot from a JSON file shaped `{ "plan": ..., "courses": [...], "catalog": [...] }`.
///
/// An optional external catalog file (a JSON array of courses) is merged
/// into the embedded catalog. Embedded records win on duplicate numbers.
#[derive(Debug, Clone)]
pub struct JsonSnapshotSource {
    path: PathBuf,
    catalog_path: Option<PathBuf>,
}

impl JsonSnapshotSource {
    /// Create a source for the snapshot at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            catalog_path: None,
        }
    }

    /// Merge the catalog at `path` into every loaded snapshot
    #[must_use]
    pub fn with_catalog<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.catalog_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Snapshot file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlanSource for JsonSnapshotSource {
    fn load(&self) -> Result<PlanSnapshot> {
        let mut snapshot: PlanSnapshot = read_json(&self.path)?;
        debug!(
            "Loaded plan '{}' with {} course(s) from {}",
            snapshot.plan.name,
            snapshot.courses.len(),
            self.path.display()
        );

        if let Some(catalog_path) = &self.catalog_path {
            let added = snapshot.catalog.merge(load_catalog(catalog_path)?);
            info!(
                "Merged {added} catalog course(s) from {}",
                catalog_path.display()
            );
        }
        Ok(snapshot)
    }
}

/// Load a catalog file: a JSON array of courses
///
/// # Errors
/// Returns an error if the file can't be read or isn't a course array
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    read_json(path.as_ref())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|source| AuditError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| AuditError::SnapshotParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SNAPSHOT: &str = r#"{
        "plan": {
            "id": "p1",
            "name": "Plan",
            "majors": ["B.S. CS"],
            "years": [{ "id": "y1", "name": "Freshman", "year": 2023, "courses": ["c1"] }]
        },
        "courses": [{
            "id": "c1",
            "number": "EN.601.220",
            "credits": 4,
            "term": "Fall",
            "year_id": "y1",
            "plan_id": "p1"
        }],
        "catalog": [{ "number": "EN.601.220", "title": "Intermediate Programming", "credits": 4 }]
    }"#;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_snapshot() {
        let file = write_temp(SNAPSHOT);
        let snapshot = JsonSnapshotSource::new(file.path()).load().unwrap();
        assert_eq!(snapshot.plan.name, "Plan");
        assert_eq!(snapshot.courses.len(), 1);
        assert!(snapshot.catalog.contains("EN.601.220"));
        assert!(snapshot.is_consistent());
    }

    #[test]
    fn test_external_catalog_is_merged_embedded_wins() {
        let file = write_temp(SNAPSHOT);
        let catalog = write_temp(
            r#"[
                { "number": "EN.601.220", "title": "Renamed", "credits": 3 },
                { "number": "EN.601.226", "title": "Data Structures", "credits": 4 }
            ]"#,
        );
        let snapshot = JsonSnapshotSource::new(file.path())
            .with_catalog(catalog.path())
            .load()
            .unwrap();
        assert_eq!(snapshot.catalog.len(), 2);
        assert_eq!(
            snapshot.catalog.get_course("EN.601.220").unwrap().title,
            "Intermediate Programming"
        );
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = JsonSnapshotSource::new("/nonexistent/plan.json")
            .load()
            .unwrap_err();
        assert!(matches!(err, AuditError::Read { .. }));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let file = write_temp("{ not json");
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, AuditError::SnapshotParse { .. }));
    }
}
