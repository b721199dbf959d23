//! Requirement resolution: maps major/minor names to requirement trees

use crate::core::error::{AuditError, Result};
use crate::core::models::{DegreeDefinition, DegreeKind, Requirement};
use crate::{debug, info, warn};
use std::fs;
use std::path::Path;

/// Descriptors compiled into the binary
const BUILTIN_DEFINITIONS: &[(&str, &str)] = &[
    (
        "bs_computer_science.toml",
        include_str!("../../assets/majors/bs_computer_science.toml"),
    ),
    (
        "minor_computer_science.toml",
        include_str!("../../assets/majors/minor_computer_science.toml"),
    ),
    (
        "minor_mathematics.toml",
        include_str!("../../assets/majors/minor_mathematics.toml"),
    ),
];

/// Parse one descriptor
///
/// # Errors
/// Returns [`AuditError::DefinitionParse`] naming `name` if the TOML is invalid
pub fn parse_definition(name: &str, contents: &str) -> Result<DegreeDefinition> {
    toml::from_str(contents).map_err(|source| AuditError::DefinitionParse {
        name: name.to_string(),
        source: Box::new(source),
    })
}

/// Registry of major and minor definitions
#[derive(Debug, Clone, Default)]
pub struct RequirementResolver {
    definitions: Vec<DegreeDefinition>,
}

impl RequirementResolver {
    /// Create an empty resolver
    #[must_use]
    pub const fn new() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }

    /// Create a resolver holding the built-in definitions
    ///
    /// # Errors
    /// Returns an error if a built-in descriptor fails to parse
    pub fn with_builtin() -> Result<Self> {
        let mut resolver = Self::new();
        for (name, contents) in BUILTIN_DEFINITIONS {
            resolver.add_definition(parse_definition(name, contents)?);
        }
        Ok(resolver)
    }

    /// Register a definition. The first definition with a given degree name wins.
    ///
    /// Returns `false` if the name was already registered.
    pub fn add_definition(&mut self, definition: DegreeDefinition) -> bool {
        if self
            .definitions
            .iter()
            .any(|d| d.degree_name == definition.degree_name)
        {
            debug!(
                "Skipping duplicate definition '{}'",
                definition.degree_name
            );
            return false;
        }
        self.definitions.push(definition);
        true
    }

    /// Load one descriptor file
    ///
    /// # Errors
    /// Returns an error if the file can't be read or parsed
    pub fn load_file(&mut self, path: &Path) -> Result<bool> {
        let contents = fs::read_to_string(path).map_err(|source| AuditError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let definition = parse_definition(&path.display().to_string(), &contents)?;
        Ok(self.add_definition(definition))
    }

    /// Load every `*.toml` descriptor in `dir`, in file name order
    ///
    /// Returns the number of definitions added.
    ///
    /// # Errors
    /// Returns an error if the directory can't be read or any descriptor is invalid
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let read_err = |source| AuditError::Read {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths = fs::read_dir(dir)
            .map_err(read_err)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(read_err)?;
        paths.retain(|p| p.extension().is_some_and(|ext| ext == "toml"));
        paths.sort();

        let mut added = 0;
        for path in &paths {
            if self.load_file(path)? {
                added += 1;
            }
        }
        info!(
            "Loaded {added} requirement definition(s) from {}",
            dir.display()
        );
        Ok(added)
    }

    /// Find a definition by degree name or abbreviation
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&DegreeDefinition> {
        self.definitions.iter().find(|d| d.answers_to(name))
    }

    /// All registered definitions in registration order
    #[must_use]
    pub fn definitions(&self) -> &[DegreeDefinition] {
        &self.definitions
    }

    /// Definitions of one kind
    pub fn definitions_of(&self, kind: DegreeKind) -> impl Iterator<Item = &DegreeDefinition> {
        self.definitions.iter().filter(move |d| d.kind == kind)
    }

    /// Build the zero-initialized requirement tree for a major and its minors.
    ///
    /// An unknown major yields an empty list; unknown minors are skipped.
    /// Minor requirement names are prefixed with the minor's abbreviation. Only
    /// the first `"Total"` requirement is kept.
    ///
    /// # Errors
    /// Returns [`AuditError::InvalidPattern`] if a definition holds a bad pattern
    pub fn resolve(&self, major: &str, minors: &[String]) -> Result<Vec<Requirement>> {
        let Some(major_def) = self.find(major) else {
            warn!("Unknown major '{major}', no requirements configured");
            return Ok(Vec::new());
        };

        let mut requirements = major_def.instantiate(None)?;
        for minor in minors {
            let Some(minor_def) = self.find(minor) else {
                warn!("Unknown minor '{minor}', skipping");
                continue;
            };
            let has_total = requirements.iter().any(Requirement::is_total);
            requirements.extend(
                minor_def
                    .instantiate(Some(&minor_def.abbrev))?
                    .into_iter()
                    .filter(|r| !(has_total && r.is_total())),
            );
        }

        debug!(
            "Resolved {} requirement(s) for '{major}'",
            requirements.len()
        );
        Ok(requirements)
    }
}
