//! Course catalog cache

use super::Course;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-session cache of catalog courses, indexed by catalog number
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Course>", into = "Vec<Course>")]
pub struct Catalog {
    courses: HashMap<String, Course>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a course to the catalog
    ///
    /// # Returns
    /// `true` if the course was added, `false` if a course with that number is
    /// already cached (the cached record is kept)
    pub fn add_course(&mut self, course: Course) -> bool {
        if self.courses.contains_key(course.key()) {
            return false;
        }
        self.courses.insert(course.key().to_string(), course);
        true
    }

    /// Merge every course of `other` that is not already cached
    ///
    /// # Returns
    /// Number of courses added
    pub fn merge(&mut self, other: Self) -> usize {
        other
            .courses
            .into_values()
            .filter(|course| self.add_course(course.clone()))
            .count()
    }

    /// Get a course by its catalog number
    #[must_use]
    pub fn get_course(&self, number: &str) -> Option<&Course> {
        self.courses.get(number)
    }

    /// Check if a course is cached
    #[must_use]
    pub fn contains(&self, number: &str) -> bool {
        self.courses.contains_key(number)
    }

    /// Number of cached courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Iterate over all cached courses in no particular order
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Validate that all prerequisites refer to cached courses
    ///
    /// # Errors
    /// Returns `Err` with one message per prerequisite that is not in the catalog,
    /// sorted for stable output
    pub fn validate_prerequisites(&self) -> Result<(), Vec<String>> {
        let mut invalid: Vec<String> = self
            .courses
            .values()
            .flat_map(|course| {
                course
                    .prerequisites
                    .iter()
                    .filter(|prereq| !self.contains(prereq))
                    .map(move |prereq| {
                        format!(
                            "Course '{}': prerequisite '{prereq}' not found",
                            course.number
                        )
                    })
            })
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            invalid.sort();
            Err(invalid)
        }
    }
}

impl From<Vec<Course>> for Catalog {
    fn from(courses: Vec<Course>) -> Self {
        let mut catalog = Self::new();
        for course in courses {
            catalog.add_course(course);
        }
        catalog
    }
}

impl From<Catalog> for Vec<Course> {
    fn from(catalog: Catalog) -> Self {
        let mut courses: Self = catalog.courses.into_values().collect();
        courses.sort_by(|a, b| a.number.cmp(&b.number));
        courses
    }
}

impl FromIterator<Course> for Catalog {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}
