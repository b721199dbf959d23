//! Catalog course model

use serde::{Deserialize, Serialize};

/// A restriction attached to a catalog course (e.g. "Juniors and Seniors only")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    /// Short restriction name
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
}

/// Represents a course in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Catalog number, which is also the course identifier (e.g., "EN.601.220")
    pub number: String,

    /// Course title (e.g., "Intermediate Programming")
    pub title: String,

    /// Credit value (can be fractional)
    pub credits: f32,

    /// Distribution areas as a string of area letters (e.g., "NQ"), "None" when absent
    #[serde(default)]
    pub areas: String,

    /// Department (e.g., "EN Computer Science")
    #[serde(default)]
    pub department: String,

    /// Writing-intensive flag
    #[serde(default)]
    pub wi: bool,

    /// Free-form tags (e.g., "COGS-COMPCG")
    #[serde(default)]
    pub tags: Vec<String>,

    /// Prerequisites - stored as catalog numbers
    #[serde(default)]
    pub prerequisites: Vec<String>,

    /// Enrollment restrictions
    #[serde(default)]
    pub restrictions: Vec<Restriction>,

    /// Terms in which the course is offered (e.g., "Fall 2021")
    #[serde(default)]
    pub terms: Vec<String>,
}

impl Course {
    /// Create a new course with no areas, tags or prerequisites
    ///
    /// # Arguments
    /// * `number` - Catalog number
    /// * `title` - Course title
    /// * `credits` - Credit value (can be fractional)
    #[must_use]
    pub const fn new(number: String, title: String, credits: f32) -> Self {
        Self {
            number,
            title,
            credits,
            areas: String::new(),
            department: String::new(),
            wi: false,
            tags: Vec::new(),
            prerequisites: Vec::new(),
            restrictions: Vec::new(),
            terms: Vec::new(),
        }
    }

    /// Get the course key for catalog lookups
    #[must_use]
    pub fn key(&self) -> &str {
        &self.number
    }

    /// Add a prerequisite by catalog number
    pub fn add_prerequisite(&mut self, prereq: String) {
        if !self.prerequisites.contains(&prereq) {
            self.prerequisites.push(prereq);
        }
    }

    /// Add a tag
    pub fn add_tag(&mut self, tag: String) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Builder-style setter for the distribution areas
    #[must_use]
    pub fn with_areas(mut self, areas: &str) -> Self {
        areas.clone_into(&mut self.areas);
        self
    }

    /// Builder-style setter for the department
    #[must_use]
    pub fn with_department(mut self, department: &str) -> Self {
        department.clone_into(&mut self.department);
        self
    }

    /// Builder-style setter for the writing-intensive flag
    #[must_use]
    pub const fn with_wi(mut self, wi: bool) -> Self {
        self.wi = wi;
        self
    }

    /// Whether the course carries the given area letter
    #[must_use]
    pub fn has_area(&self, area: char) -> bool {
        self.areas != "None" && self.areas.contains(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = Course::new(
            "EN.601.220".to_string(),
            "Intermediate Programming".to_string(),
            4.0,
        );

        assert_eq!(course.key(), "EN.601.220");
        assert_eq!(course.title, "Intermediate Programming");
        assert!((course.credits - 4.0).abs() < f32::EPSILON);
        assert!(course.prerequisites.is_empty());
        assert!(course.tags.is_empty());
        assert!(!course.wi);
    }

    #[test]
    fn test_add_prerequisite_deduplicates() {
        let mut course = Course::new(
            "EN.601.226".to_string(),
            "Data Structures".to_string(),
            4.0,
        );

        course.add_prerequisite("EN.601.220".to_string());
        course.add_prerequisite("EN.601.220".to_string());
        assert_eq!(course.prerequisites, vec!["EN.601.220".to_string()]);
    }

    #[test]
    fn test_builders_and_areas() {
        let course = Course::new("AS.110.108".to_string(), "Calculus I".to_string(), 4.0)
            .with_areas("Q")
            .with_department("AS Mathematics")
            .with_wi(false);

        assert!(course.has_area('Q'));
        assert!(!course.has_area('N'));
        assert_eq!(course.department, "AS Mathematics");

        let none = Course::new("X".to_string(), "X".to_string(), 1.0).with_areas("None");
        assert!(!none.has_area('N'));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"number": "EN.601.104", "title": "Computer Ethics", "credits": 1}"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.number, "EN.601.104");
        assert!(course.areas.is_empty());
        assert!(course.restrictions.is_empty());
    }
}
