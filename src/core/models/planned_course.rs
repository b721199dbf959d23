//! A student's course instance placed into a plan

use super::{Course, Term};
use serde::{Deserialize, Serialize};

/// A course the student has taken or plans to take, placed into a year and term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedCourse {
    /// Unique id of this planned instance
    pub id: String,

    /// Catalog number this instance refers to
    pub number: String,

    /// Denormalized title
    #[serde(default)]
    pub title: String,

    /// Denormalized department
    #[serde(default)]
    pub department: String,

    /// Distribution area chosen for this instance
    #[serde(default)]
    pub area: String,

    /// Denormalized tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Denormalized writing-intensive flag
    #[serde(default)]
    pub wi: bool,

    /// Credits counted for this instance (overridable for placeholders)
    pub credits: f32,

    /// Whether the course has already been taken
    #[serde(default)]
    pub taken: bool,

    /// Term the course is scheduled in
    pub term: Term,

    /// Id of the owning year
    pub year_id: String,

    /// Id of the owning plan
    pub plan_id: String,

    /// User-defined course with no catalog backing
    #[serde(default)]
    pub is_placeholder: bool,

    /// Requirements this course currently counts toward
    #[serde(default)]
    pub distribution_ids: Vec<String>,
}

impl PlannedCourse {
    /// Create a planned course backed by the catalog number `number`
    #[must_use]
    pub const fn new(
        id: String,
        number: String,
        credits: f32,
        term: Term,
        year_id: String,
        plan_id: String,
    ) -> Self {
        Self {
            id,
            number,
            title: String::new(),
            department: String::new(),
            area: String::new(),
            tags: Vec::new(),
            wi: false,
            credits,
            taken: false,
            term,
            year_id,
            plan_id,
            is_placeholder: false,
            distribution_ids: Vec::new(),
        }
    }

    /// Denormalize catalog fields onto this instance
    #[must_use]
    pub fn from_catalog(
        id: String,
        course: &Course,
        term: Term,
        year_id: String,
        plan_id: String,
    ) -> Self {
        Self {
            title: course.title.clone(),
            department: course.department.clone(),
            area: course.areas.clone(),
            tags: course.tags.clone(),
            wi: course.wi,
            ..Self::new(
                id,
                course.number.clone(),
                course.credits,
                term,
                year_id,
                plan_id,
            )
        }
    }

    /// Synthesize a minimal catalog record from the denormalized fields.
    ///
    /// Used for placeholders and for courses missing from the catalog. The
    /// synthesized course has no prerequisites or restrictions.
    #[must_use]
    pub fn to_placeholder_course(&self) -> Course {
        Course {
            number: self.number.clone(),
            title: self.title.clone(),
            credits: self.credits,
            areas: self.area.clone(),
            department: self.department.clone(),
            wi: self.wi,
            tags: self.tags.clone(),
            prerequisites: Vec::new(),
            restrictions: Vec::new(),
            terms: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_catalog_denormalizes_fields() {
        let mut course = Course::new(
            "EN.601.220".to_string(),
            "Intermediate Programming".to_string(),
            4.0,
        )
        .with_areas("E")
        .with_department("EN Computer Science");
        course.add_tag("CSCI-SOFT".to_string());

        let planned = PlannedCourse::from_catalog(
            "pc1".to_string(),
            &course,
            Term::Spring,
            "y1".to_string(),
            "p1".to_string(),
        );

        assert_eq!(planned.number, "EN.601.220");
        assert_eq!(planned.area, "E");
        assert_eq!(planned.tags, vec!["CSCI-SOFT".to_string()]);
        assert!(!planned.is_placeholder);
    }

    #[test]
    fn test_placeholder_course_uses_own_credits() {
        let mut planned = PlannedCourse::new(
            "pc2".to_string(),
            "XX.000.000".to_string(),
            2.5,
            Term::Fall,
            "y1".to_string(),
            "p1".to_string(),
        );
        planned.title = "Study Abroad Elective".to_string();
        planned.area = "H".to_string();
        planned.is_placeholder = true;

        let course = planned.to_placeholder_course();
        assert_eq!(course.title, "Study Abroad Elective");
        assert!((course.credits - 2.5).abs() < f32::EPSILON);
        assert!(course.has_area('H'));
        assert!(course.prerequisites.is_empty());
    }
}
