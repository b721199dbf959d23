//! Requirement model: distributions, fine requirements and fulfillment state

use super::RequirementFilter;
use std::fmt;

/// Name of the pseudo-requirement tracking total credits
pub const TOTAL_REQUIREMENT: &str = "Total";

/// Three-valued fulfillment state of a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fulfillment {
    /// No credits counted yet
    Unsatisfied,
    /// Some credits counted, fewer than required
    Partial,
    /// Required credits reached
    Satisfied,
}

impl Fulfillment {
    /// Classify a tally against its target.
    ///
    /// A zero tally is unsatisfied even when the target is zero.
    #[must_use]
    pub fn from_tally(planned: f32, required: f32) -> Self {
        if planned <= 0.0 {
            Self::Unsatisfied
        } else if planned >= required {
            Self::Satisfied
        } else {
            Self::Partial
        }
    }

    /// Lowercase label used by reports
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unsatisfied => "unsatisfied",
            Self::Partial => "partial",
            Self::Satisfied => "satisfied",
        }
    }
}

impl fmt::Display for Fulfillment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A planned course counted toward a requirement
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Planned course id
    pub course_id: String,
    /// Catalog number of the course
    pub number: String,
    /// Credits counted
    pub credits: f32,
}

/// Nested sub-rule of a requirement with its own filter and credit target
#[derive(Debug, Clone, PartialEq)]
pub struct FineRequirement {
    /// Human-readable description
    pub description: String,
    /// Criteria text as shown to students
    pub criteria: String,
    /// Courses that may count
    pub filter: RequirementFilter,
    /// Credits needed
    pub required_credits: f32,
    /// A course counted here cannot count toward another exclusive sibling
    pub exclusive: bool,
    /// Credits counted so far
    pub planned_credits: f32,
    /// Courses counted so far
    pub assignments: Vec<Assignment>,
}

impl FineRequirement {
    /// Create a zero-initialized fine requirement
    #[must_use]
    pub const fn new(description: String, required_credits: f32, filter: RequirementFilter) -> Self {
        Self {
            description,
            criteria: String::new(),
            filter,
            required_credits,
            exclusive: false,
            planned_credits: 0.0,
            assignments: Vec::new(),
        }
    }

    /// Builder-style setter for the exclusive flag
    #[must_use]
    pub const fn with_exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    /// Current fulfillment state
    #[must_use]
    pub fn fulfillment(&self) -> Fulfillment {
        Fulfillment::from_tally(self.planned_credits, self.required_credits)
    }

    fn reset(&mut self) {
        self.planned_credits = 0.0;
        self.assignments.clear();
    }
}

/// A named degree rule requiring credits from courses matching a filter
#[derive(Debug, Clone, PartialEq)]
pub struct Requirement {
    /// Requirement name (e.g., "Computer Science", "Total")
    pub name: String,
    /// Credits needed
    pub required_credits: f32,
    /// Per-course credit cap when positive
    pub min_credits_per_course: f32,
    /// Human-readable description
    pub description: String,
    /// Criteria text as shown to students
    pub criteria: String,
    /// Courses that may count
    pub filter: RequirementFilter,
    /// Nested sub-rules
    pub fine_requirements: Vec<FineRequirement>,
    /// Courses already counted elsewhere may count here too
    pub double_count: bool,
    /// Students may choose which requirement a course counts toward
    pub user_select: bool,
    /// Credits counted so far
    pub planned_credits: f32,
    /// Courses counted so far
    pub assignments: Vec<Assignment>,
}

impl Requirement {
    /// Create a zero-initialized requirement
    #[must_use]
    pub const fn new(name: String, required_credits: f32, filter: RequirementFilter) -> Self {
        Self {
            name,
            required_credits,
            min_credits_per_course: 0.0,
            description: String::new(),
            criteria: String::new(),
            filter,
            fine_requirements: Vec::new(),
            double_count: false,
            user_select: false,
            planned_credits: 0.0,
            assignments: Vec::new(),
        }
    }

    /// Create the total-credits pseudo-requirement
    #[must_use]
    pub fn total(required_credits: f32) -> Self {
        let mut total = Self::new(
            TOTAL_REQUIREMENT.to_string(),
            required_credits,
            RequirementFilter::empty(),
        );
        total.description = "Total credits planned across all courses.".to_string();
        total
    }

    /// Builder-style setter for the per-course credit cap
    #[must_use]
    pub const fn with_min_credits_per_course(mut self, credits: f32) -> Self {
        self.min_credits_per_course = credits;
        self
    }

    /// Builder-style setter for double counting
    #[must_use]
    pub const fn with_double_count(mut self, double_count: bool) -> Self {
        self.double_count = double_count;
        self
    }

    /// Builder-style setter for the description
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        description.clone_into(&mut self.description);
        self
    }

    /// Append a fine requirement
    #[must_use]
    pub fn with_fine_requirement(mut self, fine: FineRequirement) -> Self {
        self.fine_requirements.push(fine);
        self
    }

    /// Whether this is the total-credits pseudo-requirement
    #[must_use]
    pub fn is_total(&self) -> bool {
        self.name == TOTAL_REQUIREMENT
    }

    /// Current fulfillment state
    #[must_use]
    pub fn fulfillment(&self) -> Fulfillment {
        Fulfillment::from_tally(self.planned_credits, self.required_credits)
    }

    /// Credits still needed, never negative
    #[must_use]
    pub fn remaining_credits(&self) -> f32 {
        (self.required_credits - self.planned_credits).max(0.0)
    }

    /// Whether the planned course with `course_id` counts toward this requirement
    #[must_use]
    pub fn counts_course(&self, course_id: &str) -> bool {
        self.assignments.iter().any(|a| a.course_id == course_id)
    }

    /// Zero this requirement and all fine requirements
    pub fn reset(&mut self) {
        self.planned_credits = 0.0;
        self.assignments.clear();
        for fine in &mut self.fine_requirements {
            fine.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fulfillment_thresholds() {
        assert_eq!(Fulfillment::from_tally(0.0, 3.0), Fulfillment::Unsatisfied);
        assert_eq!(Fulfillment::from_tally(2.0, 3.0), Fulfillment::Partial);
        assert_eq!(Fulfillment::from_tally(3.0, 3.0), Fulfillment::Satisfied);
        assert_eq!(Fulfillment::from_tally(4.0, 3.0), Fulfillment::Satisfied);
        assert_eq!(Fulfillment::from_tally(0.0, 0.0), Fulfillment::Unsatisfied);
        assert_eq!(Fulfillment::from_tally(1.0, 0.0), Fulfillment::Satisfied);
    }

    #[test]
    fn test_total_requirement() {
        let total = Requirement::total(120.0);
        assert!(total.is_total());
        assert!(total.filter.is_empty());
        assert_eq!(total.fulfillment(), Fulfillment::Unsatisfied);
        assert!((total.remaining_credits() - 120.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_reset_clears_fine_requirements() {
        let mut req = Requirement::new("Math".to_string(), 8.0, RequirementFilter::empty())
            .with_fine_requirement(FineRequirement::new(
                "Calculus".to_string(),
                4.0,
                RequirementFilter::empty(),
            ));
        req.planned_credits = 4.0;
        req.assignments.push(Assignment {
            course_id: "c1".to_string(),
            number: "AS.110.108".to_string(),
            credits: 4.0,
        });
        req.fine_requirements[0].planned_credits = 4.0;

        assert!(req.counts_course("c1"));
        req.reset();
        assert!(!req.counts_course("c1"));
        assert!(req.planned_credits.abs() < f32::EPSILON);
        assert!(req.fine_requirements[0].planned_credits.abs() < f32::EPSILON);
    }

    #[test]
    fn test_fulfillment_display() {
        assert_eq!(Fulfillment::Partial.to_string(), "partial");
    }
}
