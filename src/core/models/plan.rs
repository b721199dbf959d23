//! Plan model

use serde::{Deserialize, Serialize};

/// One year of a plan, holding planned course ids in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Year {
    /// Unique id of the year
    pub id: String,

    /// Display name (e.g., "Freshman")
    pub name: String,

    /// Calendar year or ordinal supplied by the persistence layer
    #[serde(default)]
    pub year: u32,

    /// Planned course ids in this year
    #[serde(default)]
    pub courses: Vec<String>,
}

impl Year {
    /// Create an empty year
    #[must_use]
    pub const fn new(id: String, name: String, year: u32) -> Self {
        Self {
            id,
            name,
            year,
            courses: Vec::new(),
        }
    }

    /// Add a planned course id to the year
    pub fn add_course(&mut self, course_id: String) {
        if !self.courses.contains(&course_id) {
            self.courses.push(course_id);
        }
    }
}

/// Represents a student's degree plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique id of the plan
    pub id: String,

    /// Plan name (e.g., "Unnamed Plan")
    pub name: String,

    /// Declared majors, first one is the primary major
    #[serde(default)]
    pub majors: Vec<String>,

    /// Declared minors
    #[serde(default)]
    pub minors: Vec<String>,

    /// Years in plan order
    #[serde(default)]
    pub years: Vec<Year>,
}

impl Plan {
    /// Create a new plan with no years
    ///
    /// # Arguments
    /// * `id` - Plan id
    /// * `name` - Plan name
    #[must_use]
    pub const fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            majors: Vec::new(),
            minors: Vec::new(),
            years: Vec::new(),
        }
    }

    /// Declare a major
    pub fn add_major(&mut self, major: String) {
        if !self.majors.contains(&major) {
            self.majors.push(major);
        }
    }

    /// Declare a minor
    pub fn add_minor(&mut self, minor: String) {
        if !self.minors.contains(&minor) {
            self.minors.push(minor);
        }
    }

    /// Append a year
    pub fn add_year(&mut self, year: Year) {
        self.years.push(year);
    }

    /// Primary major, if any
    #[must_use]
    pub fn primary_major(&self) -> Option<&str> {
        self.majors.first().map(String::as_str)
    }

    /// Position of the year with `year_id` in plan order
    #[must_use]
    pub fn year_index(&self, year_id: &str) -> Option<usize> {
        self.years.iter().position(|y| y.id == year_id)
    }

    /// Get a year by id
    #[must_use]
    pub fn get_year(&self, year_id: &str) -> Option<&Year> {
        self.years.iter().find(|y| y.id == year_id)
    }

    /// Total number of planned course ids across all years
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.years.iter().map(|y| y.courses.len()).sum()
    }
}
