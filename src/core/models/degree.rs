//! Degree definition model: majors and minors as written in descriptor files

use super::{FilterSpec, FineRequirement, Requirement, RequirementFilter, TOTAL_REQUIREMENT};
use crate::core::error::Result;
use serde::{Deserialize, Serialize};

/// Name of the writing-intensive requirement synthesized from `wi_credit`
pub const WRITING_INTENSIVE_REQUIREMENT: &str = "Writing Intensive";

/// Whether a definition describes a major or a minor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeKind {
    /// Primary program of study
    #[default]
    Major,
    /// Secondary program
    Minor,
}

/// Fine requirement as written in a descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FineRequirementSpec {
    /// Credits needed
    pub required_credits: f32,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Criteria text
    #[serde(default)]
    pub criteria: String,
    /// Courses that may count
    #[serde(default)]
    pub filter: FilterSpec,
    /// Courses counted here are not shared with exclusive siblings
    #[serde(default)]
    pub exclusive: bool,
}

/// Distribution as written in a descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionSpec {
    /// Requirement name
    pub name: String,
    /// Credits needed
    pub required_credits: f32,
    /// Per-course credit cap when positive
    #[serde(default)]
    pub min_credits_per_course: f32,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Criteria text
    #[serde(default)]
    pub criteria: String,
    /// Courses that may count
    #[serde(default)]
    pub filter: FilterSpec,
    /// Nested sub-rules
    #[serde(default)]
    pub fine_requirements: Vec<FineRequirementSpec>,
    /// Students pick which requirement a course counts toward
    #[serde(default)]
    pub user_select: bool,
    /// Courses counted elsewhere may count here too
    #[serde(default)]
    pub double_count: bool,
}

/// A major or minor definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeDefinition {
    /// Full degree name (e.g., "B.S. Computer Science")
    pub degree_name: String,

    /// Short name (e.g., "B.S. CS")
    pub abbrev: String,

    /// Owning department
    #[serde(default)]
    pub department: String,

    /// Major or minor
    #[serde(default)]
    pub kind: DegreeKind,

    /// Total credits for the degree, 0 when not tracked
    #[serde(default)]
    pub total_degree_credit: f32,

    /// Writing-intensive credits, 0 when not required
    #[serde(default)]
    pub wi_credit: f32,

    /// Catalog page
    #[serde(default)]
    pub url: String,

    /// Distributions in declaration order
    #[serde(default)]
    pub distributions: Vec<DistributionSpec>,
}

impl DegreeDefinition {
    /// Create an empty definition
    #[must_use]
    pub const fn new(degree_name: String, abbrev: String, kind: DegreeKind) -> Self {
        Self {
            degree_name,
            abbrev,
            department: String::new(),
            kind,
            total_degree_credit: 0.0,
            wi_credit: 0.0,
            url: String::new(),
            distributions: Vec::new(),
        }
    }

    /// Whether `name` refers to this definition by full name or abbreviation
    #[must_use]
    pub fn answers_to(&self, name: &str) -> bool {
        self.degree_name == name || self.abbrev == name
    }

    /// Instantiate zero-initialized requirements.
    ///
    /// A `"Total"` requirement is prepended when `total_degree_credit` is set
    /// and none is declared; a `"Writing Intensive"` requirement is appended
    /// when `wi_credit` is set and none is declared. Names are prefixed with
    /// `prefix` when given, except `"Total"`.
    ///
    /// # Errors
    /// Returns [`crate::core::AuditError::InvalidPattern`] if any filter pattern fails to compile
    pub fn instantiate(&self, prefix: Option<&str>) -> Result<Vec<Requirement>> {
        let declares = |name: &str| self.distributions.iter().any(|d| d.name == name);
        let mut requirements = Vec::with_capacity(self.distributions.len() + 2);

        if self.total_degree_credit > 0.0 && !declares(TOTAL_REQUIREMENT) {
            requirements.push(Requirement::total(self.total_degree_credit));
        }

        for distribution in &self.distributions {
            requirements.push(distribution.instantiate(prefix)?);
        }

        if self.wi_credit > 0.0 && !declares(WRITING_INTENSIVE_REQUIREMENT) {
            let filter = RequirementFilter::compile(&FilterSpec {
                wi: Some(true),
                ..FilterSpec::default()
            })?;
            let mut wi = Requirement::new(
                prefixed(prefix, WRITING_INTENSIVE_REQUIREMENT),
                self.wi_credit,
                filter,
            )
            .with_description("Writing-intensive courses.")
            .with_double_count(true);
            wi.criteria = "Written Intensive[W]".to_string();
            requirements.push(wi);
        }

        Ok(requirements)
    }
}

impl DistributionSpec {
    fn instantiate(&self, prefix: Option<&str>) -> Result<Requirement> {
        let name = if self.name == TOTAL_REQUIREMENT {
            self.name.clone()
        } else {
            prefixed(prefix, &self.name)
        };
        let mut requirement = Requirement::new(
            name,
            self.required_credits,
            RequirementFilter::compile(&self.filter)?,
        )
        .with_min_credits_per_course(self.min_credits_per_course)
        .with_double_count(self.double_count)
        .with_description(&self.description);
        requirement.criteria.clone_from(&self.criteria);
        requirement.user_select = self.user_select;

        for fine in &self.fine_requirements {
            let mut compiled = FineRequirement::new(
                fine.description.clone(),
                fine.required_credits,
                RequirementFilter::compile(&fine.filter)?,
            )
            .with_exclusive(fine.exclusive);
            compiled.criteria.clone_from(&fine.criteria);
            requirement = requirement.with_fine_requirement(compiled);
        }
        Ok(requirement)
    }
}

fn prefixed(prefix: Option<&str>, name: &str) -> String {
    prefix.map_or_else(|| name.to_string(), |p| format!("{p}: {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DegreeDefinition {
        toml::from_str(
            r#"
            degree_name = "B.S. Computer Science"
            abbrev = "B.S. CS"
            total_degree_credit = 120
            wi_credit = 6

            [[distributions]]
            name = "Computer Science"
            required_credits = 40
            [distributions.filter]
            department = "/^EN Computer Science$/"

            [[distributions.fine_requirements]]
            description = "Upper level"
            required_credits = 13
            exclusive = true
            [distributions.fine_requirements.filter]
            number = "/EN.601.[3-7]/"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_answers_to_name_or_abbrev() {
        let def = sample();
        assert!(def.answers_to("B.S. Computer Science"));
        assert!(def.answers_to("B.S. CS"));
        assert!(!def.answers_to("Computer Science"));
        assert_eq!(def.kind, DegreeKind::Major);
    }

    #[test]
    fn test_instantiate_adds_total_and_wi() {
        let requirements = sample().instantiate(None).unwrap();
        let names: Vec<&str> = requirements.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Total", "Computer Science", "Writing Intensive"]);
        assert!(requirements[0].is_total());
        assert_eq!(requirements[1].fine_requirements.len(), 1);
        assert!(requirements[1].fine_requirements[0].exclusive);
        assert!(requirements.iter().all(|r| r.planned_credits.abs() < f32::EPSILON));
    }

    #[test]
    fn test_instantiate_with_prefix_keeps_total_name() {
        let mut def = sample();
        def.distributions.push(DistributionSpec {
            name: "Total".to_string(),
            required_credits: 120.0,
            ..DistributionSpec::default()
        });
        let requirements = def.instantiate(Some("Minor in CS")).unwrap();
        let names: Vec<&str> = requirements.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Minor in CS: Computer Science",
                "Total",
                "Minor in CS: Writing Intensive"
            ]
        );
    }

    #[test]
    fn test_instantiate_propagates_bad_pattern() {
        let mut def = sample();
        def.distributions[0].filter.title = Some("/[/".to_string());
        assert!(def.instantiate(None).is_err());
    }
}
