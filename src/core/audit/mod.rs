//! Requirement evaluation.
//!
//! The pipeline is one-way: a [`PlanSnapshot`] goes in, [`audit_plan`] runs
//! the resolver, the accumulator and the prerequisite checker, and an immutable
//! [`PlanAudit`] comes out. Nothing here performs I/O; snapshots are loaded
//! through `core::planner`.

pub mod accumulator;
pub mod matcher;
pub mod prerequisites;
pub mod resolver;

pub use accumulator::{accumulate, assignments_by_course};
pub use matcher::{could_count_toward, fully_satisfies};
pub use prerequisites::{is_satisfied, missing_prerequisites};
pub use resolver::RequirementResolver;

use crate::core::error::Result;
use crate::core::models::{Catalog, Fulfillment, Plan, PlannedCourse, Requirement, Term, TermOrder};
use crate::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Consistent point-in-time view of a plan, its courses and the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSnapshot {
    /// The plan being audited
    pub plan: Plan,
    /// Planned course instances referenced by the plan's years
    #[serde(default)]
    pub courses: Vec<PlannedCourse>,
    /// Catalog records for the planned courses
    #[serde(default)]
    pub catalog: Catalog,
}

impl PlanSnapshot {
    /// Create a snapshot
    #[must_use]
    pub const fn new(plan: Plan, courses: Vec<PlannedCourse>, catalog: Catalog) -> Self {
        Self {
            plan,
            courses,
            catalog,
        }
    }

    /// Course ids listed in the plan's years that have no planned course
    #[must_use]
    pub fn missing_course_ids(&self) -> Vec<&str> {
        self.plan
            .years
            .iter()
            .flat_map(|y| y.courses.iter())
            .filter(|id| !self.courses.iter().any(|c| &c.id == *id))
            .map(String::as_str)
            .collect()
    }

    /// Whether every course id in the plan's years resolves to a planned course
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.missing_course_ids().is_empty()
    }

    /// Planned courses in plan order: by year, then by position within the year.
    ///
    /// Courses not listed in any year are appended in list order.
    #[must_use]
    pub fn ordered_courses(&self) -> Vec<&PlannedCourse> {
        let by_id: HashMap<&str, &PlannedCourse> =
            self.courses.iter().map(|c| (c.id.as_str(), c)).collect();
        let mut ordered: Vec<&PlannedCourse> = self
            .plan
            .years
            .iter()
            .flat_map(|y| y.courses.iter())
            .filter_map(|id| by_id.get(id.as_str()).copied())
            .collect();
        for course in &self.courses {
            if !ordered.iter().any(|c| c.id == course.id) {
                ordered.push(course);
            }
        }
        ordered
    }
}

/// Aggregate counts over the top-level requirements
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AuditSummary {
    /// Requirements fully met
    pub satisfied: usize,
    /// Requirements with some credit
    pub partial: usize,
    /// Requirements with no credit
    pub unsatisfied: usize,
    /// Credits across every planned course
    pub planned_credits: f32,
}

impl AuditSummary {
    /// Tally fulfillment states of `requirements`
    #[must_use]
    pub fn from_requirements(requirements: &[Requirement], planned_credits: f32) -> Self {
        let mut summary = Self {
            planned_credits,
            ..Self::default()
        };
        for requirement in requirements {
            match requirement.fulfillment() {
                Fulfillment::Satisfied => summary.satisfied += 1,
                Fulfillment::Partial => summary.partial += 1,
                Fulfillment::Unsatisfied => summary.unsatisfied += 1,
            }
        }
        summary
    }

    /// Number of requirements counted
    #[must_use]
    pub const fn total(&self) -> usize {
        self.satisfied + self.partial + self.unsatisfied
    }

    /// Overall state, `None` when there are no requirements
    #[must_use]
    pub const fn overall(&self) -> Option<Fulfillment> {
        if self.total() == 0 {
            None
        } else if self.satisfied == self.total() {
            Some(Fulfillment::Satisfied)
        } else if self.unsatisfied == self.total() {
            Some(Fulfillment::Unsatisfied)
        } else {
            Some(Fulfillment::Partial)
        }
    }
}

/// Prerequisite status of one planned course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteStatus {
    /// Planned course id
    pub course_id: String,
    /// Catalog number
    pub number: String,
    /// Name of the year the course is planned in
    pub year: String,
    /// Term the course is planned in
    pub term: Term,
    /// Prerequisites not planned earlier
    pub missing: Vec<String>,
}

impl PrerequisiteStatus {
    /// Whether every prerequisite is planned earlier
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Derived, read-only result of auditing a plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanAudit {
    /// Plan name
    pub plan_name: String,
    /// Major the requirements were resolved for
    pub major: Option<String>,
    /// Declared minors
    pub minors: Vec<String>,
    /// Requirement tree with tallies
    pub requirements: Vec<Requirement>,
    /// Aggregate counts
    pub summary: AuditSummary,
    /// Planned courses in plan order with `distribution_ids` filled in
    pub courses: Vec<PlannedCourse>,
    /// Per-course prerequisite status, in plan order
    pub prerequisites: Vec<PrerequisiteStatus>,
    /// Whether the snapshot's years and course list agreed
    pub consistent: bool,
}

impl PlanAudit {
    /// Courses with at least one unmet prerequisite
    pub fn unmet_prerequisites(&self) -> impl Iterator<Item = &PrerequisiteStatus> {
        self.prerequisites.iter().filter(|p| !p.is_satisfied())
    }

    /// Overall fulfillment, `None` when no requirements are configured
    #[must_use]
    pub const fn overall(&self) -> Option<Fulfillment> {
        self.summary.overall()
    }
}

/// Audit a plan snapshot.
///
/// Resolves the plan's first major and its minors, counts the planned courses
/// toward the resulting requirements and checks every course's prerequisites.
/// Course ids that resolve to no planned course are skipped with a warning and
/// the audit is marked inconsistent; the remaining courses are still evaluated.
///
/// # Errors
/// Returns an error if a requirement definition holds an invalid pattern
pub fn audit_plan(
    snapshot: &PlanSnapshot,
    resolver: &RequirementResolver,
    term_order: &TermOrder,
) -> Result<PlanAudit> {
    let plan = &snapshot.plan;
    let major = plan.primary_major().map(str::to_string);
    let requirements = match &major {
        Some(major) => resolver.resolve(major, &plan.minors)?,
        None => {
            warn!("Plan '{}' declares no major", plan.name);
            Vec::new()
        }
    };

    let consistent = snapshot.is_consistent();
    if !consistent {
        warn!(
            "Plan '{}' lists course ids with no planned course ({}); skipping them",
            plan.name,
            snapshot.missing_course_ids().join(", ")
        );
    }
    let courses: Vec<PlannedCourse> = snapshot.ordered_courses().into_iter().cloned().collect();

    let requirements = accumulate(&requirements, &courses, &snapshot.catalog);
    let courses = with_distribution_ids(courses, &assignments_by_course(&requirements));
    let prerequisites = check_prerequisites(plan, &courses, &snapshot.catalog, term_order);
    let planned_credits = courses.iter().map(|c| c.credits).sum();
    let summary = AuditSummary::from_requirements(&requirements, planned_credits);
    debug!(
        "Audited '{}': {}/{} requirements satisfied",
        plan.name,
        summary.satisfied,
        summary.total()
    );

    Ok(PlanAudit {
        plan_name: plan.name.clone(),
        major,
        minors: plan.minors.clone(),
        requirements,
        summary,
        courses,
        prerequisites,
        consistent,
    })
}

fn with_distribution_ids(
    mut courses: Vec<PlannedCourse>,
    assignments: &BTreeMap<String, Vec<String>>,
) -> Vec<PlannedCourse> {
    for course in &mut courses {
        course.distribution_ids = assignments.get(&course.id).cloned().unwrap_or_default();
    }
    courses
}

fn check_prerequisites(
    plan: &Plan,
    courses: &[PlannedCourse],
    catalog: &Catalog,
    term_order: &TermOrder,
) -> Vec<PrerequisiteStatus> {
    courses
        .iter()
        .map(|course| PrerequisiteStatus {
            course_id: course.id.clone(),
            number: course.number.clone(),
            year: plan
                .get_year(&course.year_id)
                .map_or_else(|| course.year_id.clone(), |y| y.name.clone()),
            term: course.term,
            missing: missing_prerequisites(
                &course.number,
                courses,
                plan,
                &course.year_id,
                course.term,
                catalog,
                term_order,
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Course, Year};

    fn snapshot() -> PlanSnapshot {
        let mut plan = Plan::new("p1".to_string(), "My Plan".to_string());
        plan.add_major("B.S. Computer Science".to_string());
        let mut year = Year::new("y1".to_string(), "Freshman".to_string(), 2023);
        year.add_course("c2".to_string());
        year.add_course("c1".to_string());
        plan.add_year(year);

        let mut intermediate = Course::new(
            "EN.601.220".to_string(),
            "Intermediate Programming".to_string(),
            4.0,
        )
        .with_department("EN Computer Science");
        intermediate.add_prerequisite("EN.601.113".to_string());
        let intro = Course::new("EN.601.113".to_string(), "Intro".to_string(), 3.0)
            .with_department("EN Computer Science");
        let catalog: Catalog = vec![intermediate.clone(), intro.clone()].into();

        let courses = vec![
            PlannedCourse::from_catalog(
                "c1".to_string(),
                &intermediate,
                Term::Spring,
                "y1".to_string(),
                "p1".to_string(),
            ),
            PlannedCourse::from_catalog(
                "c2".to_string(),
                &intro,
                Term::Fall,
                "y1".to_string(),
                "p1".to_string(),
            ),
        ];
        PlanSnapshot::new(plan, courses, catalog)
    }

    #[test]
    fn test_ordered_courses_follow_years() {
        let snapshot = snapshot();
        let ids: Vec<&str> = snapshot
            .ordered_courses()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c2", "c1"]);
    }

    #[test]
    fn test_audit_plan_fills_distribution_ids() {
        let resolver = RequirementResolver::with_builtin().unwrap();
        let audit = audit_plan(&snapshot(), &resolver, &TermOrder::default()).unwrap();

        assert!(audit.consistent);
        assert_eq!(audit.major.as_deref(), Some("B.S. Computer Science"));
        assert!(audit.courses[0]
            .distribution_ids
            .contains(&"Computer Science".to_string()));
        assert_eq!(audit.unmet_prerequisites().count(), 0);
        assert!((audit.summary.planned_credits - 7.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_inconsistent_snapshot_skips_dangling_ids() {
        let mut snapshot = snapshot();
        snapshot.plan.years[0].add_course("ghost".to_string());
        assert_eq!(snapshot.missing_course_ids(), vec!["ghost"]);

        let resolver = RequirementResolver::with_builtin().unwrap();
        let audit = audit_plan(&snapshot, &resolver, &TermOrder::default()).unwrap();
        assert!(!audit.consistent);
        assert_eq!(audit.courses.len(), 2);
        assert_eq!(audit.prerequisites.len(), 2);
        let total = audit.requirements.iter().find(|r| r.is_total()).unwrap();
        assert!((total.planned_credits - 7.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_major_has_no_overall_state() {
        let mut snapshot = snapshot();
        snapshot.plan.majors = vec!["B.A. Nothing".to_string()];
        let resolver = RequirementResolver::with_builtin().unwrap();
        let audit = audit_plan(&snapshot, &resolver, &TermOrder::default()).unwrap();
        assert!(audit.requirements.is_empty());
        assert_eq!(audit.overall(), None);
    }

    #[test]
    fn test_summary_overall() {
        let mut met = Requirement::total(3.0);
        met.planned_credits = 3.0;
        let unmet = Requirement::total(3.0);

        let all_met = AuditSummary::from_requirements(std::slice::from_ref(&met), 3.0);
        assert_eq!(all_met.overall(), Some(Fulfillment::Satisfied));
        let mixed = AuditSummary::from_requirements(&[met, unmet.clone()], 3.0);
        assert_eq!(mixed.overall(), Some(Fulfillment::Partial));
        let none_met = AuditSummary::from_requirements(&[unmet], 0.0);
        assert_eq!(none_met.overall(), Some(Fulfillment::Unsatisfied));
    }
}
