//! Fulfillment accumulation: counts planned courses toward requirements.
//!
//! [`accumulate`] is pure. It clones the requirement tree, zeroes every tally
//! and recomputes from the course list, so calling it twice with the same
//! inputs gives the same tree.

use super::matcher::{could_count_toward, fully_satisfies};
use crate::core::models::{
    Assignment, Catalog, Course, FineRequirement, PlannedCourse, Requirement,
};
use crate::debug;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};

/// Count `courses` toward `requirements` and return the updated tree.
///
/// Requirements are processed in declaration order and courses in plan order.
/// A course counts toward at most one top-level requirement unless a later
/// requirement allows double counting. `"Total"` counts every course with no
/// cap. Fine requirements are evaluated against all courses, independently of
/// their parent's tally, and a course must match every field of a fine filter.
#[must_use]
pub fn accumulate(
    requirements: &[Requirement],
    courses: &[PlannedCourse],
    catalog: &Catalog,
) -> Vec<Requirement> {
    let resolved: Vec<(&PlannedCourse, Cow<'_, Course>)> = courses
        .iter()
        .map(|planned| (planned, resolve_course(planned, catalog)))
        .collect();

    let mut assigned: HashSet<&str> = HashSet::new();
    let mut result = Vec::with_capacity(requirements.len());

    for requirement in requirements {
        let mut requirement = requirement.clone();
        requirement.reset();

        if requirement.is_total() {
            for (planned, _) in &resolved {
                record(&mut requirement.assignments, planned, planned.credits);
                requirement.planned_credits += planned.credits;
            }
        } else {
            for (planned, course) in &resolved {
                if assigned.contains(planned.id.as_str()) && !requirement.double_count {
                    continue;
                }
                if requirement.planned_credits >= requirement.required_credits {
                    break;
                }
                if !could_count_toward(&requirement.filter, course) {
                    continue;
                }
                let credits = course_credit(planned.credits, requirement.min_credits_per_course);
                requirement.planned_credits += credits;
                record(&mut requirement.assignments, planned, credits);
                assigned.insert(planned.id.as_str());
                debug!(
                    "{} counts {credits} credits toward '{}'",
                    planned.number, requirement.name
                );
            }
        }

        accumulate_fine(&mut requirement.fine_requirements, &resolved);
        result.push(requirement);
    }

    result
}

fn accumulate_fine(
    fine_requirements: &mut [FineRequirement],
    resolved: &[(&PlannedCourse, Cow<'_, Course>)],
) {
    let mut exclusive_taken: HashSet<&str> = HashSet::new();

    for fine in fine_requirements {
        for (planned, course) in resolved {
            if fine.planned_credits >= fine.required_credits {
                break;
            }
            if fine.exclusive && exclusive_taken.contains(planned.id.as_str()) {
                continue;
            }
            if !fully_satisfies(&fine.filter, course) {
                continue;
            }
            fine.planned_credits += planned.credits;
            record(&mut fine.assignments, planned, planned.credits);
            if fine.exclusive {
                exclusive_taken.insert(planned.id.as_str());
            }
        }
    }
}

/// Catalog record for a planned course, or a placeholder synthesized from its
/// own fields when it is a placeholder or missing from the catalog.
#[must_use]
pub fn resolve_course<'a>(planned: &PlannedCourse, catalog: &'a Catalog) -> Cow<'a, Course> {
    if planned.is_placeholder {
        return Cow::Owned(planned.to_placeholder_course());
    }
    catalog.get_course(&planned.number).map_or_else(
        || {
            debug!(
                "{} not in catalog, using placeholder fields",
                planned.number
            );
            Cow::Owned(planned.to_placeholder_course())
        },
        Cow::Borrowed,
    )
}

/// Credits a course contributes: capped by the per-course value when positive.
fn course_credit(credits: f32, min_credits_per_course: f32) -> f32 {
    if min_credits_per_course > 0.0 {
        credits.min(min_credits_per_course)
    } else {
        credits
    }
}

fn record(assignments: &mut Vec<Assignment>, planned: &PlannedCourse, credits: f32) {
    assignments.push(Assignment {
        course_id: planned.id.clone(),
        number: planned.number.clone(),
        credits,
    });
}

/// Map each planned course id to the names of the top-level requirements it
/// counts toward, in requirement order. `"Total"` is omitted.
#[must_use]
pub fn assignments_by_course(requirements: &[Requirement]) -> BTreeMap<String, Vec<String>> {
    let mut by_course: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for requirement in requirements.iter().filter(|r| !r.is_total()) {
        for assignment in &requirement.assignments {
            by_course
                .entry(assignment.course_id.clone())
                .or_default()
                .push(requirement.name.clone());
        }
    }
    by_course
}
