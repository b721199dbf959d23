//! Prerequisite checking against a plan's schedule

use crate::core::models::{Catalog, Plan, PlannedCourse, Term, TermOrder};

/// Sort key for a scheduled slot: year position in the plan, then term rank
type Slot = (usize, usize);

fn slot(plan: &Plan, year_id: &str, term: Term, term_order: &TermOrder) -> Option<Slot> {
    plan.year_index(year_id)
        .map(|year| (year, term_order.rank(term)))
}

/// Prerequisites of `course_number` that are not planned strictly before the
/// given year and term.
///
/// Only planned courses belonging to `plan` are considered. A course absent
/// from the catalog has no known prerequisites and yields an empty list. If
/// `year_id` is not part of the plan every prerequisite is reported missing.
#[must_use]
pub fn missing_prerequisites(
    course_number: &str,
    plan_courses: &[PlannedCourse],
    plan: &Plan,
    year_id: &str,
    term: Term,
    catalog: &Catalog,
    term_order: &TermOrder,
) -> Vec<String> {
    let Some(course) = catalog.get_course(course_number) else {
        return Vec::new();
    };
    let target = slot(plan, year_id, term, term_order);

    course
        .prerequisites
        .iter()
        .filter(|prereq| {
            let planned_earlier = target.is_some_and(|target| {
                plan_courses
                    .iter()
                    .filter(|pc| pc.plan_id == plan.id && pc.number == **prereq)
                    .filter_map(|pc| slot(plan, &pc.year_id, pc.term, term_order))
                    .any(|earlier| earlier < target)
            });
            !planned_earlier
        })
        .cloned()
        .collect()
}

/// Whether every prerequisite of `course_number` is planned strictly earlier
/// than the given year and term
#[must_use]
pub fn is_satisfied(
    course_number: &str,
    plan_courses: &[PlannedCourse],
    plan: &Plan,
    year_id: &str,
    term: Term,
    catalog: &Catalog,
    term_order: &TermOrder,
) -> bool {
    missing_prerequisites(
        course_number,
        plan_courses,
        plan,
        year_id,
        term,
        catalog,
        term_order,
    )
    .is_empty()
}
