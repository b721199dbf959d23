//! Filter matching.
//!
//! The two operations have opposite defaults and must not be merged:
//! - [`fully_satisfies`]: every defined predicate must pass; an empty filter matches everything.
//! - [`could_count_toward`]: any defined predicate passing is enough; an empty filter matches nothing.
//!
//! In both, a course matching the exception filter (checked non-strictly) is rejected.

use crate::core::models::{Course, RequirementFilter};

/// Whether `course` matches the filter's exception, which always forces rejection
#[must_use]
pub fn is_excluded(filter: &RequirementFilter, course: &Course) -> bool {
    filter
        .exception()
        .is_some_and(|exception| could_count_toward(exception, course))
}

/// Strict match: does `course` fully satisfy every defined predicate?
#[must_use]
pub fn fully_satisfies(filter: &RequirementFilter, course: &Course) -> bool {
    if is_excluded(filter, course) {
        return false;
    }
    filter.predicates().iter().all(|p| p.matches(course))
}

/// Non-strict match: could `course` count toward the requirement at all?
///
/// Any single matching predicate is enough. This reproduces the existing
/// bucket-assignment behavior; a course sharing one incidental attribute with
/// the filter is accepted.
#[must_use]
pub fn could_count_toward(filter: &RequirementFilter, course: &Course) -> bool {
    if is_excluded(filter, course) {
        return false;
    }
    filter.predicates().iter().any(|p| p.matches(course))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Pattern, Predicate};

    fn pattern(raw: &str) -> Pattern {
        Pattern::compile(raw).unwrap()
    }

    fn cs_course() -> Course {
        let mut course = Course::new(
            "EN.601.226".to_string(),
            "Data Structures".to_string(),
            4.0,
        )
        .with_areas("EQ")
        .with_department("EN Computer Science");
        course.add_tag("CSCI-SOFT".to_string());
        course
    }

    fn math_course() -> Course {
        Course::new("AS.110.108".to_string(), "Calculus I".to_string(), 4.0)
            .with_areas("Q")
            .with_department("AS Mathematics")
    }

    fn single_predicates() -> Vec<Predicate> {
        vec![
            Predicate::Area(pattern("/E/")),
            Predicate::Tags(vec!["CSCI-SOFT".to_string()]),
            Predicate::WritingIntensive(true),
            Predicate::Department(pattern("/^EN Computer Science$/")),
            Predicate::Number(vec![pattern("/EN.601/")]),
            Predicate::Title(pattern("/Structures/")),
        ]
    }

    #[test]
    fn test_empty_filter_asymmetry() {
        let filter = RequirementFilter::empty();
        for course in [cs_course(), math_course()] {
            assert!(fully_satisfies(&filter, &course));
            assert!(!could_count_toward(&filter, &course));
        }
    }

    #[test]
    fn test_single_predicate_modes_agree() {
        for predicate in single_predicates() {
            let filter = RequirementFilter::empty().with(predicate);
            for course in [cs_course(), math_course()] {
                assert_eq!(
                    fully_satisfies(&filter, &course),
                    could_count_toward(&filter, &course),
                    "modes disagree for {:?} on {}",
                    filter.predicates()[0].attribute(),
                    course.number
                );
            }
        }
    }

    #[test]
    fn test_strict_requires_all_predicates() {
        let filter = RequirementFilter::empty()
            .with(Predicate::Area(pattern("/Q/")))
            .with(Predicate::Department(pattern("/Computer/")));

        assert!(fully_satisfies(&filter, &cs_course()));
        assert!(!fully_satisfies(&filter, &math_course()));
    }

    #[test]
    fn test_non_strict_accepts_any_predicate() {
        let filter = RequirementFilter::empty()
            .with(Predicate::Area(pattern("/Q/")))
            .with(Predicate::Department(pattern("/Computer/")));

        assert!(could_count_toward(&filter, &cs_course()));
        assert!(could_count_toward(&filter, &math_course()));
    }

    #[test]
    fn test_exception_short_circuits_both_modes() {
        let filter = RequirementFilter::empty()
            .with(Predicate::Department(pattern("/Computer/")))
            .with_exception(
                RequirementFilter::empty().with(Predicate::Number(vec![pattern("/EN.601.226/")])),
            );

        let course = cs_course();
        assert!(is_excluded(&filter, &course));
        assert!(!fully_satisfies(&filter, &course));
        assert!(!could_count_toward(&filter, &course));
    }

    #[test]
    fn test_empty_exception_excludes_nothing() {
        let filter = RequirementFilter::empty()
            .with(Predicate::Area(pattern("/Q/")))
            .with_exception(RequirementFilter::empty());

        assert!(!is_excluded(&filter, &math_course()));
        assert!(could_count_toward(&filter, &math_course()));
    }
}
