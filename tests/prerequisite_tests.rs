//! Integration tests for prerequisite checking over a loaded snapshot

use degree_audit::core::audit::{audit_plan, is_satisfied, missing_prerequisites, PlanSnapshot, RequirementResolver};
use degree_audit::core::models::{Term, TermOrder};
use degree_audit::core::planner::{JsonSnapshotSource, PlanSource};

fn sample_snapshot() -> PlanSnapshot {
    JsonSnapshotSource::new("samples/snapshots/cs_two_years.json")
        .with_catalog("samples/catalog.json")
        .load()
        .expect("Failed to load sample snapshot")
}

fn unmet_numbers(snapshot: &PlanSnapshot, term_order: &TermOrder) -> Vec<String> {
    let resolver = RequirementResolver::with_builtin().unwrap();
    let audit = audit_plan(snapshot, &resolver, term_order).unwrap();
    audit
        .unmet_prerequisites()
        .map(|status| status.number.clone())
        .collect()
}

#[test]
fn test_algorithms_missing_data_structures_and_discrete() {
    let snapshot = sample_snapshot();
    let missing = missing_prerequisites(
        "EN.601.433",
        &snapshot.courses,
        &snapshot.plan,
        "y2",
        Term::Fall,
        &snapshot.catalog,
        &TermOrder::default(),
    );
    assert_eq!(missing, vec!["EN.601.226".to_string(), "EN.553.171".to_string()]);
}

#[test]
fn test_same_year_earlier_term_is_satisfied() {
    let snapshot = sample_snapshot();
    // Intermediate Programming in Freshman Spring after Gateway in Freshman Fall
    assert!(is_satisfied(
        "EN.601.220",
        &snapshot.courses,
        &snapshot.plan,
        "y1",
        Term::Spring,
        &snapshot.catalog,
        &TermOrder::default(),
    ));
    assert!(!is_satisfied(
        "EN.601.220",
        &snapshot.courses,
        &snapshot.plan,
        "y1",
        Term::Fall,
        &snapshot.catalog,
        &TermOrder::default(),
    ));
}

#[test]
fn test_audit_reports_only_unmet_courses() {
    let snapshot = sample_snapshot();
    assert_eq!(
        unmet_numbers(&snapshot, &TermOrder::default()),
        vec!["EN.601.433".to_string()]
    );
}

#[test]
fn test_term_order_changes_results() {
    let snapshot = sample_snapshot();
    let spring_first = TermOrder::parse_list("Spring,Fall").unwrap();
    assert_eq!(
        unmet_numbers(&snapshot, &spring_first),
        vec![
            "EN.601.220".to_string(),
            "AS.110.109".to_string(),
            "EN.601.433".to_string(),
        ]
    );
}

#[test]
fn test_placeholder_has_no_prerequisites() {
    let snapshot = sample_snapshot();
    assert!(is_satisfied(
        "XX.000.001",
        &snapshot.courses,
        &snapshot.plan,
        "y1",
        Term::Fall,
        &snapshot.catalog,
        &TermOrder::default(),
    ));
}

#[test]
fn test_inconsistent_snapshot_still_checks_resolved_courses() {
    let snapshot = JsonSnapshotSource::new("samples/snapshots/inconsistent.json")
        .load()
        .unwrap();
    assert!(!snapshot.is_consistent());

    let resolver = RequirementResolver::with_builtin().unwrap();
    let audit = audit_plan(&snapshot, &resolver, &TermOrder::default()).unwrap();
    assert!(!audit.consistent);
    assert_eq!(audit.prerequisites.len(), 1);

    let unmet: Vec<_> = audit.unmet_prerequisites().collect();
    assert_eq!(unmet.len(), 1);
    assert_eq!(unmet[0].number, "EN.601.220");
    assert_eq!(unmet[0].missing, vec!["EN.601.113".to_string()]);
}
