//! Data models for `DegreeAudit`

pub mod catalog;
pub mod course;
pub mod degree;
pub mod filter;
pub mod plan;
pub mod planned_course;
pub mod requirement;
pub mod term;

pub use catalog::Catalog;
pub use course::{Course, Restriction};
pub use degree::{
    DegreeDefinition, DegreeKind, DistributionSpec, FineRequirementSpec,
    WRITING_INTENSIVE_REQUIREMENT,
};
pub use filter::{FilterSpec, NumberSpec, Pattern, Predicate, RequirementFilter};
pub use plan::{Plan, Year};
pub use planned_course::PlannedCourse;
pub use requirement::{Assignment, FineRequirement, Fulfillment, Requirement, TOTAL_REQUIREMENT};
pub use term::{Term, TermOrder};
