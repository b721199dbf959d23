//! Report generation for plan audits
//!
//! Renders a [`PlanAudit`] as Markdown or HTML. Reports show per-requirement
//! progress, the courses counted toward each requirement and any unmet
//! prerequisites.

pub mod formats;

use crate::core::audit::{PlanAudit, PrerequisiteStatus};
use crate::core::models::{FineRequirement, Fulfillment, Requirement};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Display-ready view of one fine requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FineRow {
    /// Description text
    pub description: String,
    /// Fulfillment label
    pub status: &'static str,
    /// Credits counted, formatted
    pub planned: String,
    /// Credits needed, formatted
    pub required: String,
}

/// Display-ready view of one requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementRow {
    /// Requirement name
    pub name: String,
    /// Fulfillment label
    pub status: &'static str,
    /// Credits counted, formatted
    pub planned: String,
    /// Credits needed, formatted
    pub required: String,
    /// Progress toward the target, 0-100
    pub percent: u32,
    /// Course numbers counted, comma separated
    pub courses: String,
    /// Criteria text
    pub criteria: String,
    /// Nested fine requirements
    pub fine: Vec<FineRow>,
}

impl RequirementRow {
    fn from_requirement(requirement: &Requirement) -> Self {
        let courses: Vec<&str> = requirement
            .assignments
            .iter()
            .map(|a| a.number.as_str())
            .collect();
        Self {
            name: requirement.name.clone(),
            status: requirement.fulfillment().label(),
            planned: format!("{:.1}", requirement.planned_credits),
            required: format!("{:.1}", requirement.required_credits),
            percent: progress_percent(requirement.planned_credits, requirement.required_credits),
            courses: courses.join(", "),
            criteria: requirement.criteria.clone(),
            fine: requirement.fine_requirements.iter().map(FineRow::from_fine).collect(),
        }
    }
}

impl FineRow {
    fn from_fine(fine: &FineRequirement) -> Self {
        Self {
            description: fine.description.clone(),
            status: fine.fulfillment().label(),
            planned: format!("{:.1}", fine.planned_credits),
            required: format!("{:.1}", fine.required_credits),
        }
    }
}

/// Progress percentage, clamped to 0-100
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress_percent(planned: f32, required: f32) -> u32 {
    if planned <= 0.0 {
        return 0;
    }
    if required <= 0.0 {
        return 100;
    }
    ((planned / required) * 100.0).clamp(0.0, 100.0).round() as u32
}

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Audit being reported
    pub audit: &'a PlanAudit,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(audit: &'a PlanAudit) -> Self {
        Self { audit }
    }

    /// Plan name
    #[must_use]
    pub fn plan_name(&self) -> &str {
        &self.audit.plan_name
    }

    /// Major name or a placeholder when none is declared
    #[must_use]
    pub fn major_name(&self) -> &str {
        self.audit.major.as_deref().unwrap_or("(no major declared)")
    }

    /// Minors joined for display, `-` when none
    #[must_use]
    pub fn minors(&self) -> String {
        if self.audit.minors.is_empty() {
            "-".to_string()
        } else {
            self.audit.minors.join(", ")
        }
    }

    /// Overall state label
    #[must_use]
    pub fn overall_label(&self) -> &'static str {
        self.audit
            .overall()
            .map_or("no requirements configured", |f: Fulfillment| f.label())
    }

    /// Total planned credits, formatted
    #[must_use]
    pub fn planned_credits(&self) -> String {
        format!("{:.1}", self.audit.summary.planned_credits)
    }

    /// One row per top-level requirement
    #[must_use]
    pub fn requirement_rows(&self) -> Vec<RequirementRow> {
        self.audit
            .requirements
            .iter()
            .map(RequirementRow::from_requirement)
            .collect()
    }

    /// Courses with unmet prerequisites
    #[must_use]
    pub fn unmet_prerequisites(&self) -> Vec<&'a PrerequisiteStatus> {
        self.audit.unmet_prerequisites().collect()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0.0, 3.0), 0);
        assert_eq!(progress_percent(1.5, 3.0), 50);
        assert_eq!(progress_percent(6.0, 3.0), 100);
        assert_eq!(progress_percent(0.0, 0.0), 0);
        assert_eq!(progress_percent(1.0, 0.0), 100);
    }
}
