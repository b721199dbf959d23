//! HTML report generator
//!
//! Renders a self-contained HTML page with embedded CSS. User-supplied text is
//! escaped by the template engine.

use crate::core::audit::PrerequisiteStatus;
use crate::core::report::{ReportContext, ReportGenerator, RequirementRow};
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Template data for `audit.html`
#[derive(Template)]
#[template(path = "audit.html")]
struct AuditPage<'a> {
    plan_name: &'a str,
    major: &'a str,
    minors: String,
    overall: &'static str,
    planned_credits: String,
    satisfied: usize,
    requirement_count: usize,
    consistent: bool,
    rows: Vec<RequirementRow>,
    unmet: Vec<&'a PrerequisiteStatus>,
}

impl<'a> AuditPage<'a> {
    fn from_context(ctx: &ReportContext<'a>) -> Self {
        let audit = ctx.audit;
        Self {
            plan_name: &audit.plan_name,
            major: audit.major.as_deref().unwrap_or("(no major declared)"),
            minors: ctx.minors(),
            overall: ctx.overall_label(),
            planned_credits: ctx.planned_credits(),
            satisfied: audit.summary.satisfied,
            requirement_count: audit.summary.total(),
            consistent: audit.consistent,
            rows: ctx.requirement_rows(),
            unmet: ctx.unmet_prerequisites(),
        }
    }
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(AuditPage::from_context(ctx).render()?)
    }
}
