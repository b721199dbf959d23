//! Markdown report generator
//!
//! Generates audit reports as Markdown tables. These render well in GitHub,
//! GitLab and VS Code.

use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/audit.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    fn render_template(ctx: &ReportContext) -> String {
        let summary = &ctx.audit.summary;
        let consistency_note = if ctx.audit.consistent {
            String::new()
        } else {
            "> ⚠️ The plan lists courses that are missing from its course list; \
             those ids were skipped.\n"
                .to_string()
        };

        MARKDOWN_TEMPLATE
            .replace("{{plan_name}}", &escape_cell(ctx.plan_name()))
            .replace("{{major}}", &escape_cell(ctx.major_name()))
            .replace("{{minors}}", &escape_cell(&ctx.minors()))
            .replace("{{planned_credits}}", &ctx.planned_credits())
            .replace("{{overall}}", ctx.overall_label())
            .replace("{{satisfied}}", &summary.satisfied.to_string())
            .replace("{{requirement_count}}", &summary.total().to_string())
            .replace("{{consistency_note}}", &consistency_note)
            .replace("{{requirements_table}}", &Self::requirements_table(ctx))
            .replace("{{fine_requirements}}", &Self::fine_requirements(ctx))
            .replace("{{prerequisites}}", &Self::prerequisites(ctx))
    }

    /// Generate the per-requirement progress table
    fn requirements_table(ctx: &ReportContext) -> String {
        let rows = ctx.requirement_rows();
        if rows.is_empty() {
            return "_No requirements configured for this major._\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Requirement | Status | Credits | Progress | Courses |\n");
        table.push_str("|---|---|---|---|---|\n");
        for row in rows {
            let courses = if row.courses.is_empty() {
                "-".to_string()
            } else {
                row.courses
            };
            let _ = writeln!(
                table,
                "| {} | {} | {} / {} | {}% | {} |",
                escape_cell(&row.name),
                row.status,
                row.planned,
                row.required,
                row.percent,
                courses
            );
        }
        table
    }

    /// Generate one bullet list per requirement with fine requirements
    fn fine_requirements(ctx: &ReportContext) -> String {
        let mut out = String::new();
        for row in ctx.requirement_rows().into_iter().filter(|r| !r.fine.is_empty()) {
            let _ = writeln!(out, "**{}**\n", row.name);
            for fine in &row.fine {
                let _ = writeln!(
                    out,
                    "- {} ({}): {} / {}",
                    fine.description, fine.status, fine.planned, fine.required
                );
            }
            out.push('\n');
        }
        if out.is_empty() {
            out.push_str("_None._\n");
        }
        out
    }

    /// Generate the unmet prerequisite table
    fn prerequisites(ctx: &ReportContext) -> String {
        let unmet = ctx.unmet_prerequisites();
        if unmet.is_empty() {
            return "All prerequisites are planned in earlier terms.\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Course | Year | Term | Missing |\n");
        table.push_str("|---|---|---|---|\n");
        for status in unmet {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} |",
                status.number,
                escape_cell(&status.year),
                status.term,
                status.missing.join(", ")
            );
        }
        table
    }
}

/// Escape pipe characters so user text can't break table layout
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::render_template(ctx))
    }
}
