//! Audit command handler
//!
//! Evaluates each snapshot against its major and minors, prints progress and
//! optionally writes a report.

use super::{build_resolver, snapshot_source, term_order};
use degree_audit::config::Config;
use degree_audit::core::audit::{audit_plan, PlanAudit, RequirementResolver};
use degree_audit::core::models::{Fulfillment, TermOrder};
use degree_audit::core::planner::PlanSource;
use degree_audit::core::report::{ReportContext, ReportFormat};
use degree_audit::{error, info, verbose};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Options shared by every snapshot in one invocation
#[derive(Debug, Default)]
pub struct AuditOptions {
    /// Catalog merged into each snapshot
    pub catalog: Option<PathBuf>,
    /// Major overriding the plan's first major
    pub major: Option<String>,
    /// Report format name
    pub report: Option<String>,
    /// Report output path
    pub output: Option<PathBuf>,
}

/// Run the audit command. Returns `false` if any snapshot failed.
pub fn run(snapshots: &[PathBuf], options: &AuditOptions, config: &Config) -> bool {
    let format = match options.report.as_deref().map(ReportFormat::from_str).transpose() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("✗ {e}");
            return false;
        }
    };
    if options.output.is_some() && snapshots.len() > 1 {
        eprintln!("✗ --output can only be used with a single snapshot");
        return false;
    }

    let resolver = match build_resolver(config) {
        Ok(resolver) => resolver,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            return false;
        }
    };
    let term_order = term_order(config);

    let mut ok = true;
    for snapshot in snapshots {
        match audit_one(snapshot, options, config, &resolver, &term_order) {
            Ok(audit) => {
                print_audit(&audit);
                if let Some(format) = format {
                    match write_report(&audit, snapshot, format, options.output.as_deref(), config)
                    {
                        Ok(path) => println!("✓ Report generated: {}", path.display()),
                        Err(e) => {
                            error!("{e}");
                            eprintln!("{e}");
                            ok = false;
                        }
                    }
                }
            }
            Err(e) => {
                error!("Audit failed for {}: {e}", snapshot.display());
                eprintln!("{e}");
                ok = false;
            }
        }
    }
    ok
}

fn audit_one(
    snapshot: &Path,
    options: &AuditOptions,
    config: &Config,
    resolver: &RequirementResolver,
    term_order: &TermOrder,
) -> Result<PlanAudit, String> {
    let mut plan_snapshot = snapshot_source(snapshot, options.catalog.as_deref(), config)
        .load()
        .map_err(|e| format!("✗ {e}"))?;
    info!("Snapshot loaded: {}", snapshot.display());

    if let Some(major) = &options.major {
        plan_snapshot.plan.majors.retain(|m| m != major);
        plan_snapshot.plan.majors.insert(0, major.clone());
    }

    audit_plan(&plan_snapshot, resolver, term_order)
        .map_err(|e| format!("✗ Failed to audit {}: {e}", snapshot.display()))
}

fn status_marker(fulfillment: Fulfillment) -> &'static str {
    match fulfillment {
        Fulfillment::Satisfied => "✓",
        Fulfillment::Partial => "~",
        Fulfillment::Unsatisfied => "✗",
    }
}

fn print_audit(audit: &PlanAudit) {
    println!("\n=== {} ===", audit.plan_name);
    println!(
        "Major: {}",
        audit.major.as_deref().unwrap_or("(none declared)")
    );
    if !audit.minors.is_empty() {
        println!("Minors: {}", audit.minors.join(", "));
    }
    if !audit.consistent {
        println!("⚠️  Plan lists courses missing from its course list; those ids were skipped");
    }

    if audit.requirements.is_empty() {
        println!("No requirements configured.");
        return;
    }

    for requirement in &audit.requirements {
        println!(
            "  {} {:<40} {:>5.1} / {:<5.1} {}",
            status_marker(requirement.fulfillment()),
            requirement.name,
            requirement.planned_credits,
            requirement.required_credits,
            requirement.fulfillment()
        );
        for fine in &requirement.fine_requirements {
            verbose!(
                "      {} {} ({:.1} / {:.1})",
                status_marker(fine.fulfillment()),
                fine.description,
                fine.planned_credits,
                fine.required_credits
            );
        }
    }

    let summary = &audit.summary;
    println!(
        "Satisfied {} of {} requirement(s); {:.1} credits planned",
        summary.satisfied,
        summary.total(),
        summary.planned_credits
    );
    let unmet = audit.unmet_prerequisites().count();
    if unmet > 0 {
        println!("⚠️  {unmet} course(s) with unmet prerequisites (see `degreeaudit prereqs`)");
    }
}

fn write_report(
    audit: &PlanAudit,
    snapshot: &Path,
    format: ReportFormat,
    output: Option<&Path>,
    config: &Config,
) -> Result<PathBuf, String> {
    let output_path = if let Some(path) = output {
        path.to_path_buf()
    } else {
        let reports_dir = PathBuf::from(&config.paths.reports_dir);
        std::fs::create_dir_all(&reports_dir).map_err(|e| {
            format!(
                "✗ Failed to create reports directory {}: {e}",
                reports_dir.display()
            )
        })?;
        let stem = snapshot
            .file_stem()
            .map_or_else(|| "audit".into(), |s| s.to_string_lossy());
        reports_dir.join(format!("{stem}_audit.{}", format.extension()))
    };

    let ctx = ReportContext::new(audit);
    format
        .reporter()
        .generate(&ctx, &output_path)
        .map_err(|e| format!("✗ Failed to write report {}: {e}", output_path.display()))?;
    info!("Report written: {}", output_path.display());
    Ok(output_path)
}
