//! Prereqs command handler

use super::{build_resolver, snapshot_source, term_order};
use degree_audit::config::Config;
use degree_audit::core::audit::audit_plan;
use degree_audit::core::planner::PlanSource;
use degree_audit::{error, verbose};
use std::path::{Path, PathBuf};

/// Run the prereqs command. Returns `false` if any snapshot failed to load.
pub fn run(snapshots: &[PathBuf], catalog: Option<&Path>, config: &Config) -> bool {
    let resolver = match build_resolver(config) {
        Ok(resolver) => resolver,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            return false;
        }
    };
    let term_order = term_order(config);
    verbose!("Term order: {term_order}");

    let mut ok = true;
    for snapshot in snapshots {
        let audit = snapshot_source(snapshot, catalog, config)
            .load()
            .and_then(|plan_snapshot| audit_plan(&plan_snapshot, &resolver, &term_order));
        let audit = match audit {
            Ok(audit) => audit,
            Err(e) => {
                error!("Prerequisite check failed for {}: {e}", snapshot.display());
                eprintln!("✗ {e}");
                ok = false;
                continue;
            }
        };

        println!("\n=== {} ===", audit.plan_name);
        if !audit.consistent {
            println!("⚠️  Plan lists courses missing from its course list; those ids were skipped");
        }
        let unmet: Vec<_> = audit.unmet_prerequisites().collect();
        if unmet.is_empty() {
            println!("✓ All prerequisites are planned in earlier terms");
            continue;
        }
        for status in unmet {
            println!(
                "  ✗ {} ({} {}): missing {}",
                status.number,
                status.year,
                status.term,
                status.missing.join(", ")
            );
        }
    }
    ok
}
