//! Majors command handler

use super::build_resolver;
use degree_audit::config::Config;
use degree_audit::core::models::DegreeKind;
use degree_audit::{error, verbose};

/// List known definitions grouped by kind. Returns `false` if they can't be loaded.
pub fn run(config: &Config) -> bool {
    let resolver = match build_resolver(config) {
        Ok(resolver) => resolver,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            return false;
        }
    };

    for (kind, heading) in [(DegreeKind::Major, "Majors"), (DegreeKind::Minor, "Minors")] {
        println!("\n=== {heading} ===");
        for definition in resolver.definitions_of(kind) {
            println!("  {} ({})", definition.degree_name, definition.abbrev);
            for distribution in &definition.distributions {
                verbose!(
                    "      {} - {:.1} credits",
                    distribution.name,
                    distribution.required_credits
                );
            }
        }
    }
    true
}
