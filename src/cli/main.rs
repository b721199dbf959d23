//! Command-line interface entry point for `DegreeAudit`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use degree_audit::config::Config;
use degree_audit::info;
use degree_audit::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Audit {
            snapshots,
            catalog,
            major,
            report,
            output,
        } => {
            let options = commands::audit::AuditOptions {
                catalog,
                major,
                report,
                output,
            };
            if !commands::audit::run(&snapshots, &options, &config) {
                std::process::exit(1);
            }
        }
        Command::Prereqs { snapshots, catalog } => {
            if !commands::prereqs::run(&snapshots, catalog.as_deref(), &config) {
                std::process::exit(1);
            }
        }
        Command::Majors => {
            if !commands::majors::run(&config) {
                std::process::exit(1);
            }
        }
    }
}
