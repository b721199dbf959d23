//! CLI argument definitions for `DegreeAudit`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use degree_audit::config::ConfigOverrides;
use degree_audit::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to
/// `degree_audit::logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `reports_dir`, `term_order`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Audit plan snapshots against their major and minor requirements.
    ///
    /// Prints per-requirement progress and, with --report, writes a report.
    Audit {
        /// Snapshot JSON files (supports multiple)
        #[arg(value_name = "SNAPSHOTS", num_args = 1..)]
        snapshots: Vec<PathBuf>,

        /// Catalog JSON merged into each snapshot (defaults to config `catalog`)
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Audit against this major instead of the plan's first major
        #[arg(long, value_name = "NAME")]
        major: Option<String>,

        /// Generate a report in the specified format (markdown, html)
        #[arg(long, value_name = "FORMAT")]
        report: Option<String>,

        /// Report output path (single snapshot only; defaults to the reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List planned courses whose prerequisites are not planned earlier.
    Prereqs {
        /// Snapshot JSON files (supports multiple)
        #[arg(value_name = "SNAPSHOTS", num_args = 1..)]
        snapshots: Vec<PathBuf>,

        /// Catalog JSON merged into each snapshot (defaults to config `catalog`)
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },
    /// List known major and minor definitions.
    Majors,
}

#[derive(Parser, Debug)]
#[command(
    name = "degreeaudit",
    about = "Audit degree plans against distribution requirements and prerequisites",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config default catalog
    #[arg(long = "config-catalog", value_name = "FILE")]
    pub config_catalog: Option<PathBuf>,

    /// Override config descriptor directory
    #[arg(long = "config-majors-dir", value_name = "DIR")]
    pub config_majors_dir: Option<PathBuf>,

    /// Override config descriptor directory (short form)
    #[arg(long = "majors-dir", value_name = "DIR")]
    pub majors_dir: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override config term order (comma-separated)
    #[arg(long = "config-term-order", value_name = "TERMS")]
    pub config_term_order: Option<String>,

    /// Override config term order (short form)
    #[arg(long = "term-order", value_name = "TERMS")]
    pub term_order: Option<String>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--reports-dir`) take precedence over long-form
    /// flags (e.g., `--config-reports-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            catalog: path_string(self.config_catalog.as_ref()),
            majors_dir: path_string(self.majors_dir.as_ref())
                .or_else(|| path_string(self.config_majors_dir.as_ref())),
            reports_dir: path_string(self.reports_dir.as_ref())
                .or_else(|| path_string(self.config_reports_dir.as_ref())),
            term_order: self
                .term_order
                .clone()
                .or_else(|| self.config_term_order.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_cli() -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_catalog: None,
            config_majors_dir: None,
            majors_dir: None,
            config_reports_dir: None,
            reports_dir: None,
            config_term_order: None,
            term_order: None,
            command: Command::Config { subcommand: None },
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = empty_cli().to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.catalog.is_none());
        assert!(overrides.majors_dir.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.term_order.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            config_level: Some(LogLevelArg::Debug),
            config_log_file: Some(PathBuf::from("/tmp/test.log")),
            config_verbose: Some(true),
            config_catalog: Some(PathBuf::from("/data/catalog.json")),
            term_order: Some("Fall,Intersession,Spring,Summer".to_string()),
            ..empty_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.catalog, Some("/data/catalog.json".to_string()));
        assert_eq!(
            overrides.term_order,
            Some("Fall,Intersession,Spring,Summer".to_string())
        );
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = Cli {
            config_majors_dir: Some(PathBuf::from("/long/majors")),
            majors_dir: Some(PathBuf::from("/short/majors")),
            config_reports_dir: Some(PathBuf::from("/long/reports")),
            reports_dir: Some(PathBuf::from("/short/reports")),
            config_term_order: Some("Spring".to_string()),
            term_order: Some("Summer".to_string()),
            ..empty_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.majors_dir, Some("/short/majors".to_string()));
        assert_eq!(overrides.reports_dir, Some("/short/reports".to_string()));
        assert_eq!(overrides.term_order, Some("Summer".to_string()));
    }

    #[test]
    fn test_long_form_when_short_form_absent() {
        let cli = Cli {
            config_majors_dir: Some(PathBuf::from("/long/majors")),
            config_reports_dir: Some(PathBuf::from("/long/reports")),
            ..empty_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.majors_dir, Some("/long/majors".to_string()));
        assert_eq!(overrides.reports_dir, Some("/long/reports".to_string()));
    }

    #[test]
    fn test_parse_audit_command() {
        let cli = Cli::try_parse_from([
            "degreeaudit",
            "--term-order",
            "Fall,Spring",
            "audit",
            "plan.json",
            "--major",
            "B.S. CS",
            "--report",
            "md",
        ])
        .unwrap();
        match cli.command {
            Command::Audit {
                snapshots,
                major,
                report,
                ..
            } => {
                assert_eq!(snapshots, vec![PathBuf::from("plan.json")]);
                assert_eq!(major.as_deref(), Some("B.S. CS"));
                assert_eq!(report.as_deref(), Some("md"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
