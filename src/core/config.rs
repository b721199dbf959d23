//! Configuration module for `DegreeAudit`

use crate::core::models::TermOrder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory inside config values
const DIR_VARIABLE: &str = "$DEGREE_AUDIT";

/// Every key accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const CONFIG_KEYS: &[&str] = &[
    "level",
    "file",
    "verbose",
    "catalog",
    "majors_dir",
    "plans_dir",
    "reports_dir",
    "term_order",
];

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Reference data configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Catalog JSON merged into every snapshot, empty for none
    #[serde(default)]
    pub catalog: String,
    /// Directory of extra major/minor descriptor TOML files
    #[serde(default)]
    pub majors_dir: String,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory searched for snapshot files given by bare name
    #[serde(default)]
    pub plans_dir: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Evaluation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Comma-separated term order within a year
    #[serde(default)]
    pub term_order: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Reference data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Evaluation settings
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override default catalog file
    pub catalog: Option<String>,
    /// Override descriptor directory
    pub majors_dir: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override term order
    pub term_order: Option<String>,
}

/// Copy `default` into `value` when `value` is empty and `default` is not
fn fill_empty(value: &mut String, default: &str) -> bool {
    if value.is_empty() && !default.is_empty() {
        default.clone_into(value);
        true
    } else {
        false
    }
}

impl Config {
    /// Get the `$DEGREE_AUDIT` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/degreeaudit`
    /// - macOS: `~/Library/Application Support/degreeaudit`
    /// - Windows: `%APPDATA%\degreeaudit`
    #[must_use]
    pub fn get_degreeaudit_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("degreeaudit")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` are
    /// updated, so upgrades pick up new settings without touching user values.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        [
            fill_empty(&mut self.logging.level, &defaults.logging.level),
            fill_empty(&mut self.logging.file, &defaults.logging.file),
            fill_empty(&mut self.data.catalog, &defaults.data.catalog),
            fill_empty(&mut self.data.majors_dir, &defaults.data.majors_dir),
            fill_empty(&mut self.paths.plans_dir, &defaults.paths.plans_dir),
            fill_empty(&mut self.paths.reports_dir, &defaults.paths.reports_dir),
            fill_empty(
                &mut self.evaluation.term_order,
                &defaults.evaluation.term_order,
            ),
        ]
        .contains(&true)
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values. The config file is not
    /// modified.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     level: Some("debug".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(catalog) = &overrides.catalog {
            self.data.catalog = Self::expand_variables(catalog);
        }
        if let Some(majors_dir) = &overrides.majors_dir {
            self.data.majors_dir = Self::expand_variables(majors_dir);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir = Self::expand_variables(reports_dir);
        }
        if let Some(term_order) = &overrides.term_order {
            self.evaluation.term_order.clone_from(term_order);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_degreeaudit_dir`].
    ///
    /// [`get_degreeaudit_dir`]: Self::get_degreeaudit_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_degreeaudit_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$DEGREE_AUDIT` in a string to the config directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_degreeaudit_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Expands `$DEGREE_AUDIT` in path values. Missing fields use their serde
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.data.catalog = Self::expand_variables(&config.data.catalog);
        config.data.majors_dir = Self::expand_variables(&config.data.majors_dir);
        config.paths.plans_dir = Self::expand_variables(&config.paths.plans_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists it is loaded, missing fields are merged from
    ///   defaults and the result is saved back.
    /// - On first run the config directory and file are created from defaults.
    ///
    /// Falls back to defaults if the file can't be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Parsed term order, falling back to the default order when unset
    ///
    /// # Errors
    /// Returns an error naming the first unknown term
    pub fn term_order(&self) -> Result<TermOrder, String> {
        if self.evaluation.term_order.trim().is_empty() {
            Ok(TermOrder::default())
        } else {
            TermOrder::parse_list(&self.evaluation.term_order)
        }
    }

    /// Get a configuration value by key
    ///
    /// Keys are listed in [`CONFIG_KEYS`]; dashed spellings such as
    /// `reports-dir` are accepted too.
    ///
    /// # Returns
    /// - `Some(String)`: The configuration value as a string
    /// - `None`: If the key is not recognized
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "catalog" => Some(self.data.catalog.clone()),
            "majors_dir" | "majors-dir" => Some(self.data.majors_dir.clone()),
            "plans_dir" | "plans-dir" => Some(self.paths.plans_dir.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "term_order" | "term-order" => Some(self.evaluation.term_order.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// `verbose` must be `true` or `false`, `level` a known log level and
    /// `term_order` a comma-separated list of terms. Call
    /// [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                value.parse::<crate::logger::Level>()?;
                self.logging.level = value.to_string();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "catalog" => self.data.catalog = value.to_string(),
            "majors_dir" | "majors-dir" => self.data.majors_dir = value.to_string(),
            "plans_dir" | "plans-dir" => self.paths.plans_dir = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "term_order" | "term-order" => {
                TermOrder::parse_list(value)?;
                self.evaluation.term_order = value.to_string();
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "catalog" => self.data.catalog.clone_from(&defaults.data.catalog),
            "majors_dir" | "majors-dir" => {
                self.data.majors_dir.clone_from(&defaults.data.majors_dir);
            }
            "plans_dir" | "plans-dir" => {
                self.paths.plans_dir.clone_from(&defaults.paths.plans_dir);
            }
            "reports_dir" | "reports-dir" => {
                self.paths.reports_dir.clone_from(&defaults.paths.reports_dir);
            }
            "term_order" | "term-order" => self
                .evaluation
                .term_order
                .clone_from(&defaults.evaluation.term_order),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[data]")?;
        writeln!(f, "  catalog = \"{}\"", self.data.catalog)?;
        writeln!(f, "  majors_dir = \"{}\"", self.data.majors_dir)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  plans_dir = \"{}\"", self.paths.plans_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[evaluation]")?;
        writeln!(f, "  term_order = \"{}\"", self.evaluation.term_order)?;

        Ok(())
    }
}
