//! Report format implementations
//!
//! Provides exporters for Markdown and HTML audit reports.

pub mod html;
pub mod markdown;

pub use html::HtmlReporter;
pub use markdown::MarkdownReporter;

use super::ReportGenerator;
use std::fmt;
use std::str::FromStr;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown tables
    Markdown,
    /// Self-contained HTML page
    Html,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }

    /// Generator for this format
    #[must_use]
    pub fn reporter(&self) -> Box<dyn ReportGenerator> {
        match self {
            Self::Markdown => Box::new(MarkdownReporter::new()),
            Self::Html => Box::new(HtmlReporter::new()),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Html => write!(f, "html"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("MD".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!("htm".parse::<ReportFormat>(), Ok(ReportFormat::Html));
        assert!("pdf".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Html.extension(), "html");
        assert_eq!(ReportFormat::Markdown.to_string(), "markdown");
    }
}
