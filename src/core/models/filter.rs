//! Requirement filters: predicates over course attributes.
//!
//! Definitions store filters as loosely-typed records ([`FilterSpec`]). They are
//! compiled once into a [`RequirementFilter`], a list of tagged [`Predicate`]s
//! with regex patterns already built. Matching lives in `core::audit::matcher`.

use super::Course;
use crate::core::error::{AuditError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number patterns may be written as a single string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberSpec {
    /// A single pattern
    One(String),
    /// Any of several patterns
    Many(Vec<String>),
}

impl NumberSpec {
    fn patterns(&self) -> Vec<&str> {
        match self {
            Self::One(p) => vec![p.as_str()],
            Self::Many(ps) => ps.iter().map(String::as_str).collect(),
        }
    }
}

/// Filter as written in a requirement definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Area pattern (e.g. `"/^[NQ]/"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Course must carry at least one of these tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Required writing-intensive flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wi: Option<bool>,
    /// Department pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Course number pattern(s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<NumberSpec>,
    /// Title pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Courses matching this filter are always excluded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<Box<FilterSpec>>,
}

/// A compiled regex pattern that remembers its source text
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a stored pattern, stripping its `/` delimiters
    ///
    /// # Errors
    /// Returns [`AuditError::InvalidPattern`] if the body is not a valid regex
    pub fn compile(raw: &str) -> Result<Self> {
        let regex = Regex::new(strip_delimiters(raw)).map_err(|source| {
            AuditError::InvalidPattern {
                pattern: raw.to_string(),
                source: Box::new(source),
            }
        })?;
        Ok(Self {
            raw: raw.to_string(),
            regex,
        })
    }

    /// Case-sensitive search anywhere in `haystack`
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    /// Pattern as written in the definition
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn strip_delimiters(raw: &str) -> &str {
    let body = raw.strip_prefix('/').unwrap_or(raw);
    body.strip_suffix('/').unwrap_or(body)
}

/// One matchable course attribute
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Pattern searched in the course's area string
    Area(Pattern),
    /// Course carries at least one of these tags
    Tags(Vec<String>),
    /// Course writing-intensive flag equals this value
    WritingIntensive(bool),
    /// Pattern searched in the course's department
    Department(Pattern),
    /// Any of these patterns found in the course number
    Number(Vec<Pattern>),
    /// Pattern searched in the course title
    Title(Pattern),
}

impl Predicate {
    /// Evaluate this single predicate against `course`
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        match self {
            Self::Area(p) => p.is_match(&course.areas),
            Self::Tags(tags) => tags.iter().any(|t| course.tags.contains(t)),
            Self::WritingIntensive(wi) => course.wi == *wi,
            Self::Department(p) => p.is_match(&course.department),
            Self::Number(ps) => ps.iter().any(|p| p.is_match(&course.number)),
            Self::Title(p) => p.is_match(&course.title),
        }
    }

    /// Short attribute name, used in log output
    #[must_use]
    pub const fn attribute(&self) -> &'static str {
        match self {
            Self::Area(_) => "area",
            Self::Tags(_) => "tags",
            Self::WritingIntensive(_) => "wi",
            Self::Department(_) => "department",
            Self::Number(_) => "number",
            Self::Title(_) => "title",
        }
    }
}

/// A compiled filter: defined predicates plus an optional exception filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementFilter {
    predicates: Vec<Predicate>,
    exception: Option<Box<RequirementFilter>>,
}

impl RequirementFilter {
    /// A filter with no predicates and no exception
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile a definition filter, building every pattern up front
    ///
    /// # Errors
    /// Returns [`AuditError::InvalidPattern`] for the first pattern that fails to compile
    pub fn compile(spec: &FilterSpec) -> Result<Self> {
        let mut predicates = Vec::new();
        if let Some(area) = &spec.area {
            predicates.push(Predicate::Area(Pattern::compile(area)?));
        }
        if let Some(tags) = &spec.tags {
            predicates.push(Predicate::Tags(tags.clone()));
        }
        if let Some(wi) = spec.wi {
            predicates.push(Predicate::WritingIntensive(wi));
        }
        if let Some(department) = &spec.department {
            predicates.push(Predicate::Department(Pattern::compile(department)?));
        }
        if let Some(number) = &spec.number {
            let patterns = number
                .patterns()
                .into_iter()
                .map(Pattern::compile)
                .collect::<Result<Vec<_>>>()?;
            predicates.push(Predicate::Number(patterns));
        }
        if let Some(title) = &spec.title {
            predicates.push(Predicate::Title(Pattern::compile(title)?));
        }
        let exception = spec
            .exception
            .as_deref()
            .map(Self::compile)
            .transpose()?
            .map(Box::new);

        Ok(Self {
            predicates,
            exception,
        })
    }

    /// Add a predicate
    #[must_use]
    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Set the exception filter
    #[must_use]
    pub fn with_exception(mut self, exception: Self) -> Self {
        self.exception = Some(Box::new(exception));
        self
    }

    /// Defined predicates in definition order
    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Exception filter, if any
    #[must_use]
    pub fn exception(&self) -> Option<&Self> {
        self.exception.as_deref()
    }

    /// Whether no predicate is defined (the exception is not considered)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_delimiters() {
        assert_eq!(strip_delimiters("/^EN.601/"), "^EN.601");
        assert_eq!(strip_delimiters("EN.601"), "EN.601");
        assert_eq!(strip_delimiters("/N"), "N");
    }

    #[test]
    fn test_pattern_is_case_sensitive_search() {
        let pattern = Pattern::compile("/Computer/").unwrap();
        assert!(pattern.is_match("EN Computer Science"));
        assert!(!pattern.is_match("EN computer science"));
        assert_eq!(pattern.as_str(), "/Computer/");
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let err = Pattern::compile("/EN.601.[/").unwrap_err();
        assert!(matches!(err, AuditError::InvalidPattern { .. }));
    }

    #[test]
    fn test_compile_keeps_field_order_and_exception() {
        let spec: FilterSpec = toml::from_str(
            r#"
            department = "/^EN Computer Science$/"
            area = "/E/"
            number = ["/EN.601.3/", "/EN.601.4/"]
            [exception]
            number = "/EN.601.104/"
            "#,
        )
        .unwrap();

        let filter = RequirementFilter::compile(&spec).unwrap();
        let attributes: Vec<&str> = filter.predicates().iter().map(Predicate::attribute).collect();
        assert_eq!(attributes, vec!["area", "department", "number"]);
        assert_eq!(filter.exception().unwrap().predicates().len(), 1);
    }

    #[test]
    fn test_compile_reports_bad_nested_pattern() {
        let spec = FilterSpec {
            area: Some("/N/".to_string()),
            exception: Some(Box::new(FilterSpec {
                title: Some("/(/".to_string()),
                ..FilterSpec::default()
            })),
            ..FilterSpec::default()
        };
        assert!(RequirementFilter::compile(&spec).is_err());
    }

    #[test]
    fn test_predicate_matches() {
        let mut course = Course::new(
            "EN.601.220".to_string(),
            "Intermediate Programming".to_string(),
            4.0,
        )
        .with_areas("E")
        .with_department("EN Computer Science");
        course.add_tag("CSCI-SOFT".to_string());

        assert!(Predicate::Area(Pattern::compile("/E/").unwrap()).matches(&course));
        assert!(Predicate::Tags(vec!["CSCI-SOFT".to_string()]).matches(&course));
        assert!(!Predicate::Tags(Vec::new()).matches(&course));
        assert!(Predicate::WritingIntensive(false).matches(&course));
        assert!(Predicate::Number(vec![
            Pattern::compile("/EN.500/").unwrap(),
            Pattern::compile("/EN.601.2/").unwrap()
        ])
        .matches(&course));
        assert!(!Predicate::Title(Pattern::compile("/^Data/").unwrap()).matches(&course));
    }
}
