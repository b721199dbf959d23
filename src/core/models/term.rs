//! Academic terms and their ordering within a year

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A term within an academic year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Fall semester
    Fall,
    /// Spring semester
    Spring,
    /// Summer session
    Summer,
    /// January intersession
    Intersession,
}

impl Term {
    /// All terms in the default canonical order
    pub const ALL: [Self; 4] = [Self::Fall, Self::Spring, Self::Summer, Self::Intersession];

    /// Display name of the term
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fall => "Fall",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Intersession => "Intersession",
        }
    }
}

impl FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fall" => Ok(Self::Fall),
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "intersession" => Ok(Self::Intersession),
            _ => Err(format!("Unknown term: '{s}'")),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical ordering of terms inside a single year.
///
/// Defaults to Fall < Spring < Summer < Intersession. Institutions that run
/// intersession in January can supply their own order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermOrder {
    order: Vec<Term>,
}

impl TermOrder {
    /// Build an order from an explicit sequence.
    ///
    /// Terms missing from `order` are appended in default order; duplicates keep
    /// their first position.
    #[must_use]
    pub fn new(order: Vec<Term>) -> Self {
        let mut deduped: Vec<Term> = Vec::with_capacity(Term::ALL.len());
        for term in order.into_iter().chain(Term::ALL) {
            if !deduped.contains(&term) {
                deduped.push(term);
            }
        }
        Self { order: deduped }
    }

    /// Parse a comma-separated list such as `"Fall,Intersession,Spring,Summer"`.
    ///
    /// # Errors
    /// Returns an error naming the first entry that is not a known term
    pub fn parse_list(list: &str) -> Result<Self, String> {
        let terms = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<Term>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(terms))
    }

    /// Position of `term` in this order (0-based)
    #[must_use]
    pub fn rank(&self, term: Term) -> usize {
        self.order
            .iter()
            .position(|t| *t == term)
            .unwrap_or(self.order.len())
    }

    /// Terms in this order
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.order
    }
}

impl Default for TermOrder {
    fn default() -> Self {
        Self {
            order: Term::ALL.to_vec(),
        }
    }
}

impl fmt::Display for TermOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.order.iter().map(Term::as_str).collect();
        f.write_str(&names.join(","))
    }
}
