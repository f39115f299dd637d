//! Classified search conditions.
//!
//! Each accepted token becomes one [`Matcher`]. Field matchers carry their
//! compiled predicate; loose matchers keep the raw text until compile time,
//! when the default column list is known.

use std::fmt;

use serde::Serialize;

use crate::{
    error::{DslError, ParseIssue},
    fragment::Fragment,
};

/// A single classified search condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Matcher {
    /// A registered field with its value validated and bound.
    Field {
        /// Registered field name.
        name: String,
        /// Predicate built by the field's generator.
        predicate: Fragment,
    },

    /// A bare term matched against the default columns.
    Loose {
        /// Raw search text.
        value: String,
    },
}

impl Matcher {
    /// Creates a loose matcher.
    pub fn loose(value: impl Into<String>) -> Self {
        Self::Loose {
            value: value.into(),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { name, predicate } => write!(f, "Field({name:?}): {predicate}"),
            Self::Loose { value } => write!(f, "Loose({value:?})"),
        }
    }
}

/// Output of parsing one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Accepted matchers, in query order.
    pub matchers: Vec<Matcher>,
    /// Rejected tokens, in query order. Each serializes as its message.
    pub errors: Vec<ParseIssue>,
}

impl ParseResult {
    /// Partitions per-token outcomes into matchers and error messages, keeping order.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Result<Matcher, ParseIssue>>,
    {
        let mut result = Self::default();
        for outcome in outcomes {
            match outcome {
                Ok(matcher) => result.matchers.push(matcher),
                Err(issue) => result.errors.push(issue),
            }
        }
        result
    }

    /// Returns the user-facing message of each rejected token.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Returns true if any token was rejected.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the matchers, or [`DslError::InvalidQuery`] if any token was rejected.
    pub fn into_matchers(self) -> Result<Vec<Matcher>, DslError> {
        if self.has_errors() {
            return Err(DslError::InvalidQuery {
                errors: self.errors,
            });
        }
        Ok(self.matchers)
    }
}
