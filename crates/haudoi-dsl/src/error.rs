//! Error types for query tokenizing, parsing, and compilation.
//!
//! Two classes of failure exist. [`DslError`] aborts the whole call with no
//! partial result. [`ParseIssue`] is collected per token while parsing keeps
//! going, and surfaces as a message in [`ParseResult::errors`](crate::ParseResult).

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A failure that aborts tokenizing, parsing, or compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DslError {
    /// The query produced more tokens than the complexity ceiling allows.
    #[error("query exceeds maximum complexity of {limit} terms")]
    ComplexityExceeded {
        /// The token ceiling that was exceeded.
        limit: usize,
    },

    /// A loose term was compiled without any default columns to search.
    #[error("no searchable columns configured for loose matcher")]
    NoSearchableColumns,

    /// The query parsed with soft errors and was rejected as a whole.
    #[error("invalid search query: {}", join_issues(.errors))]
    InvalidQuery {
        /// The rejected terms, in encounter order.
        errors: Vec<ParseIssue>,
    },

    /// A column identifier failed validation.
    #[error("invalid SQL identifier: {ident:?}")]
    InvalidIdentifier {
        /// The rejected identifier text.
        ident: String,
    },

    /// Two field descriptors share a name.
    #[error("duplicate field name: {name}")]
    DuplicateField {
        /// The repeated field name.
        name: String,
    },
}

impl DslError {
    /// Returns true if the error was caused by the query text rather than by
    /// the search configuration.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::ComplexityExceeded { .. } | Self::InvalidQuery { .. })
    }

    /// Returns a short suggestion for common errors.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ComplexityExceeded { .. } => Some("Try reducing search terms"),
            Self::InvalidQuery { errors }
                if errors
                    .iter()
                    .any(|issue| matches!(issue, ParseIssue::UnknownField { .. })) =>
            {
                Some("Field names are case sensitive; quote the term to search it as text")
            }
            Self::InvalidQuery { errors }
                if errors
                    .iter()
                    .any(|issue| matches!(issue, ParseIssue::InvalidBoolean { .. })) =>
            {
                Some("Boolean fields accept only true or false")
            }
            Self::NoSearchableColumns => Some("Configure at least one loose search column"),
            _ => None,
        }
    }
}

/// A non-fatal problem with a single token.
///
/// The `Display` output is the user-facing message stored in
/// [`ParseResult::errors`](crate::ParseResult).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIssue {
    /// The token named a field that is not registered.
    #[error("Unknown field: {field}")]
    UnknownField {
        /// Field name exactly as written in the query.
        field: String,
    },

    /// A boolean field received something other than `true` or `false`.
    #[error("Invalid boolean value for {field}: {value}. Expected 'true' or 'false'.")]
    InvalidBoolean {
        /// Field name exactly as written in the query.
        field: String,
        /// The rejected value.
        value: String,
    },
}

/// Serializes as the user-facing message.
impl Serialize for ParseIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Joins issue messages with `; `.
fn join_issues(issues: &[ParseIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_message() {
        let issue = ParseIssue::UnknownField {
            field: "Title".into(),
        };
        assert_eq!(issue.to_string(), "Unknown field: Title");
    }

    #[test]
    fn invalid_boolean_message() {
        let issue = ParseIssue::InvalidBoolean {
            field: "archive".into(),
            value: "yes".into(),
        };
        assert_eq!(
            issue.to_string(),
            "Invalid boolean value for archive: yes. Expected 'true' or 'false'."
        );
    }

    #[test]
    fn invalid_query_joins_errors() {
        let err = DslError::InvalidQuery {
            errors: vec![
                ParseIssue::UnknownField { field: "a".into() },
                ParseIssue::UnknownField { field: "b".into() },
            ],
        };
        assert_eq!(
            err.to_string(),
            "invalid search query: Unknown field: a; Unknown field: b"
        );
        assert!(err.is_user_error());
        assert!(err.hint().unwrap().contains("case sensitive"));
    }

    #[test]
    fn hint_follows_issue_kind() {
        let boolean = ParseIssue::InvalidBoolean {
            field: "archive".into(),
            value: "yes".into(),
        };
        let err = DslError::InvalidQuery {
            errors: vec![boolean.clone()],
        };
        assert_eq!(err.hint(), Some("Boolean fields accept only true or false"));

        let err = DslError::InvalidQuery {
            errors: vec![boolean, ParseIssue::UnknownField { field: "x".into() }],
        };
        assert!(err.hint().unwrap().contains("case sensitive"));
    }

    #[test]
    fn issue_serializes_as_message() {
        let issue = ParseIssue::UnknownField {
            field: "Title".into(),
        };
        assert_eq!(
            serde_json::to_value(&issue).unwrap(),
            serde_json::json!("Unknown field: Title")
        );
    }

    #[test]
    fn complexity_display() {
        let err = DslError::ComplexityExceeded { limit: 5 };
        assert_eq!(err.to_string(), "query exceeds maximum complexity of 5 terms");
        assert!(err.is_user_error());
        assert!(err.hint().is_some());
    }

    #[test]
    fn configuration_errors_are_not_user_errors() {
        assert!(!DslError::NoSearchableColumns.is_user_error());
        assert!(
            !DslError::InvalidIdentifier {
                ident: String::new()
            }
            .is_user_error()
        );
        assert!(
            DslError::DuplicateField {
                name: "title".into()
            }
            .hint()
            .is_none()
        );
    }
}
