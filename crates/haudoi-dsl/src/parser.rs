//! Query parser.
//!
//! Classifies tokens into [`Matcher`]s against a field registry.
//!
//! # Grammar
//!
//! ```text
//! query  → term{0,5}
//! term   → FIELD ":" value | value
//! value  → BARE | '"' … '"' | "'" … "'" | "`" … "`"
//! ```
//!
//! Terms are joined by implicit AND. Field names must match a registered field
//! exactly, including case. Boolean values are `true` or `false` in any case;
//! string values pass through untouched.
//!
//! Parsing is best-effort: an unknown field or bad boolean is recorded in
//! [`ParseResult::errors`] and the remaining tokens are still classified. Only
//! exceeding the token ceiling aborts the parse.

use crate::{
    error::{DslError, ParseIssue},
    field::{FieldDescriptor, find_field},
    lexer::{Token, is_separator, tokenize},
    matcher::{Matcher, ParseResult},
};

/// Classifies tokens against a field registry.
struct Classifier<'a> {
    /// Registered fields.
    fields: &'a [FieldDescriptor],
}

impl<'a> Classifier<'a> {
    /// Creates a classifier over `fields`.
    fn new(fields: &'a [FieldDescriptor]) -> Self {
        Self { fields }
    }

    /// Turns one token into a matcher, or the issue that rejects it.
    fn classify(&self, token: Token) -> Result<Matcher, ParseIssue> {
        match token {
            Token::Loose(value) => Ok(Matcher::Loose { value }),
            Token::FieldValue { field, value } => self.classify_field(field, &value),
        }
    }

    /// Resolves a `field:value` token against the registry.
    fn classify_field(&self, field: String, value: &str) -> Result<Matcher, ParseIssue> {
        let Some(descriptor) = find_field(self.fields, &field) else {
            return Err(ParseIssue::UnknownField { field });
        };

        let predicate = match descriptor {
            FieldDescriptor::Boolean { generator, .. } => {
                let Some(flag) = parse_bool(value) else {
                    return Err(ParseIssue::InvalidBoolean {
                        field,
                        value: value.to_string(),
                    });
                };
                generator.build(&flag)
            }
            FieldDescriptor::String { generator, .. } => generator.build(value),
        };

        Ok(Matcher::Field {
            name: descriptor.name().to_string(),
            predicate,
        })
    }
}

/// Parses `true` or `false`, ignoring case.
fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parses a query string into matchers and per-token errors.
///
/// Empty and whitespace-only queries yield an empty result. Fails only with
/// [`DslError::ComplexityExceeded`], in which case no partial result exists.
pub fn parse_dsl(query: &str, fields: &[FieldDescriptor]) -> Result<ParseResult, DslError> {
    if query.chars().all(is_separator) {
        return Ok(ParseResult::default());
    }

    let classifier = Classifier::new(fields);
    let outcomes = tokenize(query)?
        .into_iter()
        .map(|token| classifier.classify(token));

    Ok(ParseResult::from_outcomes(outcomes))
}
