//! Parameterized SQL fragments.
//!
//! A [`Fragment`] is template text with anonymous `?` placeholders plus the
//! values bound to them, in order. Template text only ever grows from
//! `&'static str` literals, validated [`Ident`]s, or other fragments; values
//! enter exclusively through [`Fragment::push_param`], which appends the
//! placeholder and the value together. Concatenating fragments therefore keeps
//! every placeholder paired with its value.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::DslError;

/// Template text of the predicate that matches every row.
pub const ALWAYS_TRUE: &str = "1=1";

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// Integer parameter. Booleans bind as `0` or `1`.
    Integer(i64),
    /// Text parameter.
    Text(String),
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A validated, optionally dot-qualified SQL identifier such as `title` or `l.title`.
///
/// Each segment is rendered double-quoted with embedded quotes doubled, so the
/// identifier can never terminate its own quoting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    /// Dot-separated name segments.
    segments: Vec<String>,
}

impl Ident {
    /// Validates an identifier.
    ///
    /// Fails for an empty name, an empty segment (`l.`, `.title`, `a..b`), or a NUL character.
    pub fn parse(name: &str) -> Result<Self, DslError> {
        let invalid = || DslError::InvalidIdentifier {
            ident: name.to_string(),
        };

        if name.is_empty() || name.contains('\0') {
            return Err(invalid());
        }

        let segments: Vec<String> = name.split('.').map(String::from).collect();
        if segments.iter().any(String::is_empty) {
            return Err(invalid());
        }

        Ok(Self { segments })
    }

    /// Returns the final segment, i.e. the column name without its relation prefix.
    pub fn column(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

impl FromStr for Ident {
    type Err = DslError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "\"{}\"", segment.replace('"', "\"\""))?;
        }
        Ok(())
    }
}

/// An opaque unit of parameterized SQL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Fragment {
    /// Template text with `?` placeholders.
    sql: String,
    /// Values bound to the placeholders, in order.
    params: Vec<SqlValue>,
}

impl Fragment {
    /// Creates an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fragment from literal template text.
    pub fn raw(text: &'static str) -> Self {
        Self {
            sql: text.to_string(),
            params: Vec::new(),
        }
    }

    /// The predicate that matches every row (`1=1`).
    pub fn always_true() -> Self {
        Self::raw(ALWAYS_TRUE)
    }

    /// Appends literal template text.
    pub fn push_raw(&mut self, text: &'static str) -> &mut Self {
        self.sql.push_str(text);
        self
    }

    /// Appends a quoted identifier.
    pub fn push_ident(&mut self, ident: &Ident) -> &mut Self {
        self.sql.push_str(&ident.to_string());
        self
    }

    /// Appends a `?` placeholder bound to `value`.
    pub fn push_param(&mut self, value: impl Into<SqlValue>) -> &mut Self {
        self.sql.push('?');
        self.params.push(value.into());
        self
    }

    /// Appends another fragment, template and values alike.
    pub fn push_fragment(&mut self, other: Self) -> &mut Self {
        self.sql.push_str(&other.sql);
        self.params.extend(other.params);
        self
    }

    /// Joins fragments with literal separator text such as `" AND "`.
    pub fn join<I>(fragments: I, separator: &'static str) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut joined = Self::new();
        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 {
                joined.push_raw(separator);
            }
            joined.push_fragment(fragment);
        }
        joined
    }

    /// Wraps the fragment in parentheses.
    pub fn parenthesized(self) -> Self {
        let mut wrapped = Self::raw("(");
        wrapped.push_fragment(self).push_raw(")");
        wrapped
    }

    /// Builds `"<column>" = ?` bound to `0` or `1`.
    pub fn bool_eq(column: &Ident, value: bool) -> Self {
        let mut fragment = Self::new();
        fragment.push_ident(column).push_raw(" = ").push_param(value);
        fragment
    }

    /// Builds a case-insensitive substring test: `instr(lower("<column>"), lower(?)) != 0`.
    ///
    /// `instr` scans plainly, so long values never hit the pattern-complexity
    /// limits that `LIKE` and `GLOB` are subject to.
    pub fn contains(column: &Ident, value: &str) -> Self {
        let mut fragment = Self::raw("instr(lower(");
        fragment
            .push_ident(column)
            .push_raw("), lower(")
            .push_param(value)
            .push_raw(")) != 0");
        fragment
    }

    /// Returns the template text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the bound values in placeholder order.
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Returns true if the template is empty.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Splits the fragment into template text and bound values.
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.params)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Ident {
        Ident::parse(name).unwrap()
    }

    #[test]
    fn ident_quotes_each_segment() {
        assert_eq!(ident("title").to_string(), "\"title\"");
        assert_eq!(ident("l.title").to_string(), "\"l\".\"title\"");
        assert_eq!(ident("l.title").column(), "title");
    }

    #[test]
    fn ident_escapes_embedded_quotes() {
        assert_eq!(ident("we\"ird").to_string(), "\"we\"\"ird\"");
    }

    #[test]
    fn ident_rejects_malformed_names() {
        for bad in ["", ".", "l.", ".title", "a..b", "nul\0"] {
            assert!(
                matches!(Ident::parse(bad), Err(DslError::InvalidIdentifier { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn ident_from_str() {
        let parsed: Ident = "note".parse().unwrap();
        assert_eq!(parsed, ident("note"));
    }

    #[test]
    fn bool_eq_binds_integer() {
        let frag = Fragment::bool_eq(&ident("archive"), true);
        assert_eq!(frag.sql(), "\"archive\" = ?");
        assert_eq!(frag.params(), &[SqlValue::Integer(1)]);

        let frag = Fragment::bool_eq(&ident("favorite"), false);
        assert_eq!(frag.params(), &[SqlValue::Integer(0)]);
    }

    #[test]
    fn contains_binds_value_not_template() {
        let frag = Fragment::contains(&ident("title"), "'; DROP TABLE link; --");
        assert_eq!(frag.sql(), "instr(lower(\"title\"), lower(?)) != 0");
        assert_eq!(
            frag.params(),
            &[SqlValue::Text("'; DROP TABLE link; --".into())]
        );
    }

    #[test]
    fn join_preserves_param_order() {
        let joined = Fragment::join(
            vec![
                Fragment::bool_eq(&ident("a"), true),
                Fragment::contains(&ident("b"), "x"),
                Fragment::bool_eq(&ident("c"), false),
            ],
            " AND ",
        );
        assert_eq!(
            joined.sql(),
            "\"a\" = ? AND instr(lower(\"b\"), lower(?)) != 0 AND \"c\" = ?"
        );
        assert_eq!(
            joined.params(),
            &[
                SqlValue::Integer(1),
                SqlValue::Text("x".into()),
                SqlValue::Integer(0)
            ]
        );
    }

    #[test]
    fn join_of_nothing_is_empty() {
        assert!(Fragment::join(Vec::new(), " OR ").is_empty());
    }

    #[test]
    fn parenthesized_wraps_template() {
        let frag = Fragment::raw("1=1").parenthesized();
        assert_eq!(frag.to_string(), "(1=1)");
    }

    #[test]
    fn always_true_has_no_params() {
        let (sql, params) = Fragment::always_true().into_parts();
        assert_eq!(sql, ALWAYS_TRUE);
        assert!(params.is_empty());
    }

    #[test]
    fn serializes_to_json() {
        let frag = Fragment::contains(&ident("url"), "github");
        let json = serde_json::to_value(&frag).unwrap();
        assert_eq!(json["sql"], "instr(lower(\"url\"), lower(?)) != 0");
        assert_eq!(json["params"][0], "github");
    }
}
