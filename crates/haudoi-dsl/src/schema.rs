//! Search schema: the registered fields plus the default loose columns.

use std::collections::HashSet;

use crate::{
    compile::matchers_to_sql,
    error::DslError,
    field::FieldDescriptor,
    fragment::{Fragment, Ident},
    matcher::{Matcher, ParseResult},
    parser::parse_dsl,
};

/// An immutable, name-unique field registry with its loose-search columns.
#[derive(Debug)]
pub struct SearchSchema {
    /// Registered fields, in declaration order.
    fields: Vec<FieldDescriptor>,
    /// Columns searched by loose terms.
    loose_columns: Vec<Ident>,
}

impl SearchSchema {
    /// Creates a schema, rejecting duplicate field names.
    pub fn new(fields: Vec<FieldDescriptor>, loose_columns: Vec<Ident>) -> Result<Self, DslError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name()) {
                return Err(DslError::DuplicateField {
                    name: field.name().to_string(),
                });
            }
        }

        Ok(Self {
            fields,
            loose_columns,
        })
    }

    /// Returns the registered fields.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the loose-search columns.
    pub fn loose_columns(&self) -> &[Ident] {
        &self.loose_columns
    }

    /// Parses a query against the registered fields.
    pub fn parse(&self, query: &str) -> Result<ParseResult, DslError> {
        parse_dsl(query, &self.fields)
    }

    /// Compiles matchers using the loose-search columns.
    pub fn compile(&self, matchers: &[Matcher]) -> Result<Fragment, DslError> {
        matchers_to_sql(matchers, &self.loose_columns)
    }

    /// Parses and compiles a query, rejecting it if any token was invalid.
    pub fn query(&self, query: &str) -> Result<Fragment, DslError> {
        let matchers = self.parse(query)?.into_matchers()?;
        self.compile(&matchers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ParseIssue, fragment::SqlValue};

    fn ident(name: &str) -> Ident {
        Ident::parse(name).unwrap()
    }

    fn schema() -> SearchSchema {
        SearchSchema::new(
            vec![
                FieldDescriptor::boolean_column("archive", ident("archive")),
                FieldDescriptor::string_column("title", ident("title")),
            ],
            vec![ident("title"), ident("url"), ident("note")],
        )
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = SearchSchema::new(
            vec![
                FieldDescriptor::string_column("title", ident("title")),
                FieldDescriptor::boolean_column("title", ident("flag")),
            ],
            vec![],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DslError::DuplicateField {
                name: "title".into()
            }
        );
    }

    #[test]
    fn names_differing_in_case_are_distinct() {
        let schema = SearchSchema::new(
            vec![
                FieldDescriptor::string_column("title", ident("title")),
                FieldDescriptor::string_column("Title", ident("title")),
            ],
            vec![],
        );
        assert!(schema.is_ok());
    }

    #[test]
    fn query_end_to_end() {
        let frag = schema()
            .query("archive:false title:\"Hello World\" github")
            .unwrap();
        assert_eq!(
            frag.sql(),
            "\"archive\" = ? AND instr(lower(\"title\"), lower(?)) != 0 AND (instr(lower(\"title\"), lower(?)) != 0 OR instr(lower(\"url\"), lower(?)) != 0 OR instr(lower(\"note\"), lower(?)) != 0)"
        );
        assert_eq!(
            frag.params(),
            &[
                SqlValue::Integer(0),
                SqlValue::Text("Hello World".into()),
                SqlValue::Text("github".into()),
                SqlValue::Text("github".into()),
                SqlValue::Text("github".into())
            ]
        );
    }

    #[test]
    fn query_rejects_soft_errors() {
        let err = schema().query("unknown:value title:test").unwrap_err();
        assert_eq!(
            err,
            DslError::InvalidQuery {
                errors: vec![ParseIssue::UnknownField {
                    field: "unknown".into()
                }]
            }
        );
    }

    #[test]
    fn query_propagates_complexity() {
        assert!(matches!(
            schema().query("a b c d e f"),
            Err(DslError::ComplexityExceeded { .. })
        ));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert_eq!(schema().query("  ").unwrap(), Fragment::always_true());
    }

    #[test]
    fn loose_term_without_columns_is_misconfigured() {
        let schema = SearchSchema::new(vec![], vec![]).unwrap();
        assert_eq!(
            schema.query("github").unwrap_err(),
            DslError::NoSearchableColumns
        );
    }
}
