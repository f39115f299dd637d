//! Query compiler.
//!
//! Compiles matchers into a single parameterized predicate for a `WHERE` clause.

use crate::{
    error::DslError,
    fragment::{Fragment, Ident},
    matcher::Matcher,
};

/// Compiles matchers into one predicate fragment.
///
/// - No matchers compile to `1=1`, so the result can always follow `WHERE`.
/// - A field matcher contributes its predicate unchanged.
/// - A loose matcher becomes a parenthesized OR of case-insensitive
///   containment tests, one per entry in `loose_columns`.
/// - Per-matcher predicates are joined with ` AND `, in order.
///
/// Fails with [`DslError::NoSearchableColumns`] if a loose matcher is present
/// and `loose_columns` is empty.
pub fn matchers_to_sql(matchers: &[Matcher], loose_columns: &[Ident]) -> Result<Fragment, DslError> {
    if matchers.is_empty() {
        return Ok(Fragment::always_true());
    }

    let conditions = matchers
        .iter()
        .map(|matcher| compile_matcher(matcher, loose_columns))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Fragment::join(conditions, " AND "))
}

/// Compiles a single matcher.
fn compile_matcher(matcher: &Matcher, loose_columns: &[Ident]) -> Result<Fragment, DslError> {
    match matcher {
        Matcher::Field { predicate, .. } => Ok(predicate.clone()),
        Matcher::Loose { value } => compile_loose(value, loose_columns),
    }
}

/// Builds `(<col1 contains value> OR <col2 contains value> ...)`.
fn compile_loose(value: &str, loose_columns: &[Ident]) -> Result<Fragment, DslError> {
    if loose_columns.is_empty() {
        return Err(DslError::NoSearchableColumns);
    }

    let alternatives = loose_columns
        .iter()
        .map(|column| Fragment::contains(column, value));

    Ok(Fragment::join(alternatives, " OR ").parenthesized())
}
