//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use haudoi_dsl::{DslError, SqlValue};
use serde::Serialize;

use crate::store::Link;

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Formats a query failure as the line printed after `error: `.
///
/// Query problems and configuration problems are labelled differently so the
/// user knows whether to change the query or the `.haudoi.toml`.
pub fn describe_query_error(err: &DslError) -> String {
    match err {
        DslError::ComplexityExceeded { .. } => format!("query too complex: {err}"),
        DslError::InvalidQuery { .. } => err.to_string(),
        DslError::NoSearchableColumns
        | DslError::InvalidIdentifier { .. }
        | DslError::DuplicateField { .. } => format!("search misconfigured: {err}"),
    }
}

/// Prints a query failure and its hint to stderr.
pub fn report_query_error(err: &DslError) -> ExitCode {
    eprintln!("error: {}", describe_query_error(err));
    if let Some(hint) = err.hint() {
        eprintln!("hint: {hint}");
    }
    ExitCode::FAILURE
}

/// Renders a bound parameter the way it would appear as a SQL literal.
pub fn format_param(param: &SqlValue) -> String {
    match param {
        SqlValue::Integer(value) => value.to_string(),
        SqlValue::Text(value) => format!("'{}'", value.replace('\'', "''")),
    }
}

/// Builds the result table for `haudoi search`.
pub fn links_table(links: &[Link]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["ID", "Title", "URL", "Note", "Flags"]);
    for link in links {
        table.add_row(vec![
            Cell::new(link.id),
            Cell::new(&link.title),
            Cell::new(&link.url),
            Cell::new(&link.note),
            Cell::new(flags(link)),
        ]);
    }
    table
}

/// Short marker text for a link's boolean columns.
fn flags(link: &Link) -> String {
    let mut flags = Vec::new();
    if link.favorite {
        flags.push("favorite");
    }
    if link.archive {
        flags.push("archived");
    }
    flags.join(", ")
}
