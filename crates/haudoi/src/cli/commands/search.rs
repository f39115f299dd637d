//! Implementation of `haudoi search`.

use std::process::ExitCode;

use tracing::info;

use crate::{
    cli::{
        args::{DEFAULT_SEARCH_LIMIT, SearchCommand},
        context::CommandContext,
        output::{links_table, print_json, report_query_error},
    },
    store::LinkStore,
};

/// Searches the link store and prints matching links.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let schema = match ctx.schema() {
        Ok(schema) => schema,
        Err(code) => return code,
    };

    let query = cmd.query.text();
    let predicate = match schema.query(&query) {
        Ok(predicate) => predicate,
        Err(e) => return report_query_error(&e),
    };

    let Some(db_path) = cmd.db.as_deref().or(ctx.config.store.path.as_deref()) else {
        eprintln!("error: no link store configured");
        eprintln!("pass --db or set [store] path in .haudoi.toml");
        return ExitCode::FAILURE;
    };

    let store = match LinkStore::open(db_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let limit = cmd.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let links = match store.search(&predicate, limit) {
        Ok(links) => links,
        Err(e) => {
            eprintln!("error: search failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(query = %query, results = links.len(), "search finished");

    if cmd.json {
        return print_json(&links);
    }

    if links.is_empty() {
        println!("No links found.");
    } else {
        println!("{}", links_table(&links));
    }
    ExitCode::SUCCESS
}
