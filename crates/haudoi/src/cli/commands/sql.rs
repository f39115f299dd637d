//! Implementation of `haudoi sql`.

use std::process::ExitCode;

use crate::cli::{
    args::SqlCommand,
    context::CommandContext,
    output::{format_param, print_json, report_query_error},
};

/// Compiles a query and prints the predicate template and its parameters.
pub fn run(ctx: &CommandContext, cmd: &SqlCommand) -> ExitCode {
    let schema = match ctx.schema() {
        Ok(schema) => schema,
        Err(code) => return code,
    };

    let fragment = match schema.query(&cmd.query.text()) {
        Ok(fragment) => fragment,
        Err(e) => return report_query_error(&e),
    };

    if cmd.json {
        return print_json(&fragment);
    }

    println!("{}", fragment.sql());
    if !fragment.params().is_empty() {
        println!();
        for (index, param) in fragment.params().iter().enumerate() {
            println!("   ?{} = {}", index + 1, format_param(param));
        }
    }
    ExitCode::SUCCESS
}
