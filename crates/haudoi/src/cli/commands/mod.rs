//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod init;
pub mod parse;
pub mod search;
pub mod sql;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Parse(cmd) => parse::run(ctx, &cmd),
        Commands::Sql(cmd) => sql::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
    }
}
