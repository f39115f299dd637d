//! Command-line interface for the `haudoi` link search tool.

use std::process::ExitCode;

use haudoi::{
    cli::{CommandContext, args::parse_cli, commands},
    logging,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let ctx = if cli.command.needs_config() {
        CommandContext::load(cli.config.as_deref())
    } else {
        CommandContext::load_cwd_only()
    };

    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
