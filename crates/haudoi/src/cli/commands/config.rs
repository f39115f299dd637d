//! Implementation of `haudoi config`.

use std::process::ExitCode;

use crate::cli::context::CommandContext;

/// Shows the effective configuration as TOML.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    let rendered = match config.to_toml() {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match &config.source {
        Some(path) => println!("# source: {}", path.display()),
        None => println!("# source: built-in defaults"),
    }
    print!("{rendered}");
    ExitCode::SUCCESS
}
