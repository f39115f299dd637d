//! Implementation of `haudoi check`.

use std::process::ExitCode;

use haudoi_config::{ConfigWarning, is_global_config};

use crate::cli::context::CommandContext;

/// Shows the configuration in use and reports validation warnings.
///
/// Exits with failure when there are warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    match &config.source {
        Some(path) => {
            let scope = if is_global_config(path) { "global" } else { "local" };
            println!("Config file:");
            println!("   {} ({scope})", path.display());
        }
        None => {
            println!("No configuration file found; using built-in defaults.");
            println!("Run 'haudoi init' to create one.");
        }
    }
    println!();

    println!("Fields:");
    if config.fields.is_empty() {
        println!("   (none defined)");
    }
    for field in &config.fields {
        println!(
            "   {:<12} {:<8} -> {}",
            field.name,
            field.kind.to_string(),
            field.column()
        );
    }
    println!();

    println!("Loose columns:");
    if config.search.loose_columns.is_empty() {
        println!("   (none)");
    } else {
        println!("   {}", config.search.loose_columns.join(", "));
    }
    println!();

    println!("Store:");
    match &config.store.path {
        Some(path) if path.is_file() => println!("   {}", path.display()),
        Some(path) => println!("   {} [missing]", path.display()),
        None => println!("   (not configured)"),
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("Warnings ({}):", warnings.len());
    for warning in &warnings {
        println!("   - {warning}");
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<_> = warnings.iter().map(hint).collect();
    hints.sort_unstable();
    hints.dedup();

    println!("Hints:");
    for hint in hints {
        println!("   - {hint}");
    }
}

/// Suggests a fix for a warning.
fn hint(warning: &ConfigWarning) -> &'static str {
    match warning {
        ConfigWarning::NoFieldsDefined => {
            "Add [[field]] entries, or remove `field = []` to use the defaults."
        }
        ConfigWarning::NoLooseColumns => "Set [search] loose_columns so bare terms can match.",
        ConfigWarning::LooseColumnUnregistered { .. } => {
            "Loose columns usually repeat a field's column; check for typos."
        }
        ConfigWarning::FieldNameUnreachable { .. } => {
            "Rename fields so they contain no spaces, quotes, or colons."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_warning_has_a_hint() {
        let warnings = [
            ConfigWarning::NoFieldsDefined,
            ConfigWarning::NoLooseColumns,
            ConfigWarning::LooseColumnUnregistered {
                column: "x".into(),
            },
            ConfigWarning::FieldNameUnreachable { name: "a b".into() },
        ];
        for warning in &warnings {
            assert!(!hint(warning).is_empty());
        }
    }
}
