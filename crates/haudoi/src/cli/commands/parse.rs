//! Implementation of `haudoi parse`.

use std::process::ExitCode;

use haudoi_dsl::{Matcher, ParseResult};

use crate::cli::{
    args::ParseCommand,
    context::CommandContext,
    output::{format_param, print_json, report_query_error},
};

/// Parses a query and prints its matchers and per-term errors.
///
/// Exits with failure if any term was rejected.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let schema = match ctx.schema() {
        Ok(schema) => schema,
        Err(code) => return code,
    };

    let result = match schema.parse(&cmd.query.text()) {
        Ok(result) => result,
        Err(e) => return report_query_error(&e),
    };

    let code = if cmd.json {
        print_json(&result)
    } else {
        print_result(&result);
        ExitCode::SUCCESS
    };

    if result.has_errors() {
        ExitCode::FAILURE
    } else {
        code
    }
}

/// Prints matchers and errors as indented sections.
fn print_result(result: &ParseResult) {
    if result.matchers.is_empty() && !result.has_errors() {
        println!("(empty query: matches every link)");
        return;
    }

    if !result.matchers.is_empty() {
        println!("Matchers ({}):", result.matchers.len());
        for matcher in &result.matchers {
            println!("   {}", describe_matcher(matcher));
        }
    }

    if result.has_errors() {
        println!("Errors ({}):", result.errors.len());
        for error in &result.errors {
            println!("   {error}");
        }
    }
}

/// One-line description of a matcher with its bound values.
fn describe_matcher(matcher: &Matcher) -> String {
    match matcher {
        Matcher::Field { name, predicate } => {
            let params: Vec<_> = predicate.params().iter().map(format_param).collect();
            format!("{name}: {predicate}  [{}]", params.join(", "))
        }
        Matcher::Loose { value } => format!("loose: {value}"),
    }
}

#[cfg(test)]
mod tests {
    use haudoi_dsl::{Fragment, Ident};

    use super::*;

    #[test]
    fn describes_field_matcher() {
        let column = Ident::parse("archive").unwrap();
        let matcher = Matcher::Field {
            name: "archive".into(),
            predicate: Fragment::bool_eq(&column, false),
        };
        assert_eq!(describe_matcher(&matcher), "archive: \"archive\" = ?  [0]");
    }

    #[test]
    fn describes_loose_matcher() {
        assert_eq!(describe_matcher(&Matcher::loose("a b")), "loose: a b");
    }
}
