//! Clap argument definitions for the `haudoi` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Default number of rows returned by `haudoi search`.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "haudoi")]
#[command(about = "Search saved links with a GitHub-style query language")]
pub struct Cli {
    /// Use this configuration file instead of discovering one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// A query given as one or more words, joined with single spaces.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Search query; quote it to keep quoted values intact
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,
}

impl QueryArgs {
    /// Returns the query text.
    pub fn text(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for `haudoi parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    #[command(flatten)]
    /// Query text.
    pub query: QueryArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `haudoi sql`.
#[derive(Args, Debug, Clone)]
pub struct SqlCommand {
    #[command(flatten)]
    /// Query text.
    pub query: QueryArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `haudoi search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    #[command(flatten)]
    /// Query text.
    pub query: QueryArgs,

    /// Link database; overrides [store] path from the configuration
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Maximum links to return [default: 20]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `haudoi init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.haudoi.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Help text describing the query language.
const QUERY_HELP: &str = "\
QUERY SYNTAX:
  term              Term must appear in one of the loose columns
  field:value       Registered field must match
  field:\"a b\"       Quoted value; '...' and `...` also work
  term1 term2       All terms must match (implicit AND)

  At most 5 terms. Field names are case sensitive. Boolean fields accept
  true or false in any case; text matching ignores case.

EXAMPLES:
  haudoi search github
  haudoi search 'archive:false title:\"release notes\"'
  haudoi search favorite:true rust -n 5";

/// Supported `haudoi` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search the link store
    #[command(after_help = QUERY_HELP)]
    Search(SearchCommand),

    /// Show how a query is parsed
    #[command(after_help = QUERY_HELP)]
    Parse(ParseCommand),

    /// Show the SQL predicate a query compiles to
    #[command(after_help = QUERY_HELP)]
    Sql(SqlCommand),

    /// Initialize haudoi configuration in current directory
    Init(InitCommand),

    /// Show effective configuration
    Config,

    /// Validate configuration and diagnose issues
    Check,
}

impl Commands {
    /// Returns false for commands that must work even when the existing
    /// configuration is invalid.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::Init(_))
    }
}

/// Parses CLI arguments, exiting with usage on error.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
