//! Error types for haudoi configuration.

use std::io;
use std::path::PathBuf;

use haudoi_dsl::DslError;
use thiserror::Error;
use toml::{de, ser};

/// Errors that can occur when loading or processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// Failed to render configuration as TOML.
    #[error("failed to serialize configuration: {0}")]
    SerializeToml(#[from] ser::Error),

    /// A field or loose column names an invalid SQL identifier.
    #[error("invalid column '{column}': {source}")]
    InvalidColumn {
        /// The configured column text.
        column: String,
        /// Underlying identifier error.
        source: DslError,
    },

    /// The declared fields do not form a valid schema, e.g. a name is repeated.
    #[error("invalid search schema: {0}")]
    Schema(#[from] DslError),

    /// A field was declared with an empty name.
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}
