//! haudoi: search saved links with a small query language.
//!
//! Queries such as `archive:false title:"release notes" github` are parsed by
//! `haudoi-dsl` against the schema described in `.haudoi.toml`, compiled to a
//! parameterized SQL predicate, and run against a SQLite link store.

#![warn(missing_docs)]

pub mod cli;
pub mod logging;
pub mod store;
