//! Search query DSL for haudoi.
//!
//! Queries look like GitHub's issue search:
//!
//! - **Fields**: `archive:true`, `title:rust` - match a registered field
//! - **Quoting**: `title:"hello world"`, `'a b'`, `` `a b` `` - values with spaces or colons
//! - **Loose terms**: `github` - matched against a set of default columns
//! - **AND**: whitespace between terms; there is no OR, NOT, or grouping
//!
//! At most [`MAX_TOKENS`] terms are accepted. Field names are case-sensitive.
//! Boolean values are `true`/`false` in any case, and string matching is
//! case-insensitive substring containment.
//!
//! Queries compile to a [`Fragment`]: SQL template text with `?` placeholders
//! and the values bound to them. Query text never ends up in the template.
//!
//! # Example
//!
//! ```
//! use haudoi_dsl::{FieldDescriptor, Ident, SearchSchema};
//!
//! let schema = SearchSchema::new(
//!     vec![
//!         FieldDescriptor::boolean_column("archive", Ident::parse("archive").unwrap()),
//!         FieldDescriptor::string_column("title", Ident::parse("title").unwrap()),
//!     ],
//!     vec![Ident::parse("title").unwrap(), Ident::parse("url").unwrap()],
//! )
//! .unwrap();
//!
//! let fragment = schema.query("archive:false github").unwrap();
//! assert_eq!(fragment.params().len(), 3);
//! ```

#![warn(missing_docs)]

mod compile;
mod error;
mod field;
mod fragment;
mod lexer;
mod matcher;
mod parser;
mod schema;

pub use compile::matchers_to_sql;
pub use error::{DslError, ParseIssue};
pub use field::{
    BoolColumn, BoolGenerator, ContainsColumn, FieldDescriptor, FieldKind, PredicateGenerator,
    TextGenerator, find_field,
};
pub use fragment::{ALWAYS_TRUE, Fragment, Ident, SqlValue};
pub use lexer::{MAX_TOKENS, Token, is_queryable_field_name, tokenize};
pub use matcher::{Matcher, ParseResult};
pub use parser::parse_dsl;
pub use schema::SearchSchema;
