//! Field registry types.
//!
//! A [`FieldDescriptor`] couples a DSL field name to its declared value type and
//! the [`PredicateGenerator`] that turns a validated value into a [`Fragment`].
//! Generators own the column identifiers they emit; nothing here derives an
//! identifier from query text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fragment::{Fragment, Ident};

/// Builds a predicate fragment from a typed field value.
pub trait PredicateGenerator<T: ?Sized> {
    /// Returns the predicate for `value`.
    fn build(&self, value: &T) -> Fragment;
}

impl<T, F> PredicateGenerator<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> Fragment,
{
    fn build(&self, value: &T) -> Fragment {
        self(value)
    }
}

/// Equality against a boolean column stored as `0`/`1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolColumn {
    /// Column compared against.
    pub column: Ident,
}

impl PredicateGenerator<bool> for BoolColumn {
    fn build(&self, value: &bool) -> Fragment {
        Fragment::bool_eq(&self.column, *value)
    }
}

/// Case-insensitive substring containment on a text column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainsColumn {
    /// Column searched.
    pub column: Ident,
}

impl PredicateGenerator<str> for ContainsColumn {
    fn build(&self, value: &str) -> Fragment {
        Fragment::contains(&self.column, value)
    }
}

/// Declared value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Accepts `true` or `false`, case-insensitively.
    Boolean,
    /// Accepts any text.
    String,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("boolean"),
            Self::String => f.write_str("string"),
        }
    }
}

/// Boxed generator for boolean fields.
pub type BoolGenerator = Box<dyn PredicateGenerator<bool> + Send + Sync>;

/// Boxed generator for string fields.
pub type TextGenerator = Box<dyn PredicateGenerator<str> + Send + Sync>;

/// A registered search field.
pub enum FieldDescriptor {
    /// A field whose values must be `true` or `false`.
    Boolean {
        /// Field name, matched case-sensitively.
        name: String,
        /// Predicate builder for a parsed boolean.
        generator: BoolGenerator,
    },
    /// A field whose raw value is passed through unchanged.
    String {
        /// Field name, matched case-sensitively.
        name: String,
        /// Predicate builder for the raw value.
        generator: TextGenerator,
    },
}

impl FieldDescriptor {
    /// Creates a boolean field with a custom generator.
    pub fn boolean<G>(name: impl Into<String>, generator: G) -> Self
    where
        G: PredicateGenerator<bool> + Send + Sync + 'static,
    {
        Self::Boolean {
            name: name.into(),
            generator: Box::new(generator),
        }
    }

    /// Creates a string field with a custom generator.
    pub fn string<G>(name: impl Into<String>, generator: G) -> Self
    where
        G: PredicateGenerator<str> + Send + Sync + 'static,
    {
        Self::String {
            name: name.into(),
            generator: Box::new(generator),
        }
    }

    /// Creates a boolean field compared for equality against `column`.
    pub fn boolean_column(name: impl Into<String>, column: Ident) -> Self {
        Self::boolean(name, BoolColumn { column })
    }

    /// Creates a string field matched by case-insensitive containment in `column`.
    pub fn string_column(name: impl Into<String>, column: Ident) -> Self {
        Self::string(name, ContainsColumn { column })
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        match self {
            Self::Boolean { name, .. } | Self::String { name, .. } => name,
        }
    }

    /// Returns the declared value type.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Boolean { .. } => FieldKind::Boolean,
            Self::String { .. } => FieldKind::String,
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

/// Finds a descriptor by exact, case-sensitive name.
pub fn find_field<'a>(fields: &'a [FieldDescriptor], name: &str) -> Option<&'a FieldDescriptor> {
    fields.iter().find(|field| field.name() == name)
}
