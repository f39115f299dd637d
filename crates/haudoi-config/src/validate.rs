//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use haudoi_dsl::{Ident, is_queryable_field_name};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No fields are declared, so every `name:value` term is an unknown field.
    NoFieldsDefined,
    /// No loose columns are configured, so bare terms fail to compile.
    NoLooseColumns,
    /// A loose column is not the column of any declared field.
    LooseColumnUnregistered {
        /// The loose column.
        column: String,
    },
    /// A field name can never appear on the left of a `name:value` term.
    FieldNameUnreachable {
        /// The field name.
        name: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFieldsDefined => write!(f, "no fields are defined in configuration"),
            Self::NoLooseColumns => {
                write!(f, "no loose columns configured; bare search terms will fail")
            }
            Self::LooseColumnUnregistered { column } => {
                write!(f, "loose column '{column}' is not the column of any field")
            }
            Self::FieldNameUnreachable { name } => {
                write!(
                    f,
                    "field '{name}' contains whitespace, a quote, or a colon and cannot be queried"
                )
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.fields.is_empty() {
        warnings.push(ConfigWarning::NoFieldsDefined);
    }

    if config.search.loose_columns.is_empty() {
        warnings.push(ConfigWarning::NoLooseColumns);
    }

    for field in &config.fields {
        if !field.name.is_empty() && !is_queryable_field_name(&field.name) {
            warnings.push(ConfigWarning::FieldNameUnreachable {
                name: field.name.clone(),
            });
        }
    }

    // Only meaningful when fields exist to compare against
    if !config.fields.is_empty() {
        for column in &config.search.loose_columns {
            let bare = bare_column(column);
            if !config
                .fields
                .iter()
                .any(|field| bare_column(field.column()) == bare)
            {
                warnings.push(ConfigWarning::LooseColumnUnregistered {
                    column: column.clone(),
                });
            }
        }
    }

    warnings
}

/// Strips any relation prefix, so `l.title` and `title` compare equal.
fn bare_column(column: &str) -> String {
    Ident::parse(column)
        .map(|ident| ident.column().to_string())
        .unwrap_or_else(|_| column.to_string())
}

#[cfg(test)]
mod tests {
    use haudoi_dsl::FieldKind;

    use super::*;
    use crate::{FieldSpec, SearchSettings};

    fn field(name: &str, column: Option<&str>) -> FieldSpec {
        FieldSpec {
            name: name.into(),
            kind: FieldKind::String,
            column: column.map(String::from),
        }
    }

    #[test]
    fn default_config_is_clean() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn empty_config() {
        let config = Config {
            fields: vec![],
            search: SearchSettings {
                loose_columns: vec![],
            },
            ..Config::default()
        };
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::NoFieldsDefined, ConfigWarning::NoLooseColumns]
        );
    }

    #[test]
    fn loose_column_compared_to_effective_column() {
        let config = Config {
            fields: vec![field("title", Some("l.title")), field("url", None)],
            search: SearchSettings {
                loose_columns: vec!["l.title".into(), "url".into(), "note".into()],
            },
            ..Config::default()
        };
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::LooseColumnUnregistered {
                column: "note".into()
            }]
        );
    }

    #[test]
    fn relation_prefix_does_not_matter() {
        let config = Config {
            fields: vec![field("title", None), field("url", Some("l.url"))],
            search: SearchSettings {
                loose_columns: vec!["l.title".into(), "url".into()],
            },
            ..Config::default()
        };
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn unreachable_field_names() {
        let config = Config {
            fields: vec![
                field("due date", Some("due")),
                field("a:b", Some("ab")),
                field("ok", None),
            ],
            search: SearchSettings {
                loose_columns: vec!["ok".into()],
            },
            ..Config::default()
        };
        let warnings = validate_config(&config);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.contains(&ConfigWarning::FieldNameUnreachable {
            name: "due date".into()
        }));
        assert!(warnings[1].to_string().contains("'a:b'"));
    }

    #[test]
    fn warning_display() {
        assert_eq!(
            ConfigWarning::NoFieldsDefined.to_string(),
            "no fields are defined in configuration"
        );
        assert_eq!(
            ConfigWarning::LooseColumnUnregistered {
                column: "l.note".into()
            }
            .to_string(),
            "loose column 'l.note' is not the column of any field"
        );
    }
}
