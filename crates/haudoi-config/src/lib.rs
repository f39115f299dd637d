//! Configuration system for haudoi.
//!
//! haudoi reads a TOML file named `.haudoi.toml` that declares the search
//! schema (fields and loose columns) and the link store location. The file
//! closest to the working directory wins; `~/.haudoi.toml` is used when no
//! local file exists, and the built-in defaults apply when neither does.

#![warn(missing_docs)]

mod discovery;
mod error;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_file, global_config_path, is_global_config};
pub use error::ConfigError;
use haudoi_dsl::{FieldDescriptor, FieldKind, Ident, SearchSchema};
pub use parse::{RawConfig, RawSearchSettings, RawStoreSettings, parse_config_file, parse_config_str};
pub use resolve::resolve_store_path;
use serde::{Deserialize, Serialize};
pub use templates::config_template;
use tracing::debug;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Effective configuration for haudoi.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Search settings.
    pub search: SearchSettings,
    /// Declared search fields, in order.
    pub fields: Vec<FieldSpec>,
    /// Link store settings.
    pub store: StoreSettings,
    /// The file this configuration was loaded from, if any.
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchSettings::default(),
            fields: default_fields(),
            store: StoreSettings::default(),
            source: None,
        }
    }
}

impl Config {
    /// Loads the configuration that applies to `cwd`.
    ///
    /// Returns `Ok(Config::default())` if no configuration file is found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        match discover_config_file(cwd) {
            Some(path) => Self::load_file(&path),
            None => {
                debug!(cwd = %cwd.display(), "no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads configuration from a specific file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = parse_config_file(path)?;
        let config = Self::from_raw(raw, Some(path))?;
        debug!(
            path = %path.display(),
            fields = config.fields.len(),
            loose_columns = config.search.loose_columns.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Builds a configuration from parsed TOML, filling missing sections with defaults.
    ///
    /// `path` is the file the TOML came from; relative store paths resolve
    /// against its directory, or against the current directory without one.
    /// The resulting search schema is checked eagerly, so an invalid column or
    /// a repeated field name fails here rather than at query time.
    pub fn from_raw(raw: RawConfig, path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(loose_columns) = raw.search.and_then(|search| search.loose_columns) {
            config.search.loose_columns = loose_columns;
        }

        if let Some(fields) = raw.field {
            config.fields = fields;
        }

        if let Some(store_path) = raw.store.and_then(|store| store.path) {
            let config_dir = path.and_then(Path::parent).unwrap_or(Path::new(""));
            config.store.path = Some(resolve_store_path(&store_path, config_dir)?);
        }

        config.source = path.map(Path::to_path_buf);
        config.search_schema()?;
        Ok(config)
    }

    /// Builds the search schema described by this configuration.
    pub fn search_schema(&self) -> Result<SearchSchema, ConfigError> {
        let fields = self
            .fields
            .iter()
            .map(FieldSpec::descriptor)
            .collect::<Result<Vec<_>, _>>()?;

        let loose_columns = self
            .search
            .loose_columns
            .iter()
            .map(|column| parse_column(column))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchSchema::new(fields, loose_columns)?)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - No declared fields
    /// - No loose columns
    /// - Field names the query syntax cannot express
    /// - Loose columns that are not the column of any field
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective configuration to TOML.
    ///
    /// The output is a valid `.haudoi.toml`. The store path is written in its
    /// resolved, absolute form.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableConfig {
            search: &self.search,
            field: &self.fields,
            store: &self.store,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSettings {
    /// Columns searched by loose terms, each optionally alias-qualified.
    pub loose_columns: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            loose_columns: vec!["title".into(), "url".into(), "note".into()],
        }
    }
}

/// A declared search field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    /// Name used on the left of `name:value`.
    pub name: String,
    /// Value type.
    pub kind: FieldKind,
    /// Column the predicate tests; defaults to the field name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl FieldSpec {
    /// Returns the column this field tests.
    pub fn column(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }

    /// Builds the DSL descriptor for this field.
    fn descriptor(&self) -> Result<FieldDescriptor, ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyFieldName);
        }

        let column = parse_column(self.column())?;
        Ok(match self.kind {
            FieldKind::Boolean => FieldDescriptor::boolean_column(&self.name, column),
            FieldKind::String => FieldDescriptor::string_column(&self.name, column),
        })
    }
}

/// Link store settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreSettings {
    /// Resolved path to the SQLite database.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// The fields registered when no configuration declares any.
fn default_fields() -> Vec<FieldSpec> {
    [
        ("archive", FieldKind::Boolean),
        ("favorite", FieldKind::Boolean),
        ("url", FieldKind::String),
        ("title", FieldKind::String),
        ("note", FieldKind::String),
    ]
    .into_iter()
    .map(|(name, kind)| FieldSpec {
        name: name.into(),
        kind,
        column: None,
    })
    .collect()
}

/// Parses a configured column into an identifier.
fn parse_column(column: &str) -> Result<Ident, ConfigError> {
    Ident::parse(column).map_err(|source| ConfigError::InvalidColumn {
        column: column.to_string(),
        source,
    })
}

/// Borrowed view of the configuration for TOML serialization.
#[derive(Serialize)]
struct SerializableConfig<'a> {
    /// Search settings.
    search: &'a SearchSettings,
    /// Declared fields, rendered as `[[field]]`.
    field: &'a [FieldSpec],
    /// Link store settings.
    store: &'a StoreSettings,
}

#[cfg(test)]
mod tests {
    use haudoi_dsl::{DslError, SqlValue};

    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn default_schema() {
        let config = Config::default();
        let schema = config.search_schema().unwrap();

        let names: Vec<_> = schema.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["archive", "favorite", "url", "title", "note"]);
        assert_eq!(schema.fields()[0].kind(), FieldKind::Boolean);
        assert_eq!(schema.fields()[4].kind(), FieldKind::String);
        assert_eq!(schema.loose_columns().len(), 3);
        assert!(config.store.path.is_none());
        assert!(config.source.is_none());
    }

    #[test]
    fn default_schema_compiles_reference_query() {
        let schema = Config::default().search_schema().unwrap();
        let frag = schema.query("archive:false github").unwrap();
        assert_eq!(
            frag.sql(),
            "\"archive\" = ? AND (instr(lower(\"title\"), lower(?)) != 0 OR instr(lower(\"url\"), lower(?)) != 0 OR instr(lower(\"note\"), lower(?)) != 0)"
        );
        assert_eq!(frag.params()[0], SqlValue::Integer(0));
    }

    #[test]
    fn missing_sections_use_defaults() {
        let raw = parse_config_str("[store]\npath = \"links.db\"\n", Path::new("x")).unwrap();
        let config = Config::from_raw(raw, None).unwrap();
        assert_eq!(config.fields, default_fields());
        assert_eq!(config.search, SearchSettings::default());
    }

    #[test]
    fn declared_fields_replace_defaults() {
        let toml = r#"
[search]
loose_columns = ["l.title"]

[[field]]
name = "starred"
kind = "boolean"
column = "l.favorite"
"#;
        let raw = parse_config_str(toml, Path::new("x")).unwrap();
        let config = Config::from_raw(raw, None).unwrap();
        assert_eq!(config.fields.len(), 1);
        assert_eq!(config.fields[0].column(), "l.favorite");

        let frag = config.search_schema().unwrap().query("starred:TRUE").unwrap();
        assert_eq!(frag.sql(), "\"l\".\"favorite\" = ?");
    }

    #[test]
    fn store_path_resolves_against_config_dir() {
        let dir = TestDir::new();
        let path = dir.create_config_with_content("project", "[store]\npath = \"data/links.db\"\n");

        let config = Config::load_file(&path).unwrap();
        assert_eq!(
            config.store.path,
            Some(dir.path().join("project").join("data/links.db"))
        );
        assert_eq!(config.source, Some(path));
    }

    #[test]
    fn load_discovers_nearest_file() {
        let dir = TestDir::new();
        dir.create_config_with_content("", "[search]\nloose_columns = [\"title\"]\n");
        let cwd = dir.create_dir("a/b");

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.search.loose_columns, vec!["title"]);
        assert_eq!(config.source, Some(dir.path().join(CONFIG_FILENAME)));
    }

    #[test]
    fn duplicate_field_rejected_on_load() {
        let toml = r#"
[[field]]
name = "title"
kind = "string"

[[field]]
name = "title"
kind = "boolean"
"#;
        let raw = parse_config_str(toml, Path::new("x")).unwrap();
        let err = Config::from_raw(raw, None).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Schema(DslError::DuplicateField { ref name }) if name == "title"
        ));
    }

    #[test]
    fn invalid_column_rejected_on_load() {
        let toml = r#"
[[field]]
name = "title"
kind = "string"
column = "l..title"
"#;
        let raw = parse_config_str(toml, Path::new("x")).unwrap();
        let err = Config::from_raw(raw, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColumn { ref column, .. } if column == "l..title"));

        let raw = parse_config_str("[search]\nloose_columns = [\"\"]\n", Path::new("x")).unwrap();
        assert!(matches!(
            Config::from_raw(raw, None),
            Err(ConfigError::InvalidColumn { .. })
        ));
    }

    #[test]
    fn empty_field_name_rejected() {
        let raw = parse_config_str("[[field]]\nname = \"\"\nkind = \"string\"\n", Path::new("x"))
            .unwrap();
        assert!(matches!(
            Config::from_raw(raw, None),
            Err(ConfigError::EmptyFieldName)
        ));
    }

    #[test]
    fn to_toml_round_trips() {
        let mut config = Config::default();
        config.fields[2].column = Some("l.url".into());
        config.store.path = Some(PathBuf::from("/var/lib/links.db"));

        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[search]"));
        assert!(rendered.contains("[[field]]"));
        assert!(rendered.contains("column = \"l.url\""));

        let raw = parse_config_str(&rendered, Path::new("x")).unwrap();
        let reloaded = Config::from_raw(raw, None).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn to_toml_omits_unset_store() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(!rendered.contains("path"));
    }
}
