use indexmap::IndexMap;
use serde::Deserialize;

/// Project-level knobs for the analysis stage.
///
/// Loading the configuration from disk is the job of the surrounding tool;
/// the stage only consumes the materialized value.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Irregular plurals, keyed by singular form (`"person" => "people"`).
    pub plurals: IndexMap<String, String>,

    /// Storage table names, keyed by entity name. Takes precedence over the
    /// table name declared on the entity itself.
    pub tables: IndexMap<String, String>,

    /// Prefix of every entity's externally addressable path (`"/api"`).
    pub path_prefix: String,
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an irregular plural
    pub fn plural(mut self, singular: impl Into<String>, plural: impl Into<String>) -> Self {
        self.plurals.insert(singular.into(), plural.into());
        self
    }

    /// Map an entity to an explicit storage table
    pub fn table(mut self, entity: impl Into<String>, table: impl Into<String>) -> Self {
        self.tables.insert(entity.into(), table.into());
        self
    }

    /// Set the path prefix. A trailing `/` is dropped.
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.path_prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    /// The path prefix without trailing `/`, however the value was loaded.
    pub(crate) fn base_path(&self) -> &str {
        self.path_prefix.trim_end_matches('/')
    }

    pub(crate) fn table_override(&self, entity: &str) -> Option<&str> {
        self.tables.get(entity).map(String::as_str)
    }
}
