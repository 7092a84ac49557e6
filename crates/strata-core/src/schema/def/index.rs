use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDef {
    /// Index name. Derived from the table and fields when absent.
    #[serde(default)]
    pub name: Option<String>,

    pub fields: Vec<String>,

    #[serde(default)]
    pub unique: bool,

    /// Access method (`btree`, `gin`, ...)
    #[serde(default, alias = "using")]
    pub method: Option<String>,

    /// Predicate of a partial index, as opaque SQL
    #[serde(default, rename = "where")]
    pub predicate: Option<String>,
}

impl IndexDef {
    pub fn on<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            fields: fields.into_iter().map(Into::into).collect(),
            unique: false,
            method: None,
            predicate: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }
}
