use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    /// Index name is unique within the table
    pub name: String,

    /// Fields included in the index, in order
    pub fields: Vec<String>,

    /// When `true`, indexed entries are unique
    pub unique: bool,

    pub method: Option<String>,

    /// Predicate of a partial index
    pub predicate: Option<String>,

    pub source: IndexSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexSource {
    /// Declared on the entity
    Declared,

    /// Implied by a reference field or a belongs-to key
    ForeignKey,

    /// Implied by a unique field
    Unique,
}

impl Index {
    pub fn covers(&self, fields: &[&str]) -> bool {
        self.fields.len() == fields.len()
            && fields.iter().all(|field| self.fields.iter().any(|f| f == field))
    }
}
