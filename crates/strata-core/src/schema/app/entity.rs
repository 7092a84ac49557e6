use super::{Computed, Field, Index, Policy, Procedure, Relation};

use indexmap::IndexMap;
use serde::Serialize;

/// One analyzed entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Canonical name, as declared
    pub name: String,

    pub singular: String,

    pub plural: String,

    pub display_name: String,

    /// Storage table name
    pub table: String,

    /// Externally addressable path (`/api/blog-posts`)
    pub path: String,

    /// Name of the identifying field
    pub primary_key: String,

    pub fields: Vec<Field>,

    pub relations: Vec<Relation>,

    pub computed: Vec<Computed>,

    /// Entities whose records must exist before records of this entity can
    /// be created
    pub depends_on: Vec<String>,

    /// True if the entity only joins two others
    pub junction: bool,

    pub policy: Policy,

    pub indexes: Vec<Index>,

    pub procedures: Vec<Procedure>,

    pub tags: Vec<String>,

    pub module: Option<String>,

    pub group: Option<String>,

    pub metadata: IndexMap<String, serde_json::Value>,
}

impl Entity {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|relation| relation.name == name)
    }

    pub fn computed(&self, name: &str) -> Option<&Computed> {
        self.computed.iter().find(|computed| computed.name == name)
    }

    pub fn procedure(&self, name: &str) -> Option<&Procedure> {
        self.procedures.iter().find(|procedure| procedure.name == name)
    }

    pub fn primary_key_field(&self) -> Option<&Field> {
        self.field(&self.primary_key)
    }

    pub fn depends_on(&self, entity: &str) -> bool {
        self.depends_on.iter().any(|name| name == entity)
    }
}
