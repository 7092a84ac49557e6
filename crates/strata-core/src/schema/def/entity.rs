use super::{ComputedDef, FieldDef, IndexDef, PolicyDef, ProcedureDef, RelationDef};

use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDef {
    /// Name of the entity, in any casing and either number
    pub name: String,

    #[serde(default)]
    pub fields: IndexMap<String, FieldDef>,

    #[serde(default)]
    pub relations: IndexMap<String, RelationDef>,

    /// Computed properties. Those without a declared type have it inferred
    /// from their name.
    #[serde(default)]
    pub computed: IndexMap<String, ComputedDef>,

    #[serde(default, alias = "rls")]
    pub policy: Option<PolicyDef>,

    #[serde(default)]
    pub indexes: Vec<IndexDef>,

    #[serde(default, alias = "rpc")]
    pub procedures: IndexMap<String, ProcedureDef>,

    /// Storage table name, when it should not be derived from the name
    #[serde(default)]
    pub table: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Marks the entity as the join table of a many-to-many relation
    #[serde(default)]
    pub junction: bool,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub group: Option<String>,

    #[serde(default)]
    pub metadata: IndexMap<String, serde_json::Value>,
}

impl EntityDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            relations: IndexMap::new(),
            computed: IndexMap::new(),
            policy: None,
            indexes: vec![],
            procedures: IndexMap::new(),
            table: None,
            display_name: None,
            junction: false,
            tags: vec![],
            module: None,
            group: None,
            metadata: IndexMap::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, field: FieldDef) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    pub fn relation(mut self, name: impl Into<String>, relation: RelationDef) -> Self {
        self.relations.insert(name.into(), relation);
        self
    }

    pub fn computed(mut self, name: impl Into<String>, computed: ComputedDef) -> Self {
        self.computed.insert(name.into(), computed);
        self
    }

    pub fn policy(mut self, policy: PolicyDef) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn index(mut self, index: IndexDef) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn procedure(mut self, name: impl Into<String>, procedure: ProcedureDef) -> Self {
        self.procedures.insert(name.into(), procedure);
        self
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn junction(mut self) -> Self {
        self.junction = true;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
