use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationDef {
    #[serde(rename = "type", alias = "kind")]
    pub kind: RelationKind,

    /// Name of the related entity
    pub target: String,

    /// Field carrying the join value. Inferred when absent.
    #[serde(default)]
    pub foreign_key: Option<String>,

    /// Ordering of a `has-many` collection
    #[serde(default)]
    pub order_by: Option<OrderBy>,

    /// Maximum size of a `has-many` collection
    #[serde(default)]
    pub limit: Option<u64>,

    /// Load the related records together with the owner
    #[serde(default)]
    pub eager: bool,

    /// Join entity of a `many-to-many` relation
    #[serde(default)]
    pub through: Option<String>,

    /// Key on the join entity pointing at the target
    #[serde(default)]
    pub other_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    #[serde(alias = "belongs-to", alias = "belongs_to", alias = "belongsToOne")]
    BelongsTo,

    #[serde(alias = "has-many", alias = "has_many")]
    HasMany,

    #[serde(alias = "has-one", alias = "has_one")]
    HasOne,

    #[serde(alias = "many-to-many", alias = "many_to_many")]
    ManyToMany,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub field: String,

    #[serde(default)]
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl RelationDef {
    pub fn new(kind: RelationKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            foreign_key: None,
            order_by: None,
            limit: None,
            eager: false,
            through: None,
            other_key: None,
        }
    }

    pub fn belongs_to(target: impl Into<String>) -> Self {
        Self::new(RelationKind::BelongsTo, target)
    }

    pub fn has_many(target: impl Into<String>) -> Self {
        Self::new(RelationKind::HasMany, target)
    }

    pub fn has_one(target: impl Into<String>) -> Self {
        Self::new(RelationKind::HasOne, target)
    }

    pub fn many_to_many(target: impl Into<String>) -> Self {
        Self::new(RelationKind::ManyToMany, target)
    }

    pub fn foreign_key(mut self, key: impl Into<String>) -> Self {
        self.foreign_key = Some(key.into());
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn eager(mut self) -> Self {
        self.eager = true;
        self
    }

    pub fn through(mut self, join: impl Into<String>) -> Self {
        self.through = Some(join.into());
        self
    }

    pub fn other_key(mut self, key: impl Into<String>) -> Self {
        self.other_key = Some(key.into());
        self
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BelongsTo => "belongs-to",
            Self::HasMany => "has-many",
            Self::HasOne => "has-one",
            Self::ManyToMany => "many-to-many",
        })
    }
}
