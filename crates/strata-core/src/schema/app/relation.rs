use crate::schema::def::OrderBy;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    /// Relation name as declared
    pub name: String,

    pub kind: RelationKind,

    /// Canonical name of the related entity
    pub target: String,

    /// Field carrying the join value.
    ///
    /// For `BelongsTo` the field lives on the owning entity. For `HasMany`
    /// and `HasOne` it is expected on the target, or on the join entity of a
    /// many-to-many relation.
    pub foreign_key: String,

    /// How `foreign_key` was determined
    pub key_source: KeySource,

    pub eager: bool,

    pub order_by: Option<OrderBy>,

    pub limit: Option<u64>,

    /// Set when the relation is many-to-many
    pub many_to_many: Option<ManyToMany>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    BelongsTo,
    HasMany,
    HasOne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeySource {
    /// Declared by the author
    Explicit,

    /// Found by matching fields or relations
    Inferred,

    /// Nothing matched; the documented default was used and a diagnostic
    /// emitted
    Defaulted,
}

/// Join information of a many-to-many relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManyToMany {
    /// Canonical join entity name. Falls back to the declared name when the
    /// entity does not exist.
    pub through: String,

    /// Key on the join entity pointing at the target
    pub other_key: String,
}

impl Relation {
    pub fn is_belongs_to(&self) -> bool {
        matches!(self.kind, RelationKind::BelongsTo)
    }

    pub fn is_has_many(&self) -> bool {
        matches!(self.kind, RelationKind::HasMany)
    }

    pub fn is_has_one(&self) -> bool {
        matches!(self.kind, RelationKind::HasOne)
    }

    pub fn is_many_to_many(&self) -> bool {
        self.many_to_many.is_some()
    }
}

impl RelationKind {
    pub fn is_has_n(self) -> bool {
        matches!(self, Self::HasMany | Self::HasOne)
    }
}
