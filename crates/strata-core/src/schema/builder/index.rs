use crate::schema::{
    app::{Field, Index, IndexSource, KeySource, Relation},
    def::IndexDef,
    Name,
};

use std::collections::{BTreeSet, HashSet};

/// Plans the indexes of one entity.
///
/// Declared indexes come first and are always kept. Reference fields, local
/// belongs-to keys, and unique fields then each add an index unless one over
/// the same set of fields already exists.
pub(crate) fn plan(
    table: &str,
    declared: &[IndexDef],
    fields: &[Field],
    relations: &[Relation],
) -> Vec<Index> {
    let mut planner = IndexPlanner {
        table,
        indexes: vec![],
        seen: HashSet::new(),
    };

    for def in declared {
        planner.seen.insert(field_set(&def.fields));
        planner.indexes.push(Index {
            name: def
                .name
                .clone()
                .unwrap_or_else(|| default_name(table, &def.fields, def.unique)),
            fields: def.fields.clone(),
            unique: def.unique,
            method: def.method.clone(),
            predicate: def.predicate.clone(),
            source: IndexSource::Declared,
        });
    }

    for field in fields.iter().filter(|field| field.is_reference()) {
        planner.implied(&field.name, false, IndexSource::ForeignKey);
    }

    for relation in relations {
        let local_key = relation.is_belongs_to()
            && relation.key_source != KeySource::Defaulted
            && fields.iter().any(|field| field.name == relation.foreign_key);

        if local_key {
            planner.implied(&relation.foreign_key, false, IndexSource::ForeignKey);
        }
    }

    for field in fields.iter().filter(|field| field.unique && !field.primary_key) {
        planner.implied(&field.name, true, IndexSource::Unique);
    }

    planner.indexes
}

struct IndexPlanner<'a> {
    table: &'a str,
    indexes: Vec<Index>,

    /// Field sets already covered by an index
    seen: HashSet<BTreeSet<String>>,
}

impl IndexPlanner<'_> {
    fn implied(&mut self, field: &str, unique: bool, source: IndexSource) {
        let fields = vec![field.to_string()];

        if !self.seen.insert(field_set(&fields)) {
            return;
        }

        self.indexes.push(Index {
            name: default_name(self.table, &fields, unique),
            fields,
            unique,
            method: None,
            predicate: None,
            source,
        });
    }
}

fn field_set(fields: &[String]) -> BTreeSet<String> {
    fields.iter().cloned().collect()
}

/// `{table}_{fields}_idx`, or `{table}_{fields}_key` for unique indexes.
fn default_name(table: &str, fields: &[String], unique: bool) -> String {
    let columns = fields
        .iter()
        .map(|field| Name::new(field).snake_case())
        .collect::<Vec<_>>()
        .join("_");
    let suffix = if unique { "key" } else { "idx" };

    format!("{table}_{columns}_{suffix}")
}
