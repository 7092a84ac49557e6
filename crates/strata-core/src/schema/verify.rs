mod relation_keys;

use super::{app::Entity, Schema};
use crate::{Error, Result};

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        self.verify_each_entity_once()?;

        for entity in self.schema.entities() {
            self.verify_primary_key_exists(entity)?;
            self.verify_relation_targets_exist(entity)?;
            self.verify_depends_on_exist(entity)?;
            self.verify_belongs_to_keys_exist(entity)?;
            self.verify_index_names_are_unique(entity)?;
        }

        Ok(())
    }

    fn verify_each_entity_once(&self) -> Result<()> {
        let mut names = HashSet::new();

        for entity in self.schema.entities() {
            if !names.insert(&entity.name) {
                return Err(Error::invariant_violation(format!(
                    "entity `{}` appears more than once in the order",
                    entity.name
                )));
            }
        }

        Ok(())
    }

    fn verify_primary_key_exists(&self, entity: &Entity) -> Result<()> {
        match entity.primary_key_field() {
            Some(field) if field.primary_key => Ok(()),
            _ => Err(Error::invariant_violation(format!(
                "primary key `{}` of entity `{}` is not a marked field",
                entity.primary_key, entity.name
            ))),
        }
    }

    fn verify_relation_targets_exist(&self, entity: &Entity) -> Result<()> {
        for relation in &entity.relations {
            if self.schema.entity(&relation.target).is_none() {
                return Err(Error::invariant_violation(format!(
                    "relation `{}.{}` targets `{}`, which is not part of the schema",
                    entity.name, relation.name, relation.target
                )));
            }
        }

        Ok(())
    }

    fn verify_depends_on_exist(&self, entity: &Entity) -> Result<()> {
        for dependency in &entity.depends_on {
            if dependency == &entity.name || self.schema.entity(dependency).is_none() {
                return Err(Error::invariant_violation(format!(
                    "entity `{}` depends on `{dependency}`, which is not another entity of the schema",
                    entity.name
                )));
            }
        }

        Ok(())
    }

    fn verify_index_names_are_unique(&self, entity: &Entity) -> Result<()> {
        let mut names = HashSet::new();

        for index in &entity.indexes {
            if !names.insert(&index.name) {
                return Err(Error::invalid_schema(format!(
                    "duplicate index name `{}` on entity `{}`",
                    index.name, entity.name
                )));
            }
        }

        Ok(())
    }
}
