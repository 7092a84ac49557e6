use super::*;
use crate::schema::app::KeySource;

impl Verify<'_> {
    // An inferred belongs-to key was found by scanning the owner's fields, so
    // it must name one of them.
    pub(super) fn verify_belongs_to_keys_exist(&self, entity: &Entity) -> Result<()> {
        let inferred = entity
            .relations
            .iter()
            .filter(|relation| relation.is_belongs_to() && relation.key_source == KeySource::Inferred);

        for relation in inferred {
            if entity.field(&relation.foreign_key).is_none() {
                return Err(Error::invariant_violation(format!(
                    "inferred foreign key `{}` of `{}.{}` is not a field of `{}`",
                    relation.foreign_key, entity.name, relation.name, entity.name
                )));
            }
        }

        Ok(())
    }
}
