mod computed;
mod field;
mod index;
mod lookup;
mod policy;
mod procedure;
mod relation;
mod sort;

use lookup::EntityLookup;
use relation::ResolveRelation;

use super::{app, def, Analysis, Inflector, Name, Schema};
use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::{Config, Result};

use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct Builder {
    config: Config,
}

/// Used to track state during the build process
struct BuildSchema<'a> {
    /// Build options
    builder: &'a Builder,

    defs: &'a [def::EntityDef],

    /// Resolves entity names in any number or casing
    lookup: EntityLookup,

    /// Derived names of every entity, by definition index
    names: Vec<EntityNames>,

    /// Entities named as the join entity of some many-to-many relation
    join_entities: HashSet<usize>,

    diagnostics: Diagnostics,
}

/// Names derived from an entity's declared name.
#[derive(Debug, Clone)]
pub(crate) struct EntityNames {
    pub(crate) singular: String,
    pub(crate) plural: String,
    pub(crate) display_name: String,
    pub(crate) table: String,
    pub(crate) path: String,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    /// Analyzes `defs` into a schema ordered for creation.
    ///
    /// Authoring gaps are filled with defaults and reported in
    /// [`Analysis::diagnostics`]. Only a malformed entity set (duplicate
    /// names, relations to entities that do not exist) is an error.
    pub fn build(&self, defs: &[def::EntityDef]) -> Result<Analysis> {
        let lookup = EntityLookup::new(defs, Inflector::new(&self.config))?;

        let mut builder = BuildSchema {
            builder: self,
            defs,
            names: vec![],
            join_entities: HashSet::new(),
            lookup,
            diagnostics: Diagnostics::new(),
        };

        builder.names = defs.iter().map(|def| builder.entity_names(def)).collect();
        builder.join_entities = builder.find_join_entities();

        let mut entities = Vec::with_capacity(defs.len());

        for (index, def) in defs.iter().enumerate() {
            let entity = builder
                .build_entity(index, def)
                .map_err(|err| err.context(crate::err!("analyzing entity `{}`", def.name)))?;

            tracing::debug!(
                entity = %entity.name,
                table = %entity.table,
                fields = entity.fields.len(),
                relations = entity.relations.len(),
                depends_on = ?entity.depends_on,
                "analyzed entity"
            );

            entities.push(entity);
        }

        let entities = sort::sort(entities, &mut builder.diagnostics);

        let schema = Schema { entities };

        // Verify the schema structure
        schema.verify()?;

        tracing::info!(
            entities = schema.len(),
            diagnostics = builder.diagnostics.len(),
            "schema analyzed"
        );

        Ok(Analysis {
            schema,
            diagnostics: builder.diagnostics,
        })
    }
}

impl BuildSchema<'_> {
    fn entity_names(&self, def: &def::EntityDef) -> EntityNames {
        let config = &self.builder.config;
        let inflector = self.lookup.inflector();

        let singular = Name::new(&inflector.singular(&def.name)).upper_camel_case();
        let plural = Name::new(&inflector.plural(&singular)).upper_camel_case();

        let table = config
            .table_override(&def.name)
            .or(def.table.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| Name::new(&plural).snake_case());

        EntityNames {
            display_name: def
                .display_name
                .clone()
                .unwrap_or_else(|| Name::new(&singular).title_case()),
            path: format!("{}/{}", config.base_path(), Name::new(&plural).kebab_case()),
            table,
            singular,
            plural,
        }
    }

    fn find_join_entities(&self) -> HashSet<usize> {
        self.defs
            .iter()
            .flat_map(|def| def.relations.values())
            .filter(|relation| relation.kind == def::RelationKind::ManyToMany)
            .filter_map(|relation| relation.through.as_deref())
            .filter_map(|through| self.lookup.resolve(through))
            .collect()
    }

    fn build_entity(&mut self, index: usize, def: &def::EntityDef) -> Result<app::Entity> {
        let names = self.names[index].clone();

        let mut fields = self.build_fields(index, def);

        let mut relations = Vec::with_capacity(def.relations.len());
        let resolver = ResolveRelation {
            defs: self.defs,
            lookup: &self.lookup,
        };
        for (name, relation) in &def.relations {
            relations.push(resolver.resolve(index, name, relation, &mut self.diagnostics)?);
        }

        let primary_key = match field::primary_key(&fields) {
            Some(position) => {
                fields[position].primary_key = true;
                fields[position].read_only = true;
                fields[position].name.clone()
            }
            None => {
                // Entities without an identifier get an implicit one
                let mut id = field::analyze("id", &def::FieldDef::id());
                id.primary_key = true;
                fields.insert(0, id);
                "id".to_string()
            }
        };

        let depends_on = self.depends_on(index, &fields, &relations);

        let computed = def
            .computed
            .iter()
            .map(|(name, computed)| app::Computed {
                name: name.clone(),
                ty: computed.ty.unwrap_or_else(|| computed::infer(name)),
                inferred: computed.ty.is_none(),
                expression: computed.expression.clone(),
            })
            .collect();

        let indexes = index::plan(&names.table, &def.indexes, &fields, &relations);

        let procedures = def
            .procedures
            .iter()
            .map(|(name, procedure)| procedure::analyze(name, procedure, &self.lookup, &self.names))
            .collect();

        Ok(app::Entity {
            name: def.name.clone(),
            singular: names.singular,
            plural: names.plural,
            display_name: names.display_name,
            table: names.table,
            path: names.path,
            primary_key,
            fields,
            relations,
            computed,
            depends_on,
            junction: def.junction || self.join_entities.contains(&index),
            policy: policy::normalize(def.policy.as_ref()),
            indexes,
            procedures,
            tags: def.tags.clone(),
            module: def.module.clone(),
            group: def.group.clone(),
            metadata: def.metadata.clone(),
        })
    }

    /// Analyzes every field and canonicalizes reference targets.
    fn build_fields(&mut self, index: usize, def: &def::EntityDef) -> Vec<app::Field> {
        let mut fields = Vec::with_capacity(def.fields.len());

        for (name, field_def) in &def.fields {
            let mut field = field::analyze(name, field_def);
            self.canonicalize_references(index, &mut field);
            fields.push(field);
        }

        fields
    }

    fn canonicalize_references(&mut self, index: usize, field: &mut app::Field) {
        if let Some(target) = field.reference.clone() {
            match self.lookup.canonical(&target) {
                Some(canonical) => field.reference = Some(canonical.to_string()),
                None => {
                    let entity = self.lookup.name(index);
                    self.diagnostics.push(
                        Diagnostic::new(
                            DiagnosticKind::UnknownReference,
                            entity,
                            format!(
                                "field `{}` references unknown entity `{target}`; it is not treated as a dependency",
                                field.name
                            ),
                        )
                        .target(&target)
                        .fix(format!("declare entity `{target}` or fix the field's target")),
                    );
                }
            }
        }

        if let Some(item) = field.item.as_deref_mut() {
            self.canonicalize_references(index, item);
        }

        for member in &mut field.shape {
            self.canonicalize_references(index, member);
        }
    }

    /// Belongs-to targets and reference targets, excluding the entity itself
    /// and unknown entities, in declaration order.
    fn depends_on(
        &self,
        index: usize,
        fields: &[app::Field],
        relations: &[app::Relation],
    ) -> Vec<String> {
        let own = self.lookup.name(index);

        let targets = relations
            .iter()
            .filter(|relation| relation.is_belongs_to())
            .map(|relation| relation.target.as_str())
            .chain(fields.iter().filter_map(|field| field.reference.as_deref()));

        let mut depends_on: Vec<String> = vec![];
        for target in targets {
            let known = self.lookup.canonical(target) == Some(target);
            if known && target != own && !depends_on.iter().any(|name| name == target) {
                depends_on.push(target.to_string());
            }
        }

        depends_on
    }
}
