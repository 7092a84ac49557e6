use super::EntityLookup;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::schema::{
    app::{KeySource, ManyToMany, Relation, RelationKind},
    def::{self, EntityDef, FieldKind, RelationDef},
    Name,
};
use crate::{Error, Result};

/// Resolves the declared relations of every entity against the full set.
pub(crate) struct ResolveRelation<'a> {
    pub(crate) defs: &'a [EntityDef],
    pub(crate) lookup: &'a EntityLookup,
}

impl ResolveRelation<'_> {
    /// Resolves relation `name` declared on the entity at `source`.
    ///
    /// Fails only when the relation targets an entity that does not exist.
    /// Every other gap is filled with a documented default and reported in
    /// `diagnostics`.
    pub(crate) fn resolve(
        &self,
        source: usize,
        name: &str,
        def: &RelationDef,
        diagnostics: &mut Diagnostics,
    ) -> Result<Relation> {
        let entity = self.lookup.name(source);
        let Some(target) = self.lookup.resolve(&def.target) else {
            return Err(Error::invalid_schema(format!(
                "relation `{entity}.{name}` targets unknown entity `{}`",
                def.target
            )));
        };

        let mut relation = Relation {
            name: name.to_string(),
            kind: RelationKind::BelongsTo,
            target: self.lookup.name(target).to_string(),
            foreign_key: String::new(),
            key_source: KeySource::Explicit,
            eager: def.eager,
            order_by: None,
            limit: None,
            many_to_many: None,
        };

        match def.kind {
            def::RelationKind::BelongsTo => {
                let (key, key_source) = match self.belongs_to_key(source, name, def, target) {
                    Some(found) => found,
                    None => {
                        let key = self.default_key(target);
                        diagnostics.push(
                            Diagnostic::new(
                                DiagnosticKind::ForeignKeyDefaulted,
                                entity,
                                format!(
                                    "no field on `{entity}` references `{}`; defaulted foreign key to `{key}`",
                                    relation.target
                                ),
                            )
                            .relation(name, def.kind)
                            .target(&relation.target)
                            .fix(format!(
                                "declare `foreignKey` on `{entity}.{name}` or add a `{key}` reference field"
                            )),
                        );
                        (key, KeySource::Defaulted)
                    }
                };

                relation.foreign_key = key;
                relation.key_source = key_source;
            }
            def::RelationKind::HasMany | def::RelationKind::HasOne => {
                relation.kind = match def.kind {
                    def::RelationKind::HasOne => RelationKind::HasOne,
                    _ => RelationKind::HasMany,
                };

                let (key, key_source) = self.has_n_key(source, name, def, target, target, diagnostics);
                relation.foreign_key = key;
                relation.key_source = key_source;
            }
            def::RelationKind::ManyToMany => {
                relation.kind = RelationKind::HasMany;

                let through = self.join_entity(source, name, def, diagnostics);
                let holder = through.unwrap_or(target);

                let (key, key_source) = self.has_n_key(source, name, def, target, holder, diagnostics);
                relation.foreign_key = key;
                relation.key_source = key_source;

                let other_key = match (&def.other_key, through) {
                    (Some(key), _) => key.clone(),
                    (None, Some(through)) => {
                        self.other_key(through, target, entity, name, def, diagnostics)
                    }
                    // Already reported as an unknown join entity
                    (None, None) => self.default_key(target),
                };

                relation.many_to_many = Some(ManyToMany {
                    through: match through {
                        Some(through) => self.lookup.name(through).to_string(),
                        None => def.through.clone().unwrap_or_default(),
                    },
                    other_key,
                });
            }
        }

        if relation.kind == RelationKind::HasMany {
            relation.order_by = def.order_by.clone();
            relation.limit = def.limit;
        }

        Ok(relation)
    }

    /// Key of a belongs-to relation declared on `owner` towards `target`.
    ///
    /// Returns `None` when neither a declaration nor a field matched.
    ///
    /// A reference field to the target is preferred over a field named after
    /// the relation. With `authorId` and `editorId` both referencing `User`,
    /// an `editor` relation without `foreignKey` resolves to `authorId`.
    fn belongs_to_key(
        &self,
        owner: usize,
        name: &str,
        def: &RelationDef,
        target: usize,
    ) -> Option<(String, KeySource)> {
        if let Some(key) = &def.foreign_key {
            return Some((key.clone(), KeySource::Explicit));
        }

        self.reference_field(owner, target)
            .or_else(|| self.key_named_after(owner, target, Some(name)))
            .map(|key| (key, KeySource::Inferred))
    }

    /// Key of a has-many or has-one relation from `source`, expected on
    /// `holder` (the target, or the join entity of a many-to-many relation).
    fn has_n_key(
        &self,
        source: usize,
        name: &str,
        def: &RelationDef,
        target: usize,
        holder: usize,
        diagnostics: &mut Diagnostics,
    ) -> (String, KeySource) {
        if let Some(key) = &def.foreign_key {
            return (key.clone(), KeySource::Explicit);
        }

        let entity = self.lookup.name(source);
        let holder_name = self.lookup.name(holder);

        let back_refs: Vec<_> = self.defs[holder]
            .relations
            .iter()
            .filter(|(_, rel)| {
                rel.kind == def::RelationKind::BelongsTo && self.lookup.refers_to(&rel.target, source)
            })
            .collect();

        let from_back_ref = back_refs.iter().find_map(|(back_name, back)| {
            self.belongs_to_key(holder, back_name, back, source)
                .map(|(key, _)| (back_name.as_str(), key))
        });

        // Ambiguity only matters once one of the back-references decided the key
        if let Some((chosen, _)) = from_back_ref.as_ref().filter(|_| back_refs.len() > 1) {
            let names = back_refs
                .iter()
                .map(|(name, _)| format!("`{name}`"))
                .collect::<Vec<_>>()
                .join(", ");
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::AmbiguousForeignKey,
                    entity,
                    format!(
                        "`{holder_name}` has several relations pointing back at `{entity}` ({names}); using `{chosen}`"
                    ),
                )
                .relation(name, def.kind)
                .target(self.lookup.name(target))
                .fix(format!("declare `foreignKey` on `{entity}.{name}`")),
            );
        }

        let found = from_back_ref
            .map(|(_, key)| key)
            .or_else(|| self.reference_field(holder, source))
            .or_else(|| self.key_named_after(holder, source, None));

        if let Some(key) = found {
            return (key, KeySource::Inferred);
        }

        let key = self.default_key(source);
        diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::ForeignKeyDefaulted,
                entity,
                format!(
                    "nothing on `{holder_name}` points back at `{entity}`; expecting foreign key `{key}` on `{holder_name}`"
                ),
            )
            .relation(name, def.kind)
            .target(self.lookup.name(target))
            .fix(format!(
                "declare `foreignKey` on `{entity}.{name}` or a belongs-to relation on `{holder_name}`"
            )),
        );
        (key, KeySource::Defaulted)
    }

    /// Key on the join entity pointing at the far side of a many-to-many
    /// relation.
    fn other_key(
        &self,
        through: usize,
        target: usize,
        entity: &str,
        name: &str,
        def: &RelationDef,
        diagnostics: &mut Diagnostics,
    ) -> String {
        let found = self.defs[through]
            .relations
            .iter()
            .filter(|(_, rel)| {
                rel.kind == def::RelationKind::BelongsTo && self.lookup.refers_to(&rel.target, target)
            })
            .find_map(|(rel_name, rel)| self.belongs_to_key(through, rel_name, rel, target))
            .map(|(key, _)| key)
            .or_else(|| self.reference_field(through, target))
            .or_else(|| self.key_named_after(through, target, None));

        if let Some(key) = found {
            return key;
        }

        let key = self.default_key(target);
        let through_name = self.lookup.name(through);
        diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::ForeignKeyDefaulted,
                entity,
                format!(
                    "nothing on `{through_name}` points at `{}`; expecting other key `{key}` on `{through_name}`",
                    self.lookup.name(target)
                ),
            )
            .relation(name, def.kind)
            .target(self.lookup.name(target))
            .fix(format!("declare `otherKey` on `{entity}.{name}`")),
        );
        key
    }

    fn join_entity(
        &self,
        source: usize,
        name: &str,
        def: &RelationDef,
        diagnostics: &mut Diagnostics,
    ) -> Option<usize> {
        let through = def.through.as_deref()?;

        if let Some(index) = self.lookup.resolve(through) {
            return Some(index);
        }

        let entity = self.lookup.name(source);
        diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::UnknownJoinEntity,
                entity,
                format!("join entity `{through}` does not exist; resolving against the target instead"),
            )
            .relation(name, def.kind)
            .target(&def.target)
            .fix(format!("declare entity `{through}` or fix `through` on `{entity}.{name}`")),
        );
        None
    }

    /// First reference-typed field on `owner` whose target is `target`.
    fn reference_field(&self, owner: usize, target: usize) -> Option<String> {
        self.defs[owner]
            .fields
            .iter()
            .find(|(_, field)| {
                field.kind == FieldKind::Ref
                    && field
                        .target
                        .as_deref()
                        .is_some_and(|name| self.lookup.refers_to(name, target))
            })
            .map(|(name, _)| name.clone())
    }

    /// First `{t}Id`, `{t}_id` or `{t}ID` field on `owner`, trying each
    /// naming variant of the target and then of the relation name.
    fn key_named_after(&self, owner: usize, target: usize, relation: Option<&str>) -> Option<String> {
        let fields = &self.defs[owner].fields;
        let target_name = self.lookup.name(target);
        let singular = self.lookup.inflector().singular(target_name);

        let mut stems = vec![
            Name::new(&singular).camel_case(),
            target_name.to_string(),
            Name::new(&singular).snake_case(),
        ];
        if let Some(relation) = relation {
            stems.push(Name::new(relation).camel_case());
            stems.push(Name::new(relation).snake_case());
        }

        stems
            .iter()
            .flat_map(|stem| [format!("{stem}Id"), format!("{stem}_id"), format!("{stem}ID")])
            .find(|candidate| fields.contains_key(candidate))
    }

    /// `{entity}Id`, in lower camel case of the singular name.
    fn default_key(&self, entity: usize) -> String {
        let singular = self.lookup.inflector().singular(self.lookup.name(entity));
        format!("{}Id", Name::new(&singular).camel_case())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{def::FieldDef, Inflector};

    fn resolve(
        defs: &[EntityDef],
        entity: &str,
        relation: &str,
    ) -> (Result<Relation>, Diagnostics) {
        let lookup = EntityLookup::new(defs, Inflector::default()).unwrap();
        let source = lookup.resolve(entity).unwrap();
        let def = &defs[source].relations[relation];
        let mut diagnostics = Diagnostics::new();
        let resolver = ResolveRelation {
            defs,
            lookup: &lookup,
        };
        let relation = resolver.resolve(source, relation, def, &mut diagnostics);
        (relation, diagnostics)
    }

    #[test]
    fn belongs_to_explicit_key_wins() {
        let defs = vec![
            EntityDef::new("User"),
            EntityDef::new("Post")
                .field("userId", FieldDef::reference("User"))
                .relation("author", RelationDef::belongs_to("User").foreign_key("writerId")),
        ];

        let (relation, diagnostics) = resolve(&defs, "Post", "author");
        let relation = relation.unwrap();
        assert_eq!(relation.foreign_key, "writerId");
        assert_eq!(relation.key_source, KeySource::Explicit);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn belongs_to_reference_field() {
        let defs = vec![
            EntityDef::new("User"),
            EntityDef::new("Post")
                .field("writtenBy", FieldDef::reference("users"))
                .relation("author", RelationDef::belongs_to("User")),
        ];

        let (relation, diagnostics) = resolve(&defs, "Post", "author");
        let relation = relation.unwrap();
        assert_eq!(relation.foreign_key, "writtenBy");
        assert_eq!(relation.key_source, KeySource::Inferred);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn belongs_to_field_named_after_relation() {
        let defs = vec![
            EntityDef::new("User"),
            EntityDef::new("Post")
                .field("author_id", FieldDef::string())
                .relation("author", RelationDef::belongs_to("User")),
        ];

        let (relation, _) = resolve(&defs, "Post", "author");
        assert_eq!(relation.unwrap().foreign_key, "author_id");
    }

    #[test]
    fn belongs_to_defaults_with_one_warning() {
        let defs = vec![
            EntityDef::new("User"),
            EntityDef::new("Post").relation("author", RelationDef::belongs_to("User")),
        ];

        let (relation, diagnostics) = resolve(&defs, "Post", "author");
        let relation = relation.unwrap();
        assert_eq!(relation.foreign_key, "userId");
        assert_eq!(relation.key_source, KeySource::Defaulted);

        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics.as_slice()[0];
        assert_eq!(diagnostic.kind, DiagnosticKind::ForeignKeyDefaulted);
        assert_eq!(diagnostic.entity, "Post");
        assert_eq!(diagnostic.relation.as_deref(), Some("author"));
        assert!(diagnostic.fix.is_some());
    }

    #[test]
    fn has_many_follows_back_reference() {
        let defs = vec![
            EntityDef::new("User").relation(
                "posts",
                RelationDef::has_many("Post").order_by("createdAt", def::Direction::Desc),
            ),
            EntityDef::new("Post")
                .field("authorId", FieldDef::reference("User"))
                .relation("author", RelationDef::belongs_to("User")),
        ];

        let (relation, diagnostics) = resolve(&defs, "User", "posts");
        let relation = relation.unwrap();
        assert_eq!(relation.kind, RelationKind::HasMany);
        assert_eq!(relation.target, "Post");
        assert_eq!(relation.foreign_key, "authorId");
        assert_eq!(relation.key_source, KeySource::Inferred);
        assert_eq!(relation.order_by.unwrap().field, "createdAt");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn has_many_ambiguous_back_references() {
        let defs = vec![
            EntityDef::new("User").relation("posts", RelationDef::has_many("Post")),
            EntityDef::new("Post")
                .relation("author", RelationDef::belongs_to("User").foreign_key("authorId"))
                .relation("editor", RelationDef::belongs_to("User").foreign_key("editorId")),
        ];

        let (relation, diagnostics) = resolve(&defs, "User", "posts");
        assert_eq!(relation.unwrap().foreign_key, "authorId");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.as_slice()[0].kind,
            DiagnosticKind::AmbiguousForeignKey
        );
    }

    #[test]
    fn has_many_unresolved_back_references_only_default() {
        let defs = vec![
            EntityDef::new("User").relation("posts", RelationDef::has_many("Post")),
            EntityDef::new("Post")
                .relation("author", RelationDef::belongs_to("User"))
                .relation("editor", RelationDef::belongs_to("User")),
        ];

        let (relation, diagnostics) = resolve(&defs, "User", "posts");
        let relation = relation.unwrap();
        assert_eq!(relation.foreign_key, "userId");
        assert_eq!(relation.key_source, KeySource::Defaulted);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.as_slice()[0].kind,
            DiagnosticKind::ForeignKeyDefaulted
        );
    }

    #[test]
    fn ambiguous_back_references_name_the_chosen_one() {
        let defs = vec![
            EntityDef::new("User").relation("posts", RelationDef::has_many("Post")),
            EntityDef::new("Post")
                .field("editorId", FieldDef::string())
                .relation("author", RelationDef::belongs_to("User"))
                .relation("editor", RelationDef::belongs_to("User")),
        ];

        let (relation, diagnostics) = resolve(&defs, "User", "posts");
        assert_eq!(relation.unwrap().foreign_key, "editorId");
        assert_eq!(diagnostics.len(), 1);

        let diagnostic = &diagnostics.as_slice()[0];
        assert_eq!(diagnostic.kind, DiagnosticKind::AmbiguousForeignKey);
        assert!(diagnostic.reason.contains("using `editor`"));
    }

    #[test]
    fn reference_field_wins_over_relation_name() {
        let defs = vec![
            EntityDef::new("User"),
            EntityDef::new("Post")
                .field("authorId", FieldDef::reference("User"))
                .field("editorId", FieldDef::reference("User"))
                .relation("editor", RelationDef::belongs_to("User")),
        ];

        let (relation, diagnostics) = resolve(&defs, "Post", "editor");
        let relation = relation.unwrap();
        assert_eq!(relation.foreign_key, "authorId");
        assert_eq!(relation.key_source, KeySource::Inferred);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn has_one_defaults_to_source_key() {
        let defs = vec![
            EntityDef::new("User").relation("profile", RelationDef::has_one("Profile")),
            EntityDef::new("Profile"),
        ];

        let (relation, diagnostics) = resolve(&defs, "User", "profile");
        let relation = relation.unwrap();
        assert_eq!(relation.kind, RelationKind::HasOne);
        assert_eq!(relation.foreign_key, "userId");
        assert_eq!(relation.key_source, KeySource::Defaulted);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn many_to_many_through_join_entity() {
        let defs = vec![
            EntityDef::new("Post")
                .relation("tags", RelationDef::many_to_many("Tag").through("PostTag")),
            EntityDef::new("Tag"),
            EntityDef::new("PostTag")
                .field("postId", FieldDef::reference("Post"))
                .field("tagId", FieldDef::reference("Tag")),
        ];

        let (relation, diagnostics) = resolve(&defs, "Post", "tags");
        let relation = relation.unwrap();
        assert_eq!(relation.kind, RelationKind::HasMany);
        assert_eq!(relation.foreign_key, "postId");

        let join = relation.many_to_many.unwrap();
        assert_eq!(join.through, "PostTag");
        assert_eq!(join.other_key, "tagId");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn many_to_many_unknown_join_entity() {
        let defs = vec![
            EntityDef::new("Post")
                .relation("tags", RelationDef::many_to_many("Tag").through("PostTags")),
            EntityDef::new("Tag").field("postId", FieldDef::reference("Post")),
        ];

        let (relation, diagnostics) = resolve(&defs, "Post", "tags");
        let relation = relation.unwrap();
        assert_eq!(relation.foreign_key, "postId");

        let join = relation.many_to_many.unwrap();
        assert_eq!(join.through, "PostTags");
        assert_eq!(join.other_key, "tagId");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.as_slice()[0].kind, DiagnosticKind::UnknownJoinEntity);
    }

    #[test]
    fn unknown_target_is_fatal() {
        let defs = vec![EntityDef::new("Post").relation("author", RelationDef::belongs_to("Ghost"))];

        let (relation, _) = resolve(&defs, "Post", "author");
        let err = relation.unwrap_err();
        assert!(err.is_invalid_schema());
        assert!(err.to_string().contains("`Ghost`"));
    }
}
