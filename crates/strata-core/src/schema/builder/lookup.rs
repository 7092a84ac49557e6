use crate::schema::{def::EntityDef, Inflector};
use crate::{Error, Result};

use std::collections::HashMap;

/// Resolves entity names written in any number or casing.
///
/// Built once per run. Every entity is registered under its declared name,
/// its singular and plural forms, and a folded (lower-case, separator-free)
/// rendering of each. Queries try, in order: the exact name, its singular,
/// its plural, then the folded variants of the same three.
#[derive(Debug)]
pub(crate) struct EntityLookup {
    inflector: Inflector,

    /// Canonical (declared) entity names, by definition index
    names: Vec<String>,

    exact: HashMap<String, usize>,

    folded: HashMap<String, usize>,
}

impl EntityLookup {
    pub(crate) fn new(defs: &[EntityDef], inflector: Inflector) -> Result<Self> {
        let mut lookup = Self {
            inflector,
            names: Vec::with_capacity(defs.len()),
            exact: HashMap::new(),
            folded: HashMap::new(),
        };

        // Declared names first so they win over another entity's variants.
        for (index, def) in defs.iter().enumerate() {
            if lookup.exact.insert(def.name.clone(), index).is_some() {
                return Err(Error::invalid_schema(format!(
                    "entity `{}` is declared more than once",
                    def.name
                )));
            }
            lookup.names.push(def.name.clone());
        }

        for (index, def) in defs.iter().enumerate() {
            let singular = lookup.inflector.singular(&def.name);
            let plural = lookup.inflector.plural(&singular);

            for variant in [&singular, &plural] {
                lookup.exact.entry(variant.clone()).or_insert(index);
            }

            for variant in [&def.name, &singular, &plural] {
                lookup.folded.entry(fold(variant)).or_insert(index);
            }
        }

        Ok(lookup)
    }

    /// Index of the entity `name` refers to, if any.
    pub(crate) fn resolve(&self, name: &str) -> Option<usize> {
        let singular = self.inflector.singular(name);
        let plural = self.inflector.plural(&singular);
        let candidates: [&str; 3] = [name, &singular, &plural];

        candidates
            .iter()
            .find_map(|candidate| self.exact.get(*candidate))
            .or_else(|| {
                candidates
                    .iter()
                    .find_map(|candidate| self.folded.get(&fold(candidate)))
            })
            .copied()
    }

    /// Canonical name of the entity `name` refers to, if any.
    pub(crate) fn canonical(&self, name: &str) -> Option<&str> {
        self.resolve(name).map(|index| self.name(index))
    }

    /// Returns `true` if `name` refers to the entity at `index`.
    pub(crate) fn refers_to(&self, name: &str, index: usize) -> bool {
        self.resolve(name) == Some(index)
    }

    pub(crate) fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    pub(crate) fn inflector(&self) -> &Inflector {
        &self.inflector
    }
}

fn fold(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    fn lookup(names: &[&str]) -> EntityLookup {
        let defs: Vec<_> = names.iter().map(|name| EntityDef::new(*name)).collect();
        EntityLookup::new(&defs, Inflector::new(&Config::default())).unwrap()
    }

    #[test]
    fn resolves_name_variants() {
        let lookup = lookup(&["User", "BlogPost", "category"]);

        assert_eq!(lookup.canonical("User"), Some("User"));
        assert_eq!(lookup.canonical("Users"), Some("User"));
        assert_eq!(lookup.canonical("user"), Some("User"));
        assert_eq!(lookup.canonical("users"), Some("User"));
        assert_eq!(lookup.canonical("blog_post"), Some("BlogPost"));
        assert_eq!(lookup.canonical("blogPosts"), Some("BlogPost"));
        assert_eq!(lookup.canonical("Categories"), Some("category"));
        assert_eq!(lookup.canonical("Comment"), None);
    }

    #[test]
    fn declared_names_take_precedence() {
        // `News` is registered under its own name before `New` claims its
        // plural variant.
        let lookup = lookup(&["New", "News"]);
        assert_eq!(lookup.canonical("News"), Some("News"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let defs = vec![EntityDef::new("Post"), EntityDef::new("Post")];
        let err = EntityLookup::new(&defs, Inflector::default()).unwrap_err();
        assert!(err.is_invalid_schema());
        assert!(err.to_string().contains("`Post`"));
    }
}
