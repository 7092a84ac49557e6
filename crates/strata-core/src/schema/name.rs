use crate::Config;

use indexmap::IndexMap;
use serde::Serialize;
use std_util::str;

/// An identifier broken into lower-case words, renderable in any casing.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct Name {
    pub parts: Vec<String>,
}

/// Words a generated identifier must not collide with.
const RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

impl Name {
    pub fn new(src: &str) -> Self {
        Self {
            parts: str::words(src),
        }
    }

    pub fn camel_case(&self) -> String {
        str::camel_case(&self.snake_case())
    }

    pub fn upper_camel_case(&self) -> String {
        str::upper_camel_case(&self.snake_case())
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    pub fn upper_snake_case(&self) -> String {
        str::upper_snake_case(&self.snake_case())
    }

    pub fn kebab_case(&self) -> String {
        self.parts.join("-")
    }

    pub fn title_case(&self) -> String {
        str::title_case(&self.snake_case())
    }

    /// A lower-camel identifier that is safe to emit as a property or
    /// variable name.
    pub fn ident(&self) -> String {
        let ident = self.camel_case();

        match ident.chars().next() {
            None => "_".to_string(),
            Some(c) if c.is_ascii_digit() => format!("_{ident}"),
            Some(_) if RESERVED.contains(&ident.as_str()) => format!("_{ident}"),
            Some(_) => ident,
        }
    }
}

/// Singular/plural conversion honoring the project's irregular plurals.
///
/// Overrides match the last word of compound identifiers, so a `person →
/// people` override also turns `SalesPerson` into `SalesPeople`.
#[derive(Debug, Clone, Default)]
pub struct Inflector {
    /// lower-case singular → plural
    plurals: IndexMap<String, String>,

    /// lower-case plural → singular
    singulars: IndexMap<String, String>,
}

impl Inflector {
    pub fn new(config: &Config) -> Self {
        let mut inflector = Self::default();

        for (singular, plural) in &config.plurals {
            inflector
                .plurals
                .insert(singular.to_lowercase(), plural.to_lowercase());
            inflector
                .singulars
                .insert(plural.to_lowercase(), singular.to_lowercase());
        }

        inflector
    }

    pub fn plural(&self, word: &str) -> String {
        let (head, tail) = split_last_word(word);
        let key = tail.to_lowercase();

        if let Some(plural) = self.plurals.get(&key) {
            return format!("{head}{}", restore_case(tail, plural));
        }

        if self.singulars.contains_key(&key) {
            return word.to_string();
        }

        restore_case(word, &str::pluralize(word))
    }

    pub fn singular(&self, word: &str) -> String {
        let (head, tail) = split_last_word(word);
        let key = tail.to_lowercase();

        if let Some(singular) = self.singulars.get(&key) {
            return format!("{head}{}", restore_case(tail, singular));
        }

        if self.plurals.contains_key(&key) {
            return word.to_string();
        }

        restore_case(word, &str::singularize(word))
    }
}

/// Splits `word` before its last word boundary (an upper-case letter or a
/// separator).
fn split_last_word(word: &str) -> (&str, &str) {
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (i, c) in word.char_indices() {
        if let Some(p) = prev {
            let boundary = matches!(p, '_' | '-' | ' ')
                || (c.is_uppercase() && p.is_lowercase());
            if boundary {
                start = i;
            }
        }
        prev = Some(c);
    }

    word.split_at(start)
}

fn restore_case(original: &str, replacement: &str) -> String {
    if original.chars().all(|c| !c.is_lowercase()) && original.chars().any(char::is_uppercase) {
        return replacement.to_uppercase();
    }

    let mut chars = replacement.chars();
    match (original.chars().next(), chars.next()) {
        (Some(o), Some(r)) if o.is_uppercase() => r.to_uppercase().chain(chars).collect(),
        _ => replacement.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_renderings() {
        let name = Name::new("BlogPost");

        assert_eq!(name.parts, ["blog", "post"]);
        assert_eq!(name.snake_case(), "blog_post");
        assert_eq!(name.camel_case(), "blogPost");
        assert_eq!(name.upper_camel_case(), "BlogPost");
        assert_eq!(name.kebab_case(), "blog-post");
        assert_eq!(name.title_case(), "Blog Post");
        assert_eq!(name.upper_snake_case(), "BLOG_POST");
    }

    #[test]
    fn ident_is_safe() {
        assert_eq!(Name::new("first_name").ident(), "firstName");
        assert_eq!(Name::new("2fa_enabled").ident(), "_2faEnabled");
        assert_eq!(Name::new("default").ident(), "_default");
        assert_eq!(Name::new("").ident(), "_");
    }

    #[test]
    fn overrides_take_precedence() {
        let inflector = Inflector::new(&Config::new().plural("person", "people"));

        assert_eq!(inflector.plural("person"), "people");
        assert_eq!(inflector.plural("Person"), "People");
        assert_eq!(inflector.plural("SalesPerson"), "SalesPeople");
        assert_eq!(inflector.plural("people"), "people");
        assert_eq!(inflector.singular("People"), "Person");
        assert_eq!(inflector.singular("person"), "person");
    }

    #[test]
    fn irregular_plurals_keep_casing() {
        let inflector = Inflector::default();

        assert_eq!(inflector.plural("Axis"), "Axes");
        assert_eq!(inflector.plural("Axes"), "Axes");
        assert_eq!(inflector.plural("axes"), "axes");
    }

    #[test]
    fn split_compound_words() {
        assert_eq!(split_last_word("SalesPerson"), ("Sales", "Person"));
        assert_eq!(split_last_word("sales_person"), ("sales_", "person"));
        assert_eq!(split_last_word("person"), ("", "person"));
        assert_eq!(split_last_word("HTTPRequest"), ("", "HTTPRequest"));
    }
}
