//! Guesses the type of a computed property from its name.
//!
//! Names are split into lower-case words and matched against an ordered
//! rule table; the first rule that matches wins. Earlier rules shadow later
//! ones, so `isOverBudget` is a number (`budget`) before it is a boolean
//! (`is`).

use crate::schema::app::ComputedTy;

use std_util::str;

/// Property names that end in one of these are moments in time
const DATE_SUFFIXES: &[&str] = &[
    "at",
    "on",
    "date",
    "time",
    "timestamp",
    "datetime",
    "deadline",
    "birthday",
    "birthdate",
];

const NUMERIC_WORDS: &[&str] = &[
    "count",
    "total",
    "sum",
    "avg",
    "average",
    "mean",
    "median",
    "min",
    "max",
    "amount",
    "price",
    "cost",
    "revenue",
    "profit",
    "income",
    "budget",
    "balance",
    "salary",
    "fee",
    "tax",
    "discount",
    "score",
    "rating",
    "rank",
    "percent",
    "percentage",
    "ratio",
    "rate",
    "num",
    "number",
    "quantity",
    "qty",
    "size",
    "length",
    "width",
    "height",
    "weight",
    "age",
    "duration",
    "distance",
    "progress",
    "views",
    "likes",
    "votes",
    "points",
];

const BOOLEAN_PREFIXES: &[&str] = &[
    "is", "has", "can", "should", "was", "were", "will", "did", "does", "allow", "allows",
    "needs", "must",
];

const BOOLEAN_SUFFIXES: &[&str] = &[
    "enabled",
    "disabled",
    "active",
    "visible",
    "hidden",
    "valid",
    "verified",
    "required",
    "allowed",
    "published",
    "archived",
    "deleted",
    "locked",
    "completed",
    "approved",
    "confirmed",
    "available",
    "editable",
    "selected",
    "checked",
];

const STRING_SUFFIXES: &[&str] = &[
    "name",
    "title",
    "label",
    "url",
    "uri",
    "link",
    "href",
    "slug",
    "email",
    "description",
    "summary",
    "excerpt",
    "preview",
    "text",
    "message",
    "caption",
    "subject",
    "note",
    "path",
    "code",
    "status",
    "type",
    "kind",
    "display",
    "initials",
    "avatar",
    "image",
    "thumbnail",
    "html",
    "markdown",
    "color",
    "address",
    "phone",
];

const COLLECTION_SUFFIXES: &[&str] = &[
    "list",
    "array",
    "items",
    "ids",
    "collection",
    "set",
    "tags",
    "entries",
    "children",
    "members",
];

/// First words that make a plural last word a collection (`recentPosts`)
const GETTER_PREFIXES: &[&str] = &[
    "get", "all", "list", "fetch", "find", "load", "related", "recent", "top", "latest",
    "pending",
];

const OBJECT_SUFFIXES: &[&str] = &[
    "settings",
    "config",
    "configuration",
    "options",
    "preferences",
    "prefs",
    "metadata",
    "meta",
    "info",
    "details",
    "data",
    "attributes",
    "props",
    "properties",
    "params",
    "context",
    "stats",
    "statistics",
    "map",
    "payload",
];

/// Stripped once when nothing else matched (`computeAuthorName`)
const VERB_PREFIXES: &[&str] = &["get", "compute", "calculate", "calc", "derive"];

enum Pattern {
    /// The last word is one of
    Suffix(&'static [&'static str]),

    /// Any word is one of
    Contains(&'static [&'static str]),

    /// The first of several words is one of
    Prefix(&'static [&'static str]),

    /// The first of several words is one of, and the last word is a plural
    /// noun
    PrefixPlural(&'static [&'static str]),
}

const RULES: &[(Pattern, ComputedTy)] = &[
    (Pattern::Suffix(DATE_SUFFIXES), ComputedTy::Date),
    (Pattern::Contains(NUMERIC_WORDS), ComputedTy::Number),
    (Pattern::Prefix(BOOLEAN_PREFIXES), ComputedTy::Boolean),
    (Pattern::Suffix(BOOLEAN_SUFFIXES), ComputedTy::Boolean),
    (Pattern::Suffix(STRING_SUFFIXES), ComputedTy::String),
    (Pattern::Suffix(COLLECTION_SUFFIXES), ComputedTy::Array),
    (Pattern::PrefixPlural(GETTER_PREFIXES), ComputedTy::Array),
    (Pattern::Suffix(OBJECT_SUFFIXES), ComputedTy::Object),
];

/// Infers the type of a computed property from its name alone.
pub(crate) fn infer(name: &str) -> ComputedTy {
    infer_words(&str::words(name), true)
}

fn infer_words(words: &[String], strip_verb: bool) -> ComputedTy {
    if words.is_empty() {
        return ComputedTy::Unknown;
    }

    for (pattern, ty) in RULES {
        if pattern.matches(words) {
            return *ty;
        }
    }

    match words.split_first() {
        Some((verb, rest))
            if strip_verb && !rest.is_empty() && VERB_PREFIXES.contains(&verb.as_str()) =>
        {
            infer_words(rest, false)
        }
        _ => ComputedTy::Unknown,
    }
}

impl Pattern {
    fn matches(&self, words: &[String]) -> bool {
        let first = words.first().map(String::as_str);
        let last = words.last().map(String::as_str);
        let compound = words.len() > 1;

        match self {
            Pattern::Suffix(set) => last.is_some_and(|word| set.contains(&word)),
            Pattern::Contains(set) => words.iter().any(|word| set.contains(&word.as_str())),
            Pattern::Prefix(set) => compound && first.is_some_and(|word| set.contains(&word)),
            Pattern::PrefixPlural(set) => {
                compound
                    && first.is_some_and(|word| set.contains(&word))
                    && last.is_some_and(is_plural_noun)
            }
        }
    }
}

fn is_plural_noun(word: &str) -> bool {
    word.len() > 2
        && word.ends_with('s')
        && !["ss", "us", "is"].iter().any(|end| word.ends_with(end))
        && !OBJECT_SUFFIXES.contains(&word)
}
