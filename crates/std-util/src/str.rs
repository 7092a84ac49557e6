use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToTitleCase, ToUpperCamelCase,
};

pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

pub fn upper_snake_case(src: &str) -> String {
    src.to_shouty_snake_case()
}

pub fn camel_case(src: &str) -> String {
    src.to_lower_camel_case()
}

pub fn upper_camel_case(src: &str) -> String {
    src.to_upper_camel_case()
}

pub fn kebab_case(src: &str) -> String {
    src.to_kebab_case()
}

pub fn title_case(src: &str) -> String {
    src.to_title_case()
}

/// Splits an identifier in any casing convention into lower-case words.
///
/// `"thumbnailURL"`, `"thumbnail_url"` and `"ThumbnailUrl"` all produce
/// `["thumbnail", "url"]`.
pub fn words(src: &str) -> Vec<String> {
    src.to_snake_case()
        .split('_')
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

pub fn pluralize(src: &str) -> String {
    pluralizer::pluralize(src, 2, false)
}

pub fn singularize(src: &str) -> String {
    pluralizer::pluralize(src, 1, false)
}
