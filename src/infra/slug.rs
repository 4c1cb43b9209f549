//! Slug generation for note URLs.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum length of a stored slug.
pub const SLUG_MAX_LENGTH: usize = 100;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("separator pattern is valid"));

static SLUG_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern is valid"));

/// Latin spelling of each lowercase Russian letter.
const TRANSLIT: &[(char, &str)] = &[
    ('а', "a"),
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('д', "d"),
    ('е', "e"),
    ('ё', "yo"),
    ('ж', "zh"),
    ('з', "z"),
    ('и', "i"),
    ('й', "j"),
    ('к', "k"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('о', "o"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('у', "u"),
    ('ф', "f"),
    ('х', "h"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "sch"),
    ('ъ', ""),
    ('ы', "yi"),
    ('ь', ""),
    ('э', "e"),
    ('ю', "yu"),
    ('я', "ya"),
];

fn translit(c: char) -> Option<&'static str> {
    TRANSLIT
        .iter()
        .find(|(cyrillic, _)| *cyrillic == c)
        .map(|(_, latin)| *latin)
}

/// Converts a title to a URL-friendly slug, transliterating Russian text.
///
/// - Converts to lowercase
/// - Spells `&` as `and`
/// - Collapses runs of whitespace and hyphens into one hyphen
/// - Drops everything except ASCII letters, digits, hyphens and Russian letters
/// - Transliterates Russian letters to Latin
///
/// Returns an empty string when nothing survives. Leading and trailing
/// hyphens are kept, so `slugify` is a pure function of the title.
///
/// # Examples
///
/// ```
/// use yasite::infra::slugify;
///
/// assert_eq!(slugify("API Design"), "api-design");
/// assert_eq!(slugify("Новый заголовок"), "novyij-zagolovok");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let spelled = lower.replace("&amp;", " and ").replace('&', " and ");
    let hyphenated = SEPARATORS.replace_all(&spelled, "-");

    let mut result = String::with_capacity(hyphenated.len());
    for c in hyphenated.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            result.push(c);
        } else if let Some(latin) = translit(c) {
            result.push_str(latin);
        }
    }
    result
}

/// Derives the stored slug for a title: [`slugify`] cut to [`SLUG_MAX_LENGTH`].
///
/// ```
/// use yasite::infra::derive_slug;
///
/// assert_eq!(derive_slug(&"word ".repeat(40)).len(), 100);
/// ```
pub fn derive_slug(title: &str) -> String {
    // slugify output is ASCII, so byte and char counts agree
    let mut slug = slugify(title);
    slug.truncate(SLUG_MAX_LENGTH);
    slug
}

/// Returns true if `slug` has the shape accepted in URLs:
/// ASCII letters, digits, hyphens and underscores.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_SHAPE.is_match(slug)
}
