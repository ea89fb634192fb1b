//! Slug rules: validation, transliteration, and derivation from titles.
//!
//! Every note is addressed by a globally unique, URL-safe slug. When the
//! add/edit form leaves the slug blank, one is derived from the title by
//! transliterating Russian Cyrillic to Latin and slugifying the result.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Maximum slug length in characters.
pub const SLUG_MAX_LEN: usize = 100;

/// Fixed suffix appended to the colliding slug in the uniqueness error.
pub const SLUG_TAKEN_WARNING: &str = " - this slug is already in use, please pick a unique value.";

/// Valid slugs: ASCII letters, digits, hyphens, underscores.
static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-A-Za-z0-9_]+$").expect("valid slug regex"));

/// Check whether a string is usable as a slug verbatim.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Transliterate one lowercase Cyrillic character to its Latin spelling.
fn transliterate(c: char) -> Option<&'static str> {
    let mapped = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        // Hard and soft signs carry no sound of their own
        'ъ' | 'ь' => "",
        'ы' => "y",
        'ю' => "ju",
        'я' => "ja",
        _ => return None,
    };
    Some(mapped)
}

/// Convert a title to a URL-safe slug.
///
/// Lowercases, transliterates Cyrillic, maps whitespace and hyphens to `-`,
/// drops remaining punctuation, collapses dash runs, and truncates to
/// [`SLUG_MAX_LEN`].
pub fn slugify(title: &str) -> String {
    let mut mapped = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        if let Some(tr) = transliterate(c) {
            mapped.push_str(tr);
        } else if c.is_ascii_alphanumeric() || c == '_' {
            mapped.push(c);
        } else if c.is_whitespace() || c == '-' {
            mapped.push('-');
        }
        // Everything else (punctuation, non-Cyrillic scripts) is dropped
    }

    let mut slug = String::with_capacity(mapped.len());
    for c in mapped.chars() {
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    slug.trim_matches('-').chars().take(SLUG_MAX_LEN).collect()
}

/// Resolve the slug for a create or update.
///
/// An explicit submitted value wins after format and length validation;
/// otherwise one is derived from the title. Both failure modes are
/// field-level `slug` errors.
pub fn resolve_slug(submitted: Option<&str>, title: &str) -> Result<String> {
    match submitted.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => {
            if slug.chars().count() > SLUG_MAX_LEN {
                return Err(Error::validation(
                    "slug",
                    format!("ensure the slug has at most {} characters", SLUG_MAX_LEN),
                ));
            }
            if !is_valid_slug(slug) {
                return Err(Error::validation(
                    "slug",
                    "slugs may only contain letters, numbers, hyphens and underscores",
                ));
            }
            Ok(slug.to_string())
        }
        None => {
            let derived = slugify(title);
            if derived.is_empty() {
                return Err(Error::validation(
                    "slug",
                    "a slug could not be derived from the title; provide one explicitly",
                ));
            }
            Ok(derived)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_ascii() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Leading Trailing  "), "leading-trailing");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("CamelCase"), "camelcase");
        assert_eq!(slugify("test_slug"), "test_slug");
    }

    #[test]
    fn test_slugify_cyrillic() {
        assert_eq!(slugify("Новый заголовок"), "novyj-zagolovok");
        assert_eq!(slugify("Заголовок"), "zagolovok");
        assert_eq!(slugify("Жёлтый щит"), "zheltyj-schit");
        assert_eq!(slugify("объём"), "obem");
        assert_eq!(slugify("Путь в Rust"), "put-v-rust");
    }

    #[test]
    fn test_slugify_special_characters() {
        assert_eq!(slugify("Test (with) brackets"), "test-with-brackets");
        assert_eq!(slugify("don't"), "dont");
        assert_eq!(slugify("Machine Learning / AI"), "machine-learning-ai");
        assert_eq!(slugify("Version 2.0"), "version-20");
    }

    #[test]
    fn test_slugify_truncates() {
        let long = "a".repeat(150);
        assert_eq!(slugify(&long).len(), SLUG_MAX_LEN);
    }

    #[test]
    fn test_slugify_untransliterable() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("汉字"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("new-slug"));
        assert!(is_valid_slug("slug_123"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("has space"));
        assert!(!is_valid_slug("кириллица"));
        assert!(!is_valid_slug("slash/slug"));
    }

    #[test]
    fn test_resolve_slug_prefers_submitted() {
        let slug = resolve_slug(Some("my-slug"), "Some Title").unwrap();
        assert_eq!(slug, "my-slug");
    }

    #[test]
    fn test_resolve_slug_derives_from_title() {
        let slug = resolve_slug(None, "Новый заголовок").unwrap();
        assert_eq!(slug, "novyj-zagolovok");

        // Blank submissions count as absent
        let slug = resolve_slug(Some("   "), "Hello World").unwrap();
        assert_eq!(slug, "hello-world");
    }

    #[test]
    fn test_resolve_slug_derivation_truncates() {
        let title = "и".repeat(150);
        let slug = resolve_slug(None, &title).unwrap();
        assert_eq!(slug.len(), SLUG_MAX_LEN);
    }

    #[test]
    fn test_resolve_slug_rejects_invalid_format() {
        let err = resolve_slug(Some("not a slug"), "Title").unwrap_err();
        match err {
            Error::Validation { field, .. } => assert_eq!(field, "slug"),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_resolve_slug_rejects_overlong() {
        let slug = "a".repeat(SLUG_MAX_LEN + 1);
        let err = resolve_slug(Some(&slug), "Title").unwrap_err();
        match err {
            Error::Validation { field, .. } => assert_eq!(field, "slug"),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_resolve_slug_empty_derivation_is_field_error() {
        let err = resolve_slug(None, "!!!").unwrap_err();
        match err {
            Error::Validation { field, .. } => assert_eq!(field, "slug"),
            _ => panic!("Expected Validation error"),
        }
    }
}
