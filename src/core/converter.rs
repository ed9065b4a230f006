// File: src/core/converter.rs
//! Persian/Arabic to Latin slug conversion.

use crate::core::charmap::CharacterMap;
use crate::core::tables::{LATIN, NORMALIZATION, NUMERALS};
use crate::core::types::Slug;
use once_cell::sync::Lazy;
use regex::Regex;

static NORMALIZATION_MAP: Lazy<CharacterMap> = Lazy::new(|| CharacterMap::from_pairs(NORMALIZATION));
static NUMERAL_MAP: Lazy<CharacterMap> = Lazy::new(|| CharacterMap::from_pairs(NUMERALS));
static LATIN_MAP: Lazy<CharacterMap> = Lazy::new(|| CharacterMap::from_pairs(LATIN));

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());
static LATIN_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

const ARABIC_BLOCK: std::ops::RangeInclusive<char> = '\u{0600}'..='\u{06FF}';

/// Arabic-variant normalization table.
pub fn normalization_map() -> &'static CharacterMap {
    &NORMALIZATION_MAP
}

/// Persian and Arabic-Indic digit table.
pub fn numeral_map() -> &'static CharacterMap {
    &NUMERAL_MAP
}

/// Persian letter to Latin table.
pub fn latin_map() -> &'static CharacterMap {
    &LATIN_MAP
}

/// Transliterates text into a Latin slug.
///
/// Never fails. The result is either empty or matches
/// `^[a-z0-9]+(-[a-z0-9]+)*$`; callers treat empty as "keep the original".
/// Complexity: O(n) in the input length, the tables are fixed.
pub fn transliterate(text: &str) -> Slug {
    let text = text.trim();
    if text.is_empty() {
        return Slug::new();
    }

    let text = NORMALIZATION_MAP.replace_all(text);
    let text = NUMERAL_MAP.replace_all(&text);
    let text = LATIN_MAP.replace_all(&text);
    let text = text.to_ascii_lowercase();

    let text = NON_ALNUM.replace_all(&text, "-");
    let text = text.trim_matches('-');
    HYPHEN_RUN.replace_all(text, "-").into_owned()
}

/// True when the slug is non-empty and made only of `[a-z0-9-]`.
pub fn is_latin_slug(slug: &str) -> bool {
    LATIN_SLUG.is_match(slug)
}

/// True when any character falls in the Arabic block (U+0600..=U+06FF).
/// A coarse script check; it does not tell Persian from Arabic.
pub fn has_persian_or_arabic(text: &str) -> bool {
    text.chars().any(|c| ARABIC_BLOCK.contains(&c))
}

/// Title sanitization hook: the slug for `raw_title`, or `title` untouched
/// when there is no raw title or it transliterates to nothing.
pub fn sanitize_title(title: &str, raw_title: Option<&str>) -> String {
    let raw = match raw_title {
        Some(raw) if !raw.is_empty() => raw,
        _ => return title.to_string(),
    };

    let slug = transliterate(raw);
    if slug.is_empty() {
        title.to_string()
    } else {
        slug
    }
}
