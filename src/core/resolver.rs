// File: src/core/resolver.rs
//! Maps legacy Persian/Arabic request slugs onto the slugs terms carry today.

use crate::core::converter::{has_persian_or_arabic, transliterate};
use crate::core::tables::ZWNJ;
use crate::core::types::Term;
use std::collections::HashMap;
use tracing::debug;

/// Read-only access to taxonomy terms.
///
/// A miss is a normal outcome and is reported as `None`.
pub trait TermLookup {
    fn find_by_slug(&self, taxonomy: &str, slug: &str) -> Option<Term>;
    fn find_by_name(&self, taxonomy: &str, name: &str) -> Option<Term>;

    /// Whether the taxonomy is registered at all.
    fn taxonomy_exists(&self, _taxonomy: &str) -> bool {
        true
    }
}

/// Resolves an incoming taxonomy slug to the stored slug it stands for.
///
/// Tries, in order: the slug as-is, its transliteration, an exact name match,
/// then name spellings with hyphens turned into spaces or ZWNJ. The last three
/// only run for slugs carrying Persian/Arabic script. `None` means the
/// request should be left alone.
pub fn resolve_taxonomy_slug<L: TermLookup + ?Sized>(
    incoming_slug: &str,
    taxonomy: &str,
    lookup: &L,
) -> Option<String> {
    let incoming_slug = incoming_slug.trim();
    if incoming_slug.is_empty() || taxonomy.is_empty() {
        return None;
    }

    if let Some(term) = lookup.find_by_slug(taxonomy, incoming_slug) {
        return Some(term.slug);
    }

    if !has_persian_or_arabic(incoming_slug) {
        return None;
    }

    let transliterated = transliterate(incoming_slug);
    if !transliterated.is_empty() {
        if let Some(term) = lookup.find_by_slug(taxonomy, &transliterated) {
            debug!(taxonomy, incoming_slug, slug = %term.slug, "resolved by transliteration");
            return Some(term.slug);
        }
    }

    if let Some(term) = lookup.find_by_name(taxonomy, incoming_slug) {
        debug!(taxonomy, incoming_slug, slug = %term.slug, "resolved by name");
        return Some(term.slug);
    }

    for candidate in name_candidates(incoming_slug) {
        if let Some(term) = lookup.find_by_name(taxonomy, &candidate) {
            debug!(taxonomy, incoming_slug, candidate = %candidate, slug = %term.slug, "resolved by name variant");
            return Some(term.slug);
        }
    }

    None
}

/// Alternate term-name spellings for a slug, in lookup order, without
/// duplicates or empties.
pub fn name_candidates(slug: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::with_capacity(3);
    for candidate in [slug.to_string(), slug.replace('-', " "), slug.replace('-', ZWNJ)] {
        if !candidate.is_empty() && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

/// Request keys that carry a taxonomy slug, with the taxonomy they route to.
/// `None` means the taxonomy comes from the `taxonomy` query var.
const ROUTING_KEYS: [(&str, Option<&str>); 3] = [
    ("tag", Some("post_tag")),
    ("category_name", Some("category")),
    ("term", None),
];

/// Rewrites taxonomy routing keys in `query_vars` to their resolved slugs.
///
/// Values are percent-decoded before resolution. Keys whose value is empty,
/// whose taxonomy is unknown, or that don't resolve are left untouched.
/// Returns how many keys were rewritten.
pub fn normalize_request_slugs<L: TermLookup + ?Sized>(
    query_vars: &mut HashMap<String, String>,
    lookup: &L,
) -> usize {
    let mut rewritten = 0;

    for (key, fixed_taxonomy) in ROUTING_KEYS {
        let taxonomy = match fixed_taxonomy {
            Some(taxonomy) => taxonomy.to_string(),
            None => query_vars.get("taxonomy").cloned().unwrap_or_default(),
        };

        let raw = match query_vars.get(key) {
            Some(value) if !value.is_empty() => value,
            _ => continue,
        };

        if taxonomy.is_empty() || !lookup.taxonomy_exists(&taxonomy) {
            continue;
        }

        let incoming = raw_url_decode(raw);
        if let Some(resolved) = resolve_taxonomy_slug(&incoming, &taxonomy, lookup) {
            debug!(key, taxonomy = %taxonomy, resolved = %resolved, "rewrote routing key");
            query_vars.insert(key.to_string(), resolved);
            rewritten += 1;
        }
    }

    rewritten
}

/// Decodes `%XX` escapes. `+` stays literal and malformed escapes are kept
/// as-is; invalid UTF-8 is replaced lossily.
pub fn raw_url_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
