//! Name normalization, collation and id generation.
//!
//! Names compare equal when they match after stripping combining accents
//! and case folding, so "Chloé" and "CHLOE" are the same player.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

/// Strip diacritics (NFD decomposition, combining marks dropped).
pub fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Key used for the uniqueness check on player names.
pub fn name_key(s: &str) -> String {
    strip_accents(s.trim()).to_lowercase()
}

/// True when both names refer to the same player under normalization.
pub fn same_name(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}

/// Locale-style ordering for display names.
///
/// Primary comparison ignores accents and case ("Élodie" sorts with the E's),
/// then falls back to the raw strings so the order stays total.
pub fn collate(a: &str, b: &str) -> Ordering {
    name_key(a).cmp(&name_key(b)).then_with(|| a.cmp(b))
}

/// Lowercase ASCII slug: "Chloé Dupont" -> "chloe-dupont".
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in strip_accents(s).to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Short random hex fragment for ids.
pub(crate) fn short_token(len: usize) -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(len);
    token
}

/// Player id derived from the name: `<slug>-<4 hex chars>`.
pub(crate) fn player_id(name: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        format!("p-{}", short_token(4))
    } else {
        format!("{}-{}", slug, short_token(4))
    }
}

#[cfg(test)]
#[path = "names_tests.rs"]
mod names_tests;
