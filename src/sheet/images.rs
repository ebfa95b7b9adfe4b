//! Name reconciliation against the image-folder manifest
//!
//! Catalog names and image file names drift apart: punctuation, accents,
//! unit suffixes, parenthesized content notes. Resolution is a cascade of
//! progressively looser matches, tried in order, first hit wins. The order
//! controls the precision/recall trade-off and is deliberate.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Manifest of image base names to URLs, in listing order
pub type ImageManifest = IndexMap<String, String>;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DASH_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*-\s*").unwrap());
static NON_NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_\s()#.,&!]").unwrap());
static TRAILING_UNIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*#\d+\s*$").unwrap());
static TRAILING_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*#\d+-#\d+\s*$").unwrap());
static TRAILING_PARENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(.*?\)\s*$").unwrap());

/// Light normalization: lower-case, collapse whitespace, trim
pub fn normalize_name(name: &str) -> String {
    WHITESPACE
        .replace_all(&name.to_lowercase(), " ")
        .trim()
        .to_string()
}

/// Aggressive normalization: folds accents to base letters, turns
/// colons/slashes/plus signs into spaces, normalizes dash spacing, strips
/// everything outside word characters, space, `()#.,&!`, collapses
/// whitespace. Two names that differ only in punctuation or accents
/// compare equal under this transform.
pub fn fuzzy_normalize(name: &str) -> String {
    let lowered = name.to_lowercase();
    // NFD then drop combining marks: å -> a, é -> e
    let folded: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let spaced: String = folded
        .chars()
        .map(|c| match c {
            ':' | '/' | '\\' | '+' => ' ',
            other => other,
        })
        .collect();
    let dashed = DASH_SPACING.replace_all(&spaced, " ");
    let stripped = NON_NAME_CHARS.replace_all(&dashed, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Look up a pre-fuzzied key against fuzzied manifest keys
fn fuzzy_lookup<'a>(manifest: &'a ImageManifest, fuzzy_key: &str) -> Option<&'a str> {
    manifest
        .iter()
        .find(|(key, _)| fuzzy_normalize(key) == fuzzy_key)
        .map(|(_, url)| url.as_str())
}

/// Resolve an item name to an image URL, `None` when unresolved.
///
/// Tiers, first hit wins:
/// 1. exact key, then exact after trimming
/// 2. case-insensitive, whitespace-collapsed
/// 3. fuzzy-normalized equality
/// 4. trailing `#N` suffix stripped, fuzzy
/// 5. trailing `#N-#M` range stripped, fuzzy
/// 6. trailing parenthesized group stripped, fuzzy
/// 7. both `#N` and parenthesized group stripped, fuzzy
/// 8. fuzzy prefix match, either direction, first manifest entry wins
pub fn resolve_image(name: &str, manifest: &ImageManifest) -> Option<String> {
    // 1. Exact match
    if let Some(url) = manifest.get(name) {
        return Some(url.clone());
    }
    let trimmed = name.trim();
    if let Some(url) = manifest.get(trimmed) {
        return Some(url.clone());
    }

    // 2. Case-insensitive
    let lower = normalize_name(name);
    for (key, url) in manifest {
        if normalize_name(key) == lower {
            return Some(url.clone());
        }
    }

    // 3. Fuzzy match
    let fuzzy = fuzzy_normalize(name);
    if let Some(url) = fuzzy_lookup(manifest, &fuzzy) {
        return Some(url.to_string());
    }

    // 4. Strip #N suffix
    let base_no_unit = TRAILING_UNIT.replace(trimmed, "").trim().to_string();
    if base_no_unit != trimmed {
        if let Some(url) = fuzzy_lookup(manifest, &fuzzy_normalize(&base_no_unit)) {
            return Some(url.to_string());
        }
    }

    // 5. Strip #N-#M range suffix
    let base_no_range = TRAILING_RANGE.replace(trimmed, "").trim().to_string();
    if base_no_range != trimmed && base_no_range != base_no_unit {
        if let Some(url) = fuzzy_lookup(manifest, &fuzzy_normalize(&base_no_range)) {
            return Some(url.to_string());
        }
    }

    // 6. Strip trailing parenthesized group
    let base_no_parens = TRAILING_PARENS.replace(trimmed, "").trim().to_string();
    if base_no_parens != trimmed {
        if let Some(url) = fuzzy_lookup(manifest, &fuzzy_normalize(&base_no_parens)) {
            return Some(url.to_string());
        }
    }

    // 7. Strip both #N and parenthesized group
    let base_stripped = TRAILING_PARENS
        .replace(&base_no_unit, "")
        .trim()
        .to_string();
    if base_stripped != base_no_unit && base_stripped != base_no_parens {
        if let Some(url) = fuzzy_lookup(manifest, &fuzzy_normalize(&base_stripped)) {
            return Some(url.to_string());
        }
    }

    // 8. Prefix match, first manifest entry in listing order
    for (key, url) in manifest {
        let key_fuzzy = fuzzy_normalize(key);
        if key_fuzzy.starts_with(&fuzzy) || fuzzy.starts_with(&key_fuzzy) {
            return Some(url.clone());
        }
    }

    None
}
