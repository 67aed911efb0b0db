//! Query resolution against the catalog's indices.
//!
//! Lookup walks the match tiers in precedence order (accent-exact, then
//! accent-folded, then partial on request) and falls back to
//! stripping one trailing punctuation character when every tier misses, so
//! `"word."`, `"word·"` and `"word"` all resolve to the same entry.

use crate::catalog::Catalog;
use crate::consts::TRAILING_PUNCTUATION;
use crate::resource::{Category, Resource};
use theke_index::TextIndex;
use tracing::instrument;

/// Resolve a full-name query into an ordered, identifier-deduplicated set of
/// resources.
///
/// The query is trimmed of surrounding whitespace before NFC normalization;
/// indexed names were trimmed the same way, so untrimmed user input still
/// hits them. A query that is empty after trimming resolves to nothing.
#[instrument(skip(catalog))]
pub fn lookup<'c, I: TextIndex<u64>>(
    catalog: &'c Catalog<I>,
    query: &str,
    category: Category,
    allow_partial: bool,
) -> Vec<&'c Resource> {
    let query = theke_meta::nfc(query.trim());
    collect(catalog, resolve(catalog, &query, category, allow_partial))
}

/// Resolve a keyword list against the word index. Exact tiers only: word
/// tokenization already removed punctuation, so there is no partial tier and
/// no punctuation fallback here.
#[instrument(skip(catalog, keywords), fields(keywords = keywords.len()))]
pub fn search<'c, I: TextIndex<u64>>(
    catalog: &'c Catalog<I>,
    keywords: &[&str],
    category: Category,
) -> Vec<&'c Resource> {
    let mut ids = Vec::new();
    for keyword in keywords {
        let tiers = catalog.by_word().lookup(keyword);
        let hits = filtered(catalog, tiers.exact_accented, category);
        let hits = if hits.is_empty() {
            filtered(catalog, tiers.exact_unaccented, category)
        } else {
            hits
        };
        ids.extend(hits);
    }
    collect(catalog, ids)
}

/// The tier cascade for one (possibly punctuation-stripped) query form.
fn resolve<I: TextIndex<u64>>(
    catalog: &Catalog<I>,
    query: &str,
    category: Category,
    allow_partial: bool,
) -> Vec<u64> {
    if query.is_empty() {
        return Vec::new();
    }
    let tiers = catalog.by_name().lookup(query);
    let hits = filtered(catalog, tiers.exact_accented, category);
    if !hits.is_empty() {
        return hits;
    }
    let hits = filtered(catalog, tiers.exact_unaccented, category);
    if !hits.is_empty() {
        return hits;
    }
    if allow_partial {
        let hits = filtered(catalog, tiers.partial, category);
        if !hits.is_empty() {
            return hits;
        }
    }
    // Strip exactly one trailing punctuation character and retry the whole
    // cascade.
    match query.strip_suffix(TRAILING_PUNCTUATION) {
        Some(stripped) => resolve(catalog, stripped, category, allow_partial),
        None => Vec::new(),
    }
}

fn filtered<I: TextIndex<u64>>(catalog: &Catalog<I>, ids: Vec<u64>, category: Category) -> Vec<u64> {
    ids.into_iter()
        .filter(|id| catalog.get(*id).is_some_and(|resource| category.matches(resource.kind)))
        .collect()
}

/// Map identifiers to resources, dropping duplicates while keeping order.
fn collect<I: TextIndex<u64>>(catalog: &Catalog<I>, ids: Vec<u64>) -> Vec<&Resource> {
    let mut seen = Vec::with_capacity(ids.len());
    let mut resources = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id)
            && let Some(resource) = catalog.get(id)
        {
            seen.push(id);
            resources.push(resource);
        }
    }
    resources
}
