//! Case-insensitive substring search over inventory records.
//!
//! The list endpoints apply the same rule in SQL with `ILIKE`;
//! `ResourceCache::search` in the client crate uses [`filter_by_search`] to
//! narrow an already-fetched list.

/// Records that expose text fields to search.
pub trait Searchable {
    /// The fields a search term is matched against (name, category,
    /// manufacturer and any per-type extras). Absent fields are `None`.
    fn search_fields(&self) -> Vec<Option<&str>>;
}

/// Whether `term` occurs, ignoring case, in any of `fields`.
///
/// The term is trimmed first; an empty term matches everything.
pub fn matches_search(term: &str, fields: &[Option<&str>]) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Keep the records matching `term`, preserving their order.
pub fn filter_by_search<'a, R: Searchable>(records: &'a [R], term: &str) -> Vec<&'a R> {
    records
        .iter()
        .filter(|r| matches_search(term, &r.search_fields()))
        .collect()
}

/// Escape `%`, `_` and `\` so a user term is matched literally by `ILIKE`,
/// and wrap it for substring matching.
pub fn ilike_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
