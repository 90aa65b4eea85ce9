//! Autocomplete over driver names.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lowercases `name` and strips diacritics, so `"Pérez"` folds to `"perez"`.
pub fn fold_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Names containing `query`, ignoring case and accents, in input order.
///
/// A blank query suggests nothing.
pub fn suggest<'a>(names: &'a [String], query: &str) -> Vec<&'a str> {
    let needle = fold_name(query.trim());
    if needle.is_empty() {
        return Vec::new();
    }

    names
        .iter()
        .filter(|name| fold_name(name).contains(&needle))
        .map(String::as_str)
        .collect()
}
