//! Small string helpers shared by the planners.

use std::cmp::Ordering;

use indexmap::IndexSet;

/// Trimmed, non-blank, first-seen order.
pub fn unique<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_string())
        .filter(|v| !v.is_empty())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Case-insensitive alphabetical order, falling back to byte order so the
/// result is total.
pub fn alphabetical(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}
