//! Cross-permit information aggregation.
//!
//! Many permits ask for the same documents. This folds every permit's
//! required information into one list, ordered by the longest review that
//! is blocked on each item, so the applicant knows what to gather first.

use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};
use regex::Regex;

use crate::text::alphabetical;
use crate::types::{CrossPermitInfoItem, PermitPlanItem};

static NON_ALPHANUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

struct InfoEntry<'a> {
    info: &'a str,
    used_by_permits: IndexSet<&'a str>,
    longest_wait_weeks: u32,
}

/// Merge key: lower-case, punctuation and whitespace runs collapsed.
pub fn info_key(value: &str) -> String {
    NON_ALPHANUMERIC_RUN
        .replace_all(&value.to_lowercase(), " ")
        .trim()
        .to_string()
}

/// Ranked, deduplicated information items across `permits`.
///
/// Ordered by longest blocked wait, then by how many permits reuse the
/// item, then alphabetically. The first phrasing seen is kept.
pub fn information_across_permits(permits: &[PermitPlanItem]) -> Vec<CrossPermitInfoItem> {
    let mut entries: IndexMap<String, InfoEntry<'_>> = IndexMap::new();

    for permit in permits {
        for info in &permit.required_information {
            let entry = entries.entry(info_key(info)).or_insert_with(|| InfoEntry {
                info,
                used_by_permits: IndexSet::new(),
                longest_wait_weeks: permit.estimated_wait_weeks,
            });

            entry.used_by_permits.insert(&permit.permit_name);
            entry.longest_wait_weeks = entry.longest_wait_weeks.max(permit.estimated_wait_weeks);
        }
    }

    let mut sorted: Vec<InfoEntry<'_>> = entries.into_values().collect();
    sorted.sort_by(|left, right| {
        right
            .longest_wait_weeks
            .cmp(&left.longest_wait_weeks)
            .then_with(|| right.used_by_permits.len().cmp(&left.used_by_permits.len()))
            .then_with(|| alphabetical(left.info, right.info))
    });

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, entry)| CrossPermitInfoItem {
            info: entry.info.to_string(),
            shared_across_permits: entry.used_by_permits.len() > 1,
            used_by_permits: entry.used_by_permits.into_iter().map(String::from).collect(),
            longest_wait_weeks: entry.longest_wait_weeks,
            effort_rank: index + 1,
        })
        .collect()
}
