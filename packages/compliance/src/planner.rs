//! Permit planner.
//!
//! Turns the project corpus into a submission-ordered permit plan: the
//! slowest municipal reviews come first so they can start while faster
//! packages are still being prepared.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::aggregator::information_across_permits;
use crate::corpus::Corpus;
use crate::permits::{core_templates, PermitTemplate, PERMIT_TEMPLATES};
use crate::text::{alphabetical, unique};
use crate::types::{PermitPlan, PermitPlanItem};

pub const SEQUENCING_NOTE: &str = "Submit permits in descending review time so the slowest municipal workflows start first while shorter permits are prepared in parallel.";

pub fn make_permit_plan(corpus: &Corpus) -> PermitPlan {
    let permits = rank_permits(corpus);
    let information_across_permits = information_across_permits(&permits);

    PermitPlan {
        permits,
        information_across_permits,
        sequencing_note: SEQUENCING_NOTE.to_string(),
    }
}

/// Longest review first. Ties on wait time are broken alphabetically by
/// permit name, case-insensitive first.
pub fn submission_order(left: &PermitTemplate, right: &PermitTemplate) -> Ordering {
    right
        .estimated_wait_weeks
        .cmp(&left.estimated_wait_weeks)
        .then_with(|| alphabetical(left.permit_name, right.permit_name))
}

/// Applicable templates plus the core set, in submission order.
pub fn rank_permits(corpus: &Corpus) -> Vec<PermitPlanItem> {
    let mut seen_keys = HashSet::new();

    let mut ordered: Vec<&PermitTemplate> = PERMIT_TEMPLATES
        .iter()
        .filter(|t| t.is_applicable(corpus))
        .chain(core_templates())
        .filter(|t| seen_keys.insert(t.key))
        .collect();

    ordered.sort_by(|left, right| submission_order(left, right));

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, template)| PermitPlanItem {
            permit_name: template.permit_name.to_string(),
            category: template.category.to_string(),
            estimated_wait_weeks: template.estimated_wait_weeks,
            estimated_wait_text: template.estimated_wait_text.to_string(),
            priority_rank: index + 1,
            why_start_early: template.why_start_early.to_string(),
            required_information: unique(&template.required_information),
        })
        .collect()
}
