//! Pre-submission checklist tailored from the project prompt.

use std::sync::LazyLock;

use regex::Regex;

use crate::corpus::Corpus;
use crate::text::unique;

const BASE_CHECKLIST: &[&str] = &[
    "Confirm land use and zoning for the lot.",
    "Identify required building permits and inspections.",
    "Rank permits by expected municipal review time and submit the longest first.",
    "Assemble one shared information pack for documents reused across multiple permits.",
    "Check fire, life-safety, egress, and occupancy rules.",
    "Document environmental and utility servicing requirements.",
];

const VANCOUVER_ITEM: &str =
    "Review City of Vancouver development and zoning bylaws for the property.";
const BC_CODE_ITEM: &str = "Verify applicable BC Building Code provisions for the building class.";
const MID_RISE_ITEM: &str =
    "Validate mid-rise requirements for height, exiting, and fire resistance.";

static BC_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bbc\b").unwrap());

pub fn make_checklist(project_prompt: &str) -> Vec<String> {
    let corpus = Corpus::new(project_prompt, &[]);
    let prompt = corpus.normalized_prompt.as_str();

    let mut items: Vec<&str> = Vec::with_capacity(BASE_CHECKLIST.len() + 3);

    if prompt.contains("vancouver") || prompt.contains("kitsilano") {
        items.push(VANCOUVER_ITEM);
    }
    items.extend_from_slice(BASE_CHECKLIST);
    if prompt.contains("british columbia") || BC_WORD.is_match(prompt) {
        items.push(BC_CODE_ITEM);
    }
    if corpus.prompt_mentions_mid_rise() {
        items.push(MID_RISE_ITEM);
    }

    unique(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_checklist() {
        let items = make_checklist("Garage conversion in Calgary");
        assert_eq!(items, BASE_CHECKLIST);
    }

    #[test]
    fn test_kitsilano_mid_rise_in_bc() {
        let items = make_checklist("4 stories condo in Kitsilano, BC");

        assert_eq!(items.len(), BASE_CHECKLIST.len() + 3);
        assert_eq!(items[0], VANCOUVER_ITEM);
        assert_eq!(items[items.len() - 2], BC_CODE_ITEM);
        assert_eq!(items[items.len() - 1], MID_RISE_ITEM);
    }

    #[test]
    fn test_bc_must_be_a_word() {
        let items = make_checklist("abc renovations in Victoria");
        assert!(!items.iter().any(|i| i == BC_CODE_ITEM));

        let items = make_checklist("Renovation in Victoria, British Columbia");
        assert!(items.iter().any(|i| i == BC_CODE_ITEM));
    }
}
