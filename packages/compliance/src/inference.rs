//! Heuristic risk, bylaw and regulation inference over search results.
//!
//! Everything here is keyword matching. The output points an applicant at
//! likely concerns; it is not a legal determination.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::corpus::Corpus;
use crate::text::unique;
use crate::types::{BylawLink, SearchResult};

pub const TOP_RISK_COUNT: usize = 3;
pub const MAX_BYLAW_LINKS: usize = 5;
pub const MAX_INFERRED_REGULATIONS: usize = 5;

pub const UNSPECIFIED_REGULATION: &str = "Not clearly specified in snippet (open source to verify).";

struct RiskRule {
    applies: fn(&Corpus) -> bool,
    risk: &'static str,
}

const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        applies: |c| c.contains("zoning") || c.contains("land use") || c.normalized_prompt.contains("vancouver"),
        risk: "Zoning mismatch risk: project height, setbacks, density, or use may not align with the lot's bylaw.",
    },
    RiskRule {
        applies: |c| c.prompt_mentions_mid_rise() || c.contains("fire") || c.contains("egress"),
        risk: "Life-safety risk: mid-rise egress, fire-resistance, and occupancy requirements can trigger major redesigns.",
    },
    RiskRule {
        applies: |c| c.contains("permit") || c.contains("inspection") || c.contains("occupancy"),
        risk: "Permit sequencing risk: missing prerequisite permits or inspections can delay construction start and occupancy.",
    },
    RiskRule {
        applies: |c| c.contains("utility") || c.contains("servicing") || c.contains("environment"),
        risk: "Servicing risk: utility capacity, drainage, or environmental constraints can add unplanned scope and cost.",
    },
];

/// Used in order when fewer than three rules fire.
const FILLER_RISKS: &[&str] = &[
    "Jurisdiction risk: provincial and municipal requirements can conflict; confirm the governing authority for each requirement.",
    "Documentation risk: incomplete stamped plans and code references are common reasons for permit resubmission.",
    "Schedule risk: incomplete agency review packages often trigger revision cycles and timeline drift.",
    "Cost risk: late compliance changes can materially impact structural, MEP, and fire-protection budgets.",
];

static REGULATION_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(bylaw|code|regulation|permit|zoning|occupancy|fire|development|building)")
        .unwrap()
});

static REGULATION_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (
            r"(zoning|land use|rezoning|development by[- ]?law|setback|density|fsr)",
            "Zoning & Land Use Bylaws",
        ),
        (
            r"(building code|building permit|bc building code|nbcc|structural)",
            "Building Code & Building Permit",
        ),
        (
            r"(fire|life safety|egress|sprinkler|fire resistance)",
            "Fire & Life Safety Requirements",
        ),
        (
            r"(occupancy|final inspection|completion|occupancy permit)",
            "Occupancy / Completion Requirements",
        ),
        (
            r"(electrical|plumbing|gas|mechanical|hvac|trade permit)",
            "Trade Permits (Electrical/Plumbing/Gas/Mechanical)",
        ),
        (
            r"(environment|drainage|stormwater|servicing|utility|contamination)",
            "Environmental & Site Servicing Requirements",
        ),
        (
            r"(accessibility|barrier[- ]?free|universal design)",
            "Accessibility Requirements",
        ),
        (
            r"(energy|step code|energy code|emission|efficiency)",
            "Energy / Step Code Compliance",
        ),
    ]
    .into_iter()
    .map(|(pattern, label)| (Regex::new(pattern).unwrap(), label))
    .collect()
});

// =============================================================================
// Risks
// =============================================================================

/// Exactly three risk statements: matched rules first, then fillers.
pub fn top_risks(corpus: &Corpus) -> Vec<String> {
    let matched = RISK_RULES
        .iter()
        .filter(|rule| (rule.applies)(corpus))
        .map(|rule| rule.risk);

    let mut risks = unique(matched);
    for filler in FILLER_RISKS {
        if risks.len() >= TOP_RISK_COUNT {
            break;
        }
        risks.push(filler.to_string());
    }

    risks.truncate(TOP_RISK_COUNT);
    risks
}

// =============================================================================
// Bylaw links
// =============================================================================

fn bylaw_rank(result: &SearchResult) -> f64 {
    let mut rank = 0.0;

    if result.domain.contains(".gov") || result.domain.contains("vancouver.ca") {
        rank += 4.0;
    }
    if result.domain.contains("bccodes.ca") || result.domain.contains("bclaws.gov.bc.ca") {
        rank += 4.0;
    }
    if REGULATION_KEYWORDS.is_match(&result.title) || REGULATION_KEYWORDS.is_match(&result.url) {
        rank += 3.0;
    }
    if let Some(score) = result.score.filter(|s| s.is_finite()) {
        rank += score;
    }

    rank
}

/// Up to five regulation-looking links, authoritative domains first.
pub fn pick_bylaw_links(results: &[SearchResult]) -> Vec<BylawLink> {
    let mut ranked: Vec<(f64, &SearchResult)> =
        results.iter().map(|r| (bylaw_rank(r), r)).collect();
    ranked.sort_by(|left, right| right.0.partial_cmp(&left.0).unwrap_or(Ordering::Equal));

    let mut seen_urls = HashSet::new();

    ranked
        .into_iter()
        .map(|(_, result)| result)
        .filter(|r| REGULATION_KEYWORDS.is_match(&r.title) || REGULATION_KEYWORDS.is_match(&r.url))
        .filter(|r| seen_urls.insert(r.url.as_str()))
        .take(MAX_BYLAW_LINKS)
        .map(|r| BylawLink {
            title: r.title.clone(),
            url: r.url.clone(),
            domain: r.domain.clone(),
        })
        .collect()
}

// =============================================================================
// Regulations
// =============================================================================

/// Regulation families a result appears to touch, in rule order.
pub fn infer_regulations(result: &SearchResult) -> Vec<String> {
    let text = format!("{} {} {}", result.title, result.snippet, result.url).to_lowercase();

    let inferred: Vec<&str> = REGULATION_RULES
        .iter()
        .filter(|(pattern, _)| pattern.is_match(&text))
        .map(|(_, label)| *label)
        .collect();

    if inferred.is_empty() {
        return vec![UNSPECIFIED_REGULATION.to_string()];
    }

    let mut labels = unique(inferred);
    labels.truncate(MAX_INFERRED_REGULATIONS);
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::normalize::domain_of;
    use proptest::prelude::*;

    fn result(title: &str, url: &str, snippet: &str, score: Option<f64>) -> SearchResult {
        SearchResult {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            domain: domain_of(url),
            score,
            published_date: None,
        }
    }

    #[test]
    fn test_risks_for_kitsilano_condo() {
        let corpus = Corpus::new("4 stories condo in Kitsilano, Vancouver", &[]);
        let risks = top_risks(&corpus);

        assert_eq!(risks.len(), 3);
        assert!(risks[0].starts_with("Zoning mismatch risk"));
        assert!(risks[1].starts_with("Life-safety risk"));
        assert!(risks[2].starts_with("Jurisdiction risk"));
    }

    #[test]
    fn test_risks_fill_when_nothing_matches() {
        let risks = top_risks(&Corpus::new("paint a fence", &[]));

        assert_eq!(risks.len(), 3);
        assert!(risks[0].starts_with("Jurisdiction risk"));
        assert!(risks[1].starts_with("Documentation risk"));
        assert!(risks[2].starts_with("Schedule risk"));
    }

    #[test]
    fn test_risks_truncate_to_three() {
        let corpus = Corpus::new(
            "zoning, fire egress, permit inspection, utility servicing",
            &[],
        );
        let risks = top_risks(&corpus);

        assert_eq!(risks.len(), 3);
        assert!(risks[2].starts_with("Permit sequencing risk"));
    }

    #[test]
    fn test_risks_read_result_text() {
        let corpus = Corpus::new(
            "small renovation",
            &[result("Occupancy permits", "https://example.com", "", None)],
        );
        let risks = top_risks(&corpus);

        assert!(risks[0].starts_with("Permit sequencing risk"));
    }

    #[test]
    fn test_bylaw_links_prefer_authoritative_domains() {
        let results = vec![
            result("Building tips blog", "https://blog.example.com/building", "", Some(0.9)),
            result("Zoning and Development By-law", "https://vancouver.ca/zoning", "", Some(0.2)),
            result("BC Building Code 2024", "https://www.bccodes.ca/building-code.html", "", None),
            result("Kitchen ideas", "https://houzz.com/kitchens", "", Some(5.0)),
        ];

        let links = pick_bylaw_links(&results);
        let urls: Vec<_> = links.iter().map(|l| l.url.as_str()).collect();

        assert_eq!(
            urls,
            [
                "https://vancouver.ca/zoning",
                "https://www.bccodes.ca/building-code.html",
                "https://blog.example.com/building",
            ]
        );
        assert_eq!(links[0].domain, "vancouver.ca");
    }

    #[test]
    fn test_bylaw_links_domain_groups_are_additive() {
        // bclaws.gov.bc.ca earns both the .gov and the provincial-code bonus.
        let results = vec![
            result("Vancouver Building By-law", "https://vancouver.ca/building-bylaw", "", Some(0.9)),
            result("Building Act regulation", "https://bclaws.gov.bc.ca/civix/document", "", None),
        ];

        let links = pick_bylaw_links(&results);

        assert_eq!(links[0].domain, "bclaws.gov.bc.ca");
        assert_eq!(links[1].domain, "vancouver.ca");
    }

    #[test]
    fn test_bylaw_links_dedup_and_cap() {
        let mut results: Vec<_> = (0..8)
            .map(|i| result(&format!("Permit guide {}", i), &format!("https://example.com/{}", i), "", None))
            .collect();
        results.push(result("Permit guide again", "https://example.com/0", "", Some(1.0)));

        let links = pick_bylaw_links(&results);

        assert_eq!(links.len(), MAX_BYLAW_LINKS);
        assert_eq!(links[0].title, "Permit guide again");
        assert_eq!(
            links.iter().filter(|l| l.url == "https://example.com/0").count(),
            1
        );
    }

    #[test]
    fn test_bylaw_links_ignore_non_finite_scores() {
        let results = vec![
            result("Fire code", "https://a.example.com", "", Some(f64::NAN)),
            result("Fire code", "https://b.example.com", "", Some(0.5)),
        ];

        let links = pick_bylaw_links(&results);
        assert_eq!(links[0].url, "https://b.example.com");
        assert_eq!(links[1].url, "https://a.example.com");
    }

    #[test]
    fn test_infer_fire_and_occupancy() {
        let hit = result(
            "Fire upgrades",
            "https://example.com/x",
            "occupancy approval after sprinkler work",
            None,
        );

        assert_eq!(
            infer_regulations(&hit),
            ["Fire & Life Safety Requirements", "Occupancy / Completion Requirements"]
        );
    }

    #[test]
    fn test_infer_caps_at_five() {
        let hit = result(
            "zoning building code fire occupancy plumbing drainage accessibility energy",
            "https://example.com/x",
            "",
            None,
        );

        let regulations = infer_regulations(&hit);
        assert_eq!(regulations.len(), MAX_INFERRED_REGULATIONS);
        assert_eq!(regulations[0], "Zoning & Land Use Bylaws");
    }

    #[test]
    fn test_infer_placeholder_when_nothing_matches() {
        let hit = result("Kitchen ideas", "https://houzz.com/k", "Nice tiles", None);
        assert_eq!(infer_regulations(&hit), [UNSPECIFIED_REGULATION]);
    }

    proptest! {
        #[test]
        fn prop_always_three_risks(prompt in "[a-z0-9 ]{0,60}") {
            prop_assert_eq!(top_risks(&Corpus::new(&prompt, &[])).len(), TOP_RISK_COUNT);
        }

        #[test]
        fn prop_regulations_never_empty(snippet in "[a-z ]{0,80}") {
            let regulations = infer_regulations(&result("t", "https://x.io", &snippet, None));
            prop_assert!(!regulations.is_empty());
            prop_assert!(regulations.len() <= MAX_INFERRED_REGULATIONS);
        }
    }
}
