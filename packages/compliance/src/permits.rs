//! Permit template registry.
//!
//! A static catalog of the permits a Vancouver-area project may need. Each
//! template decides for itself whether the project text makes it relevant.

use std::sync::LazyLock;

use regex::Regex;

use crate::corpus::Corpus;

/// Always planned, whatever the classifiers say.
pub const CORE_TEMPLATE_KEYS: &[&str] = &[
    "development-zoning",
    "building-permit",
    "trade-permits",
    "occupancy-completion",
];

const BASE_PROJECT_INFO: &[&str] = &[
    "Legal site address and parcel identifier",
    "Owner/developer contact and authorized agent information",
    "Current title, covenant, and right-of-way summary",
];

const PROFESSIONAL_INFO: &[&str] = &[
    "Stamped design professional schedules and seals",
    "Code analysis summary tied to occupancy and construction type",
];

static DEVELOPMENT_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(new|build|apartment|condo|townhouse|rezoning|zoning|development|density|commercial|clinic)",
    )
    .unwrap()
});
static LIFE_SAFETY_TERMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(fire|life safety|egress|occupancy|mid-rise)").unwrap());
static SITE_WORK_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(excavat|shor|foundation|basement|parkade|retaining)").unwrap()
});
static CHANGE_OF_USE_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(convert|conversion|change of use|retrofit|tenant improvement|clinic|office to|shell)",
    )
    .unwrap()
});
static DEMOLITION_TERMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(demo|demolition|tear down|remove existing)").unwrap());

/// A permit definition. Immutable once the registry is built.
pub struct PermitTemplate {
    pub key: &'static str,
    pub permit_name: &'static str,
    pub category: &'static str,
    pub estimated_wait_weeks: u32,
    pub estimated_wait_text: &'static str,
    pub why_start_early: &'static str,
    pub required_information: Vec<&'static str>,
    pub(crate) applicability: fn(&Corpus) -> bool,
}

impl PermitTemplate {
    pub fn is_applicable(&self, corpus: &Corpus) -> bool {
        (self.applicability)(corpus)
    }
}

fn info(sections: &[&[&'static str]]) -> Vec<&'static str> {
    sections.concat()
}

/// Catalog order matters only for dedup; plans are re-sorted by wait time.
pub static PERMIT_TEMPLATES: LazyLock<Vec<PermitTemplate>> = LazyLock::new(|| {
    vec![
        PermitTemplate {
            key: "development-zoning",
            permit_name: "Development/Zoning Review",
            category: "Land Use",
            estimated_wait_weeks: 18,
            estimated_wait_text: "12-24 weeks",
            why_start_early: "Land-use approval can gate every downstream permit package and often requires revision rounds.",
            required_information: info(&[
                BASE_PROJECT_INFO,
                &[
                    "Current zoning designation with bylaw references",
                    "Topographic/site survey with setbacks, height, lot coverage, and FSR",
                    "Massing studies, floor-area schedule, and shadow/privacy impact studies",
                    "Planning rationale aligned to neighborhood policy and design guidelines",
                ],
            ]),
            applicability: |corpus| DEVELOPMENT_TERMS.is_match(&corpus.text),
        },
        PermitTemplate {
            key: "building-permit",
            permit_name: "Building Permit",
            category: "Building Code",
            estimated_wait_weeks: 12,
            estimated_wait_text: "8-16 weeks",
            why_start_early: "The core permit review is document-heavy and drives structural, envelope, and life-safety approvals.",
            required_information: info(&[
                BASE_PROJECT_INFO,
                PROFESSIONAL_INFO,
                &[
                    "Issued or accepted development/zoning decision reference",
                    "Stamped architectural drawing set",
                    "Stamped structural drawings, schedules, and foundation design",
                    "Energy or Step Code compliance documentation",
                    "Geotechnical and civil servicing reports where required",
                ],
            ]),
            applicability: |_| true,
        },
        PermitTemplate {
            key: "fire-life-safety",
            permit_name: "Fire/Life-Safety Design Review",
            category: "Life Safety",
            estimated_wait_weeks: 10,
            estimated_wait_text: "6-14 weeks",
            why_start_early: "Life-safety constraints can force major layout changes if caught late in design development.",
            required_information: info(&[
                BASE_PROJECT_INFO,
                PROFESSIONAL_INFO,
                &[
                    "Life-safety plan with exits, travel distances, and fire separations",
                    "Fire-protection narrative for alarm, sprinkler, and standpipe systems",
                    "Fire department access and firefighting operations plan",
                    "Alternative solution package where prescriptive code path is not met",
                ],
            ]),
            applicability: |corpus| {
                corpus.prompt_mentions_mid_rise() || LIFE_SAFETY_TERMS.is_match(&corpus.text)
            },
        },
        PermitTemplate {
            key: "excavation-shoring",
            permit_name: "Excavation/Shoring Permit",
            category: "Site Works",
            estimated_wait_weeks: 8,
            estimated_wait_text: "4-12 weeks",
            why_start_early: "Site and geotechnical review can be a critical path dependency before foundation work starts.",
            required_information: info(&[
                BASE_PROJECT_INFO,
                PROFESSIONAL_INFO,
                &[
                    "Geotechnical investigation report and recommendations",
                    "Engineered shoring/excavation drawings and sequencing",
                    "Erosion, sediment, and runoff control plan",
                    "Neighbor protection, monitoring, and vibration plan",
                ],
            ]),
            applicability: |corpus| SITE_WORK_TERMS.is_match(&corpus.text),
        },
        PermitTemplate {
            key: "change-of-use",
            permit_name: "Change of Use/Occupancy Permit",
            category: "Use Conversion",
            estimated_wait_weeks: 7,
            estimated_wait_text: "4-10 weeks",
            why_start_early: "Use changes trigger code upgrades and accessibility obligations that can materially alter scope.",
            required_information: info(&[
                BASE_PROJECT_INFO,
                PROFESSIONAL_INFO,
                &[
                    "Existing building condition assessment",
                    "Current vs proposed occupancy/use classification matrix",
                    "Barrier-free accessibility gap analysis and upgrade plan",
                    "Hazardous materials review and abatement scope where required",
                ],
            ]),
            applicability: |corpus| CHANGE_OF_USE_TERMS.is_match(&corpus.text),
        },
        PermitTemplate {
            key: "trade-permits",
            permit_name: "Trade Permits (MEP/Gas)",
            category: "Trades",
            estimated_wait_weeks: 6,
            estimated_wait_text: "3-10 weeks",
            why_start_early: "Trade permits can lag structural progress if engineering packages are submitted late.",
            required_information: info(&[
                BASE_PROJECT_INFO,
                PROFESSIONAL_INFO,
                &[
                    "Mechanical layouts with ventilation and equipment schedules",
                    "Electrical single-line diagrams and load calculations",
                    "Plumbing/isometric drawings and fixture schedules",
                    "Gas design package and appliance schedules where applicable",
                ],
            ]),
            applicability: |_| true,
        },
        PermitTemplate {
            key: "demolition",
            permit_name: "Demolition Permit",
            category: "Site Preparation",
            estimated_wait_weeks: 5,
            estimated_wait_text: "2-8 weeks",
            why_start_early: "Demolition holds up redevelopment start if utility disconnect and hazardous material steps are incomplete.",
            required_information: info(&[
                BASE_PROJECT_INFO,
                &[
                    "Demolition sequencing and safety plan",
                    "Hazardous materials survey and disposal plan",
                    "Utility disconnect confirmations",
                    "Neighbor/public protection and traffic control plan",
                ],
            ]),
            applicability: |corpus| DEMOLITION_TERMS.is_match(&corpus.text),
        },
        PermitTemplate {
            key: "occupancy-completion",
            permit_name: "Occupancy/Completion Approval",
            category: "Closeout",
            estimated_wait_weeks: 3,
            estimated_wait_text: "1-6 weeks",
            why_start_early: "Closeout packages fail when inspection and commissioning evidence is not tracked from the start.",
            required_information: info(&[
                BASE_PROJECT_INFO,
                &[
                    "All trade final inspections and deficiency closeout records",
                    "Life-safety systems testing and acceptance reports",
                    "Commissioning documentation and as-built drawings",
                    "Letters of assurance/professional sign-off package",
                ],
            ]),
            applicability: |_| true,
        },
    ]
});

pub fn find_template(key: &str) -> Option<&'static PermitTemplate> {
    PERMIT_TEMPLATES.iter().find(|t| t.key == key)
}

pub fn core_templates() -> impl Iterator<Item = &'static PermitTemplate> {
    CORE_TEMPLATE_KEYS.iter().filter_map(|key| find_template(key))
}
