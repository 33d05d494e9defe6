//! Keyword and trigger tables for note classification.
//!
//! # Responsibility
//! - Hold the process-wide immutable keyword/outcome/trigger configuration.
//!
//! # Invariants
//! - Play and intention tables are ordered slices; declaration order is the
//!   tie-break policy when a word appears in more than one keyword set.
//! - Tables are loaded once and never mutated at runtime.

use crate::model::entry::{IntentionBucket, Play};
use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered play keyword table; first matching play wins.
pub(crate) const PLAY_KEYWORDS: &[(Play, &[&str])] = &[
    (Play::Gcve, &["gcve", "vmware", "migration"]),
    (Play::Gdc, &["gdc", "data cloud", "data"]),
    (Play::Gke, &["gke", "kubernetes", "container"]),
    (Play::Vertex, &["vertex", "ml", "model"]),
    (Play::FinOps, &["finops", "cost", "optimization"]),
    (
        Play::AiReadiness,
        &["ai readiness", "ai", "inference", "gpu", "foundation"],
    ),
];

/// Non-exclusive tag table; every matching tag is emitted.
pub(crate) const TAG_KEYWORDS: &[(&str, &[&str])] = &[
    ("ATC", &["atc"]),
    ("funding", &["funding", "accelerator"]),
    ("workshop", &["workshop"]),
    ("SOW", &["sow", "statement of work"]),
    ("pod", &["pod", "pipeline"]),
    ("enablement", &["enablement", "training"]),
    ("talk track", &["talk track", "objection"]),
    ("objection", &["objection"]),
    ("win story", &["win story"]),
    ("checklist", &["checklist"]),
    ("demo", &["demo", "poc"]),
    ("sizing", &["sizing", "estimate"]),
    ("architecture", &["architecture", "design"]),
];

/// Keyword-to-outcome table; every matching keyword contributes its phrase.
pub(crate) const OUTCOME_KEYWORDS: &[(&str, &str)] = &[
    ("workshop", "workshop proposed"),
    ("scheduled", "workshop scheduled"),
    ("sow", "SOW started"),
    ("pod", "pipeline pod"),
    ("enablement", "enablement delivered"),
    ("talk track", "co-sell touchpoint"),
    ("deck", "asset created"),
    ("one-pager", "asset created"),
    ("datasheet", "asset created"),
    ("learn", "learning block"),
    ("stakeholder", "stakeholder update"),
    ("blocker", "blocker flagged"),
    ("follow up", "follow-up created"),
];

/// Intention buckets evaluated in A..D priority order; first match wins.
pub(crate) const INTENTION_KEYWORDS: &[(IntentionBucket, &[&str])] = &[
    (
        IntentionBucket::A,
        &[
            "co-sell",
            "accelerator",
            "pov",
            "why",
            "workshop",
            "sow",
            "win story",
            "datasheet",
        ],
    ),
    (
        IntentionBucket::B,
        &[
            "ai readiness",
            "infra",
            "foundation",
            "checklist",
            "talk track",
            "specialization",
        ],
    ),
    (
        IntentionBucket::C,
        &[
            "support",
            "learning",
            "template",
            "community",
            "risk",
            "balance",
            "focus",
        ],
    ),
    (
        IntentionBucket::D,
        &[
            "pipeline pod",
            "enablement session",
            "walk the halls",
            "cadence",
            "co-sell touchpoint",
        ],
    ),
];

/// Ordered trigger patterns meaning "this text implies an outstanding action".
pub(crate) static FOLLOWUP_TRIGGERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"follow\s?up",
        r"waiting on",
        r"send",
        r"need from",
        r"by\s+(friday|monday|tuesday|wednesday|thursday|\d{4}-\d{2}-\d{2})",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid follow-up trigger regex"))
    .collect()
});

/// Embedded calendar date in strict `YYYY-MM-DD` shape.
pub(crate) static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid iso date regex"));
