//! Rule-based note classifier.
//!
//! # Responsibility
//! - Derive play, tags, outcomes, intention bucket and follow-up obligations
//!   from free-text notes.
//! - Stay total: every derivation has a defined fallback and never fails.
//!
//! # Invariants
//! - All derivations operate on lower-cased, trimmed text.
//! - Identical inputs (including the explicit reference date) always produce
//!   identical output; no wall-clock reads happen here.
//! - At most one follow-up obligation is derived per note.

mod rules;

use crate::model::entry::{
    Classification, FollowUpDraft, FollowUpStatus, IntentionBucket, NoteInput, Play,
};
use chrono::{Datelike, Duration, NaiveDate};
use rules::{FOLLOWUP_TRIGGERS, INTENTION_KEYWORDS, ISO_DATE_RE, OUTCOME_KEYWORDS, PLAY_KEYWORDS, TAG_KEYWORDS};
use std::collections::BTreeSet;

/// Maximum length of a derived follow-up title, in characters.
const FOLLOWUP_TITLE_MAX_CHARS: usize = 80;
/// Maximum number of outcomes retained per note.
const OUTCOMES_MAX: usize = 5;

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Infers the play for a note.
///
/// Scans the ordered play table and returns the first play whose keyword set
/// intersects the text. Declaration order is the collision policy: a keyword
/// shared by two plays resolves to the earlier one. Falls back to
/// `Play::Other`.
pub fn infer_play(raw: &str) -> Play {
    let text = normalize(raw);
    for (play, keywords) in PLAY_KEYWORDS {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return *play;
        }
    }
    Play::Other
}

/// Infers sub-topic tags for a note.
///
/// Tags are non-exclusive; every matching tag category is returned,
/// deduplicated and lexicographically sorted.
pub fn infer_tags(raw: &str) -> Vec<String> {
    let text = normalize(raw);
    let tags: BTreeSet<&str> = TAG_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(tag, _)| *tag)
        .collect();
    tags.into_iter().map(str::to_string).collect()
}

/// Infers concrete outcome phrases for a note.
///
/// Every matching keyword contributes its mapped phrase; entry type
/// `"meeting"` additionally contributes `"meeting completed"`. The result is
/// deduplicated, sorted and capped at 5 entries. Truncation is lexicographic
/// by construction, which is the intended behavior.
pub fn infer_outcomes(raw: &str, entry_type: &str) -> Vec<String> {
    let text = normalize(raw);
    let mut hits: BTreeSet<&str> = OUTCOME_KEYWORDS
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .map(|(_, outcome)| *outcome)
        .collect();
    if entry_type == "meeting" {
        hits.insert("meeting completed");
    }
    hits.into_iter()
        .take(OUTCOMES_MAX)
        .map(str::to_string)
        .collect()
}

/// Infers the intention bucket for a note.
///
/// Buckets are evaluated in A..D priority order against the entry type and
/// text combined into one search string; the first match wins. Unmatched
/// text with cadence/weekly wording lands in `D`; everything else defaults
/// to `A`.
pub fn infer_intention_bucket(raw: &str, entry_type: &str) -> IntentionBucket {
    let text = format!("{entry_type} {}", normalize(raw));
    for (bucket, keywords) in INTENTION_KEYWORDS {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return *bucket;
        }
    }
    if text.contains("cadence") || text.contains("weekly") {
        return IntentionBucket::D;
    }
    IntentionBucket::A
}

/// Extracts at most one follow-up obligation from a note.
///
/// Trigger patterns cover explicit "follow up" phrasing, "waiting on",
/// "send", "need from" and day-name/ISO-date references. Due-date
/// resolution, lowest to highest precedence:
/// 1. the reference date itself,
/// 2. "friday" in the text rolls to the next Friday strictly after the
///    reference date (a full week when the reference date is a Friday),
/// 3. an embedded `YYYY-MM-DD` that parses as a real calendar date wins
///    outright; malformed embedded dates are silently ignored.
pub fn extract_followup(raw: &str, reference_date: NaiveDate) -> Option<FollowUpDraft> {
    let text = normalize(raw);
    if !FOLLOWUP_TRIGGERS
        .iter()
        .any(|trigger| trigger.is_match(&text))
    {
        return None;
    }

    let mut due = reference_date;
    if text.contains("friday") {
        let weekday = i64::from(due.weekday().num_days_from_monday());
        let mut days_ahead = (4 - weekday).rem_euclid(7);
        if days_ahead == 0 {
            days_ahead = 7;
        }
        due += Duration::days(days_ahead);
    }
    if let Some(found) = ISO_DATE_RE.find(&text) {
        if let Ok(explicit) = NaiveDate::parse_from_str(found.as_str(), "%Y-%m-%d") {
            due = explicit;
        }
    }

    Some(FollowUpDraft {
        title: raw.chars().take(FOLLOWUP_TITLE_MAX_CHARS).collect(),
        due_date: due,
        status: FollowUpStatus::Open,
    })
}

/// Runs all derivations for one note.
pub fn classify_note(input: &NoteInput, reference_date: NaiveDate) -> Classification {
    Classification {
        play: infer_play(&input.raw_note),
        tags: infer_tags(&input.raw_note),
        outcomes: infer_outcomes(&input.raw_note, &input.entry_type),
        intention_bucket: infer_intention_bucket(&input.raw_note, &input.entry_type),
        followup: extract_followup(&input.raw_note, reference_date),
    }
}
