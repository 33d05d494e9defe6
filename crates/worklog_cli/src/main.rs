//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `worklog_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use chrono::NaiveDate;
use worklog_core::{extract_followup, infer_play, infer_tags};

fn main() {
    // Fixed sample note and reference date keep output stable across runs.
    let note = "Ran pipeline pod for 7 deals, blocker flagged, follow up by Friday";
    let reference_date = NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date");

    println!("worklog_core version={}", worklog_core::core_version());
    println!("sample play={}", infer_play(note).label());
    println!("sample tags={}", infer_tags(note).join(","));
    if let Some(draft) = extract_followup(note, reference_date) {
        println!("sample followup_due={}", draft.due_date);
    }
}
