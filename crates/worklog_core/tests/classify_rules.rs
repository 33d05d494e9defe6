use chrono::NaiveDate;
use worklog_core::{
    extract_followup, infer_intention_bucket, infer_outcomes, infer_play, infer_tags,
    FollowUpStatus, IntentionBucket, Play,
};

#[test]
fn unmatched_note_falls_back_to_other_play() {
    assert_eq!(infer_play("Ran pipeline pod for 7 deals"), Play::Other);
    assert_eq!(infer_play(""), Play::Other);
    assert_eq!(infer_play("completely unrelated text"), Play::Other);
}

#[test]
fn play_inference_matches_known_keywords() {
    assert_eq!(infer_play("GCVE migration kickoff"), Play::Gcve);
    assert_eq!(infer_play("kubernetes container sizing"), Play::Gke);
    assert_eq!(infer_play("vertex model eval"), Play::Vertex);
    assert_eq!(infer_play("finops cost review"), Play::FinOps);
    assert_eq!(
        infer_play("AI readiness infra foundation checklist for customer"),
        Play::AiReadiness
    );
}

#[test]
fn tag_detection_is_non_exclusive() {
    let tags = infer_tags("Ran workshop and drafted SOW with talk track objection checklist");
    assert!(tags.contains(&"workshop".to_string()));
    assert!(tags.contains(&"SOW".to_string()));
    assert!(tags.contains(&"talk track".to_string()));
    assert!(tags.contains(&"checklist".to_string()));
    // Result is sorted and free of duplicates.
    let mut sorted = tags.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(tags, sorted);
}

#[test]
fn pipeline_pod_note_classifies_per_dashboard_scenario() {
    let note = "Ran pipeline pod for 7 deals, blocker flagged, follow up by Friday";
    assert_eq!(infer_play(note), Play::Other);
    assert!(infer_tags(note).contains(&"pod".to_string()));

    // Wednesday 2026-08-26; next Friday strictly after is 2026-08-28.
    let reference = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
    let draft = extract_followup(note, reference).unwrap();
    assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2026, 8, 28).unwrap());
    assert_eq!(draft.status, FollowUpStatus::Open);
}

#[test]
fn intention_bucket_prefers_earlier_buckets_and_defaults_to_a() {
    assert_eq!(
        infer_intention_bucket("AI readiness infra foundation checklist for customer", "meeting"),
        IntentionBucket::B
    );
    assert_eq!(
        infer_intention_bucket("workshop prep", "note"),
        IntentionBucket::A
    );
    assert_eq!(
        infer_intention_bucket("weekly cadence review", "note"),
        IntentionBucket::D
    );
    assert_eq!(
        infer_intention_bucket("nothing that matches", "note"),
        IntentionBucket::A
    );
}

#[test]
fn outcome_inference_collects_sorted_unique_phrases() {
    let note = "Workshop scheduled, follow up by Friday and send deck";
    let outcomes = infer_outcomes(note, "note");
    assert!(outcomes.contains(&"workshop proposed".to_string()));
    assert!(outcomes.contains(&"workshop scheduled".to_string()));
    assert!(outcomes.contains(&"asset created".to_string()));

    let followup = extract_followup(note, NaiveDate::from_ymd_opt(2026, 8, 24).unwrap());
    assert!(followup.is_some());
}

#[test]
fn meeting_entry_type_contributes_fixed_outcome() {
    let outcomes = infer_outcomes("quick sync", "meeting");
    assert_eq!(outcomes, vec!["meeting completed".to_string()]);

    let non_meeting = infer_outcomes("quick sync", "note");
    assert!(non_meeting.is_empty());
}

#[test]
fn outcomes_never_exceed_five_entries() {
    let note = "workshop scheduled sow pod enablement deck learn stakeholder blocker follow up talk track";
    let outcomes = infer_outcomes(note, "meeting");
    assert_eq!(outcomes.len(), 5);
    // Truncation keeps the lexicographically smallest phrases.
    let mut sorted = outcomes.clone();
    sorted.sort();
    assert_eq!(outcomes, sorted);
}

#[test]
fn followup_extraction_yields_at_most_one_obligation() {
    let reference = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
    assert!(extract_followup("status note without triggers", reference).is_none());

    // Multiple triggers still produce a single obligation.
    let draft = extract_followup("follow up, waiting on legal, send deck", reference).unwrap();
    assert_eq!(draft.due_date, reference);
}

#[test]
fn explicit_iso_date_overrides_friday_resolution() {
    let reference = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
    let draft = extract_followup("send summary by friday or by 2026-09-15", reference).unwrap();
    assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2026, 9, 15).unwrap());
}

#[test]
fn followup_title_is_capped_at_eighty_characters() {
    let long_note = format!("follow up {}", "x".repeat(200));
    let reference = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
    let draft = extract_followup(&long_note, reference).unwrap();
    assert_eq!(draft.title.chars().count(), 80);
    assert!(long_note.starts_with(&draft.title));
}

#[test]
fn classification_is_pure_for_identical_inputs() {
    let note = "GCVE migration workshop, follow up by friday";
    let reference = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
    let first = (
        infer_play(note),
        infer_tags(note),
        infer_outcomes(note, "meeting"),
        infer_intention_bucket(note, "meeting"),
        extract_followup(note, reference),
    );
    let second = (
        infer_play(note),
        infer_tags(note),
        infer_outcomes(note, "meeting"),
        infer_intention_bucket(note, "meeting"),
        extract_followup(note, reference),
    );
    assert_eq!(first, second);
}
