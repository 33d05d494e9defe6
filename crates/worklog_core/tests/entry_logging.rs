use chrono::NaiveDate;
use uuid::Uuid;
use worklog_core::db::open_db_in_memory;
use worklog_core::{
    Account, Deal, EntryService, FollowUp, FollowUpStatus, IntentionBucket, NoteInput, Play,
    ReferenceRepository, RepoError, SqliteEntryRepository, SqliteReferenceRepository,
};

fn note_input(raw_note: &str, entry_type: &str) -> NoteInput {
    NoteInput {
        entry_type: entry_type.to_string(),
        title: "touchpoint".to_string(),
        raw_note: raw_note.to_string(),
        account_id: None,
        deal_id: None,
        duration_min: 30,
        stakeholders: Vec::new(),
    }
}

#[test]
fn log_entry_persists_classification_and_followup() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(
        SqliteEntryRepository::new(&conn),
        SqliteReferenceRepository::new(&conn),
    );

    let now = NaiveDate::from_ymd_opt(2026, 8, 26)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    let logged = service
        .log_entry(
            note_input(
                "AI readiness infra foundation checklist, follow up by friday",
                "meeting",
            ),
            now,
        )
        .unwrap();

    assert_eq!(logged.entry.play, Play::AiReadiness);
    assert_eq!(logged.entry.intention_bucket, IntentionBucket::B);
    assert!(logged.entry.tags.contains(&"checklist".to_string()));
    assert!(logged
        .entry
        .outcomes
        .contains(&"meeting completed".to_string()));

    let followup = logged.followup.expect("follow-up should be derived");
    assert_eq!(followup.status, FollowUpStatus::Open);
    assert_eq!(followup.linked_entry_id, Some(logged.entry.id));
    assert_eq!(
        followup.due_date,
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    );

    // The row is visible through window queries afterwards.
    let references = SqliteReferenceRepository::new(&conn);
    let due = references
        .followups_due_between(
            NaiveDate::from_ymd_opt(2026, 8, 24).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
        )
        .unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, followup.id);
}

#[test]
fn log_entry_without_trigger_creates_no_followup() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(
        SqliteEntryRepository::new(&conn),
        SqliteReferenceRepository::new(&conn),
    );

    let now = NaiveDate::from_ymd_opt(2026, 8, 26)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let logged = service
        .log_entry(note_input("learning block on kubernetes", "note"), now)
        .unwrap();

    assert!(logged.followup.is_none());
    assert_eq!(logged.entry.play, Play::Gke);
}

#[test]
fn logged_entry_round_trips_through_storage() {
    let conn = open_db_in_memory().unwrap();
    let references = SqliteReferenceRepository::new(&conn);
    let account = Account::new("Acme Retail", "Retail", "Enterprise");
    references.create_account(&account).unwrap();

    let service = EntryService::new(
        SqliteEntryRepository::new(&conn),
        SqliteReferenceRepository::new(&conn),
    );
    let now = NaiveDate::from_ymd_opt(2026, 8, 26)
        .unwrap()
        .and_hms_opt(14, 0, 0)
        .unwrap();
    let mut input = note_input("Delivered enablement talk track deck", "meeting");
    input.account_id = Some(account.id);
    input.stakeholders = vec!["AE".to_string(), "SE".to_string()];
    let logged = service.log_entry(input, now).unwrap();

    let entry_repo = SqliteEntryRepository::new(&conn);
    let stored = worklog_core::EntryRepository::get_entry(&entry_repo, logged.entry.id)
        .unwrap()
        .expect("entry should exist");
    assert_eq!(stored, logged.entry);
}

#[test]
fn deal_stage_move_bumps_update_window_and_logs_audit_entry() {
    let conn = open_db_in_memory().unwrap();
    let references = SqliteReferenceRepository::new(&conn);
    let account = Account::new("Acme Retail", "Retail", "Enterprise");
    references.create_account(&account).unwrap();
    let deal = Deal {
        id: Uuid::new_v4(),
        account_id: account.id,
        name: "Acme GCVE Migration".to_string(),
        play_type: "GCVE".to_string(),
        stage: "Discovery".to_string(),
        est_value: Some(250_000.0),
        est_fm: Some(50_000.0),
        next_step: "Workshop".to_string(),
        next_step_date: None,
        updated_at: NaiveDate::from_ymd_opt(2026, 8, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    };
    references.create_deal(&deal).unwrap();

    let service = EntryService::new(
        SqliteEntryRepository::new(&conn),
        SqliteReferenceRepository::new(&conn),
    );
    let now = NaiveDate::from_ymd_opt(2026, 8, 26)
        .unwrap()
        .and_hms_opt(11, 0, 0)
        .unwrap();

    // The deal was last touched weeks ago; this week's window is empty.
    let week_start = NaiveDate::from_ymd_opt(2026, 8, 24)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let week_end = NaiveDate::from_ymd_opt(2026, 8, 30)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();
    assert!(references
        .deals_updated_between(week_start, week_end)
        .unwrap()
        .is_empty());

    let moved = service.update_deal_stage(deal.id, "Proposal", now).unwrap();
    assert_eq!(moved.deal.stage, "Proposal");
    assert_eq!(moved.deal.updated_at, now);

    assert_eq!(moved.entry.entry_type, "deal");
    assert_eq!(moved.entry.title, "Deal moved");
    assert_eq!(moved.entry.raw_note, "Deal moved: Discovery -> Proposal");
    assert_eq!(moved.entry.play, Play::Other);
    assert_eq!(moved.entry.intention_bucket, IntentionBucket::D);
    assert_eq!(moved.entry.duration_min, 5);
    assert_eq!(moved.entry.deal_id, Some(deal.id));
    assert_eq!(moved.entry.account_id, Some(account.id));

    // The move lands the deal in the current update window.
    let updated = references
        .deals_updated_between(week_start, week_end)
        .unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].stage, "Proposal");

    let stored = worklog_core::EntryRepository::get_entry(
        &SqliteEntryRepository::new(&conn),
        moved.entry.id,
    )
    .unwrap()
    .expect("audit entry should be persisted");
    assert_eq!(stored, moved.entry);
}

#[test]
fn deal_stage_move_for_unknown_deal_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(
        SqliteEntryRepository::new(&conn),
        SqliteReferenceRepository::new(&conn),
    );
    let now = NaiveDate::from_ymd_opt(2026, 8, 26)
        .unwrap()
        .and_hms_opt(11, 0, 0)
        .unwrap();

    let missing = Uuid::new_v4();
    let err = service
        .update_deal_stage(missing, "Proposal", now)
        .unwrap_err();
    match err {
        RepoError::NotFound(id) => assert_eq!(id, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn followup_status_transition_is_persisted_and_closes_the_obligation() {
    let conn = open_db_in_memory().unwrap();
    let references = SqliteReferenceRepository::new(&conn);

    let due = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
    let followup = FollowUp {
        id: Uuid::new_v4(),
        title: "Send notes".to_string(),
        due_date: due,
        status: FollowUpStatus::Open,
        linked_entry_id: None,
        linked_deal_id: None,
    };
    references.create_followup(&followup).unwrap();
    assert_eq!(references.open_followups_due_by(due).unwrap().len(), 1);

    references
        .set_followup_status(followup.id, FollowUpStatus::Done)
        .unwrap();

    let listed = references.followups_due_between(due, due).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, FollowUpStatus::Done);
    assert!(references.open_followups_due_by(due).unwrap().is_empty());
}

#[test]
fn followup_status_transition_for_unknown_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let references = SqliteReferenceRepository::new(&conn);

    let missing = Uuid::new_v4();
    let err = references
        .set_followup_status(missing, FollowUpStatus::Done)
        .unwrap_err();
    match err {
        RepoError::NotFound(id) => assert_eq!(id, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn today_overview_counts_entries_and_week_due_followups() {
    let conn = open_db_in_memory().unwrap();
    let references = SqliteReferenceRepository::new(&conn);
    let account = Account::new("Northwind Health", "Healthcare", "Mid");
    references.create_account(&account).unwrap();
    let deal = Deal {
        id: uuid::Uuid::new_v4(),
        account_id: account.id,
        name: "Northwind AI Foundation".to_string(),
        play_type: "AI Readiness".to_string(),
        stage: "Proposal".to_string(),
        est_value: Some(350_000.0),
        est_fm: Some(70_000.0),
        next_step: "Send SOW".to_string(),
        next_step_date: Some(NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()),
        updated_at: NaiveDate::from_ymd_opt(2026, 8, 26)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
    };
    references.create_deal(&deal).unwrap();

    let service = EntryService::new(
        SqliteEntryRepository::new(&conn),
        SqliteReferenceRepository::new(&conn),
    );
    let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
    let now = today.and_hms_opt(11, 0, 0).unwrap();

    let mut input = note_input("follow up with SOW draft", "deal");
    input.account_id = Some(account.id);
    input.deal_id = Some(deal.id);
    service.log_entry(input, now).unwrap();
    service
        .log_entry(note_input("learning block", "note"), now)
        .unwrap();

    let overview = service.today_overview(today).unwrap();
    assert_eq!(overview.entries, 2);
    assert_eq!(overview.time_logged_min, 60);
    assert_eq!(overview.accounts_touched, 1);
    assert_eq!(overview.deals_touched, 1);
    assert_eq!(overview.followups_due, 1);
}
