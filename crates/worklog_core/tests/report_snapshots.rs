use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;
use worklog_core::db::open_db_in_memory;
use worklog_core::{
    Account, Deal, EntryService, FollowUp, FollowUpStatus, NoteInput, ReferenceRepository,
    ReportService, Routine, SnapshotRepository, SqliteEntryRepository, SqliteReferenceRepository,
    SqliteSnapshotRepository,
};

// Wednesday; its ISO week is 2026-08-24 (Mon) through 2026-08-30 (Sun).
fn reference_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 26)
        .unwrap()
        .and_hms_opt(17, 0, 0)
        .unwrap()
}

fn seed_reporting_fixture(conn: &rusqlite::Connection) {
    let references = SqliteReferenceRepository::new(conn);

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
        next_step_date: Some(NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()),
        updated_at: reference_now(),
    };
    references.create_deal(&deal).unwrap();

    references
        .create_routine(&Routine {
            id: Uuid::new_v4(),
            routine_type: "pipeline pod".to_string(),
            frequency: "weekly".to_string(),
            default_day: "Tue".to_string(),
            last_completed_date: Some(NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()),
            is_active: true,
        })
        .unwrap();

    references
        .create_followup(&FollowUp {
            id: Uuid::new_v4(),
            title: "Send notes".to_string(),
            due_date: NaiveDate::from_ymd_opt(2026, 8, 26).unwrap(),
            status: FollowUpStatus::Done,
            linked_entry_id: None,
            linked_deal_id: Some(deal.id),
        })
        .unwrap();

    let entry_service = EntryService::new(
        SqliteEntryRepository::new(conn),
        SqliteReferenceRepository::new(conn),
    );
    entry_service
        .log_entry(
            NoteInput {
                entry_type: "meeting".to_string(),
                title: "touchpoint".to_string(),
                raw_note: "pipeline pod talk track".to_string(),
                account_id: Some(account.id),
                deal_id: Some(deal.id),
                duration_min: 30,
                stakeholders: Vec::new(),
            },
            reference_now(),
        )
        .unwrap();
}

fn report_service(
    conn: &rusqlite::Connection,
) -> ReportService<
    SqliteEntryRepository<'_>,
    SqliteReferenceRepository<'_>,
    SqliteSnapshotRepository<'_>,
> {
    ReportService::new(
        SqliteEntryRepository::new(conn),
        SqliteReferenceRepository::new(conn),
        SqliteSnapshotRepository::new(conn),
    )
}

#[test]
fn weekly_snapshot_contains_expected_sections_and_metrics() {
    let conn = open_db_in_memory().unwrap();
    seed_reporting_fixture(&conn);
    let service = report_service(&conn);

    let snapshot = service.generate_weekly(reference_now()).unwrap();

    assert_eq!(
        snapshot.week_start,
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    );
    assert!(snapshot.email_subject.contains("Weekly Update"));
    assert!(snapshot.email_body.contains("1) Highlights"));
    assert!(snapshot.email_body.contains("2) Deals & pipeline movement"));
    assert!(snapshot
        .email_body
        .contains("- Acme GCVE Migration: stage Discovery; next: Workshop (2026-08-27)"));
    assert!(snapshot
        .email_body
        .contains("- Entries tagged co-sell/talk track: 1"));
    assert!(snapshot.email_body.contains("- Blockers flagged: 0"));
    assert!(snapshot
        .teams_text
        .contains("$250000 influenced pipeline tracked."));

    assert_eq!(snapshot.metrics.entry_counts_by_type.get("meeting"), Some(&1));
    assert_eq!(snapshot.metrics.hours_by_play.get("Other"), Some(&0.5));
    assert_eq!(snapshot.metrics.cadence_completion_rate, 1.0);
    assert_eq!(snapshot.metrics.accounts_touched, 1);
    assert_eq!(snapshot.metrics.deals_touched, 1);
    assert_eq!(snapshot.metrics.followups_created, 1);
    assert_eq!(snapshot.metrics.followups_closed, 1);
    assert_eq!(snapshot.metrics.influenced_value, 250_000.0);
    assert_eq!(snapshot.metrics.influenced_fm, 50_000.0);
}

#[test]
fn weekly_generation_without_deal_movement_uses_fallback_line() {
    let conn = open_db_in_memory().unwrap();
    let service = report_service(&conn);

    let snapshot = service.generate_weekly(reference_now()).unwrap();

    assert!(snapshot.email_body.contains("- No deal updates logged."));
    assert_eq!(snapshot.metrics.cadence_completion_rate, 0.0);
    assert!(!snapshot.teams_text.contains("influenced pipeline"));
}

#[test]
fn deal_stage_move_pulls_influenced_value_into_the_weekly_window() {
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
    let service = report_service(&conn);

    let before = service.generate_weekly(reference_now()).unwrap();
    assert_eq!(before.metrics.influenced_value, 0.0);

    let entry_service = EntryService::new(
        SqliteEntryRepository::new(&conn),
        SqliteReferenceRepository::new(&conn),
    );
    entry_service
        .update_deal_stage(deal.id, "Proposal", reference_now())
        .unwrap();

    let after = service.generate_weekly(reference_now()).unwrap();
    assert_eq!(after.metrics.influenced_value, 250_000.0);
    assert_eq!(after.metrics.influenced_fm, 50_000.0);
    assert!(after
        .teams_text
        .contains("$250000 influenced pipeline tracked."));
}

#[test]
fn monthly_snapshot_contains_expected_sections() {
    let conn = open_db_in_memory().unwrap();
    seed_reporting_fixture(&conn);
    let service = report_service(&conn);

    let snapshot = service.generate_monthly(reference_now()).unwrap();

    assert_eq!(snapshot.month_key, "2026-08");
    assert_eq!(snapshot.email_subject, "Monthly Summary – August 2026");
    assert!(snapshot.email_body.contains("Top 5 highlights"));
    assert!(snapshot.email_body.contains("- Counts by type: meeting=1"));
    assert!(snapshot.email_body.contains("- Hours by play: Other=0.50"));
    assert!(snapshot
        .email_body
        .contains("- No explicit proof statements logged this month."));
    assert!(snapshot.email_body.contains("- not drafted"));
    assert_eq!(snapshot.slide_bullets.lines().count(), 5);
}

#[test]
fn monthly_proof_statements_follow_note_corpus() {
    let conn = open_db_in_memory().unwrap();
    let entry_service = EntryService::new(
        SqliteEntryRepository::new(&conn),
        SqliteReferenceRepository::new(&conn),
    );
    entry_service
        .log_entry(
            NoteInput {
                entry_type: "note".to_string(),
                title: "results".to_string(),
                raw_note: "Workload now faster and cost dropped; win story drafted".to_string(),
                account_id: None,
                deal_id: None,
                duration_min: 15,
                stakeholders: Vec::new(),
            },
            reference_now(),
        )
        .unwrap();

    let snapshot = report_service(&conn)
        .generate_monthly(reference_now())
        .unwrap();

    assert!(snapshot
        .email_body
        .contains("- Proof (faster): observed in logged updates."));
    assert!(snapshot
        .email_body
        .contains("- Proof (cost): observed in logged updates."));
    assert!(!snapshot.email_body.contains("- Proof (safer)"));
    assert!(snapshot.email_body.contains("- drafted"));
}

#[test]
fn repeated_generation_produces_byte_identical_text() {
    let conn = open_db_in_memory().unwrap();
    seed_reporting_fixture(&conn);
    let service = report_service(&conn);

    let weekly_first = service.generate_weekly(reference_now()).unwrap();
    let weekly_second = service.generate_weekly(reference_now()).unwrap();
    assert_eq!(weekly_first.teams_text, weekly_second.teams_text);
    assert_eq!(weekly_first.email_subject, weekly_second.email_subject);
    assert_eq!(weekly_first.email_body, weekly_second.email_body);
    assert_eq!(weekly_first.slide_bullets, weekly_second.slide_bullets);
    assert_eq!(weekly_first.metrics, weekly_second.metrics);

    let monthly_first = service.generate_monthly(reference_now()).unwrap();
    let monthly_second = service.generate_monthly(reference_now()).unwrap();
    assert_eq!(monthly_first.email_body, monthly_second.email_body);
    assert_eq!(monthly_first.slide_bullets, monthly_second.slide_bullets);
}

#[test]
fn snapshots_are_appended_and_round_trip_metrics() {
    let conn = open_db_in_memory().unwrap();
    seed_reporting_fixture(&conn);
    let service = report_service(&conn);

    let generated = service.generate_weekly(reference_now()).unwrap();
    service.generate_weekly(reference_now()).unwrap();

    let snapshots = SqliteSnapshotRepository::new(&conn);
    let listed = snapshots.list_weekly().unwrap();
    assert_eq!(listed.len(), 2);
    let stored = listed
        .iter()
        .find(|snapshot| snapshot.id == generated.id)
        .expect("generated snapshot should be listed");
    assert_eq!(stored.metrics, generated.metrics);
    assert_eq!(stored.email_body, generated.email_body);
}
