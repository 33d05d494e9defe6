//! Report generation use-case service.
//!
//! # Responsibility
//! - Query windowed records, aggregate metrics, render narratives and append
//!   the resulting immutable snapshot.
//!
//! # Invariants
//! - All window reads for one report go through a single connection, so the
//!   aggregation observes one consistent store state.
//! - Snapshots are append-only; regeneration creates a new row.

use crate::model::records::{MonthlySnapshot, WeeklySnapshot};
use crate::repo::entry_repo::EntryRepository;
use crate::repo::reference_repo::ReferenceRepository;
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::repo::RepoResult;
use crate::report::metrics::{collect_metrics, MetricsBundle};
use crate::report::narrative::{deal_line, render_monthly, render_weekly};
use crate::report::window::ReportWindow;
use chrono::NaiveDateTime;
use log::info;
use std::time::Instant;
use uuid::Uuid;

/// Maximum deals listed in the "deal movement" section.
const DEAL_LINES_MAX: usize = 5;

/// Use-case service generating weekly/monthly report snapshots.
pub struct ReportService<E, R, S>
where
    E: EntryRepository,
    R: ReferenceRepository,
    S: SnapshotRepository,
{
    entries: E,
    references: R,
    snapshots: S,
}

impl<E, R, S> ReportService<E, R, S>
where
    E: EntryRepository,
    R: ReferenceRepository,
    S: SnapshotRepository,
{
    pub fn new(entries: E, references: R, snapshots: S) -> Self {
        Self {
            entries,
            references,
            snapshots,
        }
    }

    /// Generates and appends the weekly snapshot for the week containing
    /// `now`.
    pub fn generate_weekly(&self, now: NaiveDateTime) -> RepoResult<WeeklySnapshot> {
        let started_at = Instant::now();
        let window = ReportWindow::weekly_for(now.date());
        let (entries, metrics) = self.windowed_metrics(&window)?;

        let deal_lines: Vec<String> = self
            .references
            .deals_next_step_between(window.start, window.end)?
            .iter()
            .take(DEAL_LINES_MAX)
            .filter_map(|deal| deal.next_step_date.map(|day| deal_line(deal, day)))
            .collect();

        let narrative = render_weekly(&entries, &metrics, &deal_lines, &window);
        let snapshot = WeeklySnapshot {
            id: Uuid::new_v4(),
            week_start: narrative.week_start,
            teams_text: narrative.teams_text,
            email_subject: narrative.subject,
            email_body: narrative.email_body,
            slide_bullets: narrative.slide_bullets,
            metrics,
            generated_at: now,
        };
        self.snapshots.append_weekly(&snapshot)?;

        info!(
            "event=report_generated module=service status=ok period=weekly week_start={} entries={} duration_ms={}",
            snapshot.week_start,
            entries.len(),
            started_at.elapsed().as_millis()
        );

        Ok(snapshot)
    }

    /// Generates and appends the monthly snapshot for the month containing
    /// `now`.
    pub fn generate_monthly(&self, now: NaiveDateTime) -> RepoResult<MonthlySnapshot> {
        let started_at = Instant::now();
        let window = ReportWindow::monthly_for(now.date());
        let (entries, metrics) = self.windowed_metrics(&window)?;

        let narrative = render_monthly(&entries, &metrics, &window);
        let snapshot = MonthlySnapshot {
            id: Uuid::new_v4(),
            month_key: narrative.month_key,
            teams_text: narrative.teams_text,
            email_subject: narrative.subject,
            email_body: narrative.email_body,
            slide_bullets: narrative.slide_bullets,
            metrics,
            generated_at: now,
        };
        self.snapshots.append_monthly(&snapshot)?;

        info!(
            "event=report_generated module=service status=ok period=monthly month={} entries={} duration_ms={}",
            snapshot.month_key,
            entries.len(),
            started_at.elapsed().as_millis()
        );

        Ok(snapshot)
    }

    /// Lists previously generated weekly snapshots, newest first.
    pub fn list_weekly(&self) -> RepoResult<Vec<WeeklySnapshot>> {
        self.snapshots.list_weekly()
    }

    /// Lists previously generated monthly snapshots, newest first.
    pub fn list_monthly(&self) -> RepoResult<Vec<MonthlySnapshot>> {
        self.snapshots.list_monthly()
    }

    fn windowed_metrics(
        &self,
        window: &ReportWindow,
    ) -> RepoResult<(Vec<crate::model::entry::Entry>, MetricsBundle)> {
        let entries = self
            .entries
            .list_entries_between(window.start_datetime(), window.end_datetime())?;
        let followups = self
            .references
            .followups_due_between(window.start, window.end)?;
        let assets = self
            .references
            .assets_created_between(window.start, window.end)?;
        let deals = self
            .references
            .deals_updated_between(window.start_datetime(), window.end_datetime())?;
        let routines = self.references.active_routines()?;

        let metrics = collect_metrics(&entries, &followups, &assets, &deals, &routines, window);
        Ok((entries, metrics))
    }
}
