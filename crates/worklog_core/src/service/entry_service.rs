//! Entry logging use-case service.
//!
//! # Responsibility
//! - Turn raw note input into a classified, persisted entry.
//! - Materialize the zero-or-one derived follow-up obligation as an open row
//!   linked to the entry and its deal.
//! - Record deal stage moves together with their derived audit entry.
//! - Serve the small "today" dashboard summary.
//!
//! # Invariants
//! - Classification happens exactly once per logged note, before any write.
//! - The reference timestamp is caller-provided for deterministic behavior.

use crate::classify::classify_note;
use crate::model::entry::{Entry, FollowUp, IntentionBucket, NoteInput, Play};
use crate::model::records::{Deal, DealId};
use crate::repo::entry_repo::EntryRepository;
use crate::repo::reference_repo::ReferenceRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use uuid::Uuid;

/// Fixed duration charged to a derived "Deal moved" entry.
const DEAL_MOVE_DURATION_MIN: i64 = 5;

/// Result of logging one note: the stored entry plus its follow-up, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedEntry {
    pub entry: Entry,
    pub followup: Option<FollowUp>,
}

/// Result of moving a deal to a new stage: the updated deal plus the derived
/// audit entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DealMove {
    pub deal: Deal,
    pub entry: Entry,
}

/// Daily dashboard summary over today's entries and near-term obligations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodayOverview {
    pub time_logged_min: i64,
    pub entries: usize,
    pub accounts_touched: i64,
    pub deals_touched: i64,
    /// Open follow-ups due by the end of the current week.
    pub followups_due: usize,
}

/// Use-case service for logging and inspecting entries.
pub struct EntryService<E: EntryRepository, R: ReferenceRepository> {
    entries: E,
    references: R,
}

impl<E: EntryRepository, R: ReferenceRepository> EntryService<E, R> {
    pub fn new(entries: E, references: R) -> Self {
        Self {
            entries,
            references,
        }
    }

    /// Classifies and persists one note at the given reference timestamp.
    ///
    /// # Contract
    /// - The classifier's follow-up draft (if any) is stored as an `open`
    ///   obligation linked to the new entry and its deal.
    /// - Returns the persisted entry and follow-up.
    pub fn log_entry(&self, input: NoteInput, now: NaiveDateTime) -> RepoResult<LoggedEntry> {
        let classification = classify_note(&input, now.date());
        let entry = Entry::from_classified(input, &classification, now);
        self.entries.create_entry(&entry)?;

        let followup = match classification.followup.as_ref() {
            Some(draft) => {
                let row = FollowUp::from_draft(draft, Some(entry.id), entry.deal_id);
                self.references.create_followup(&row)?;
                Some(row)
            }
            None => None,
        };

        info!(
            "event=entry_logged module=service status=ok play={} bucket={} tags={} followup={}",
            entry.play.label(),
            entry.intention_bucket.label(),
            entry.tags.len(),
            followup.is_some()
        );

        Ok(LoggedEntry { entry, followup })
    }

    /// Moves a deal to a new stage at the given reference timestamp.
    ///
    /// # Contract
    /// - The deal's `updated_at` is bumped to `now`, so the move lands in the
    ///   influenced-pipeline window of the covering report.
    /// - A fixed "Deal moved" entry recording the transition is persisted,
    ///   linked to the deal and its account.
    pub fn update_deal_stage(
        &self,
        deal_id: DealId,
        new_stage: &str,
        now: NaiveDateTime,
    ) -> RepoResult<DealMove> {
        let mut deal = self
            .references
            .get_deal(deal_id)?
            .ok_or(RepoError::NotFound(deal_id))?;
        let previous_stage = std::mem::replace(&mut deal.stage, new_stage.to_string());
        deal.updated_at = now;
        self.references.set_deal_stage(deal_id, new_stage, now)?;

        let entry = Entry {
            id: Uuid::new_v4(),
            timestamp: now,
            entry_type: "deal".to_string(),
            title: "Deal moved".to_string(),
            raw_note: format!("Deal moved: {previous_stage} -> {new_stage}"),
            play: Play::Other,
            tags: Vec::new(),
            account_id: Some(deal.account_id),
            deal_id: Some(deal.id),
            duration_min: DEAL_MOVE_DURATION_MIN,
            stakeholders: Vec::new(),
            outcomes: Vec::new(),
            intention_bucket: IntentionBucket::D,
            created_at: now,
        };
        self.entries.create_entry(&entry)?;

        info!(
            "event=deal_stage_moved module=service status=ok from={} to={}",
            previous_stage, new_stage
        );

        Ok(DealMove { deal, entry })
    }

    /// Summarizes today's logged work and the follow-ups due this week.
    pub fn today_overview(&self, today: NaiveDate) -> RepoResult<TodayOverview> {
        let day_window = crate::report::window::ReportWindow {
            start: today,
            end: today,
        };
        let entries = self
            .entries
            .list_entries_between(day_window.start_datetime(), day_window.end_datetime())?;
        let week = crate::report::window::ReportWindow::weekly_for(today);
        let due = self.references.open_followups_due_by(week.end)?;

        let accounts: std::collections::BTreeSet<_> =
            entries.iter().filter_map(|entry| entry.account_id).collect();
        let deals: std::collections::BTreeSet<_> =
            entries.iter().filter_map(|entry| entry.deal_id).collect();

        Ok(TodayOverview {
            time_logged_min: entries.iter().map(|entry| entry.duration_min).sum(),
            entries: entries.len(),
            accounts_touched: accounts.len() as i64,
            deals_touched: deals.len() as i64,
            followups_due: due.len(),
        })
    }
}
