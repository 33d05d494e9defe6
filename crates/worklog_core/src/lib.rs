//! Core domain logic for the worklog activity tracker.
//! This crate is the single source of truth for classification and
//! reporting invariants.

pub mod classify;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod search;
pub mod service;

pub use classify::{
    classify_note, extract_followup, infer_intention_bucket, infer_outcomes, infer_play,
    infer_tags,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{
    Classification, Entry, EntryId, FollowUp, FollowUpDraft, FollowUpStatus, IntentionBucket,
    NoteInput, Play,
};
pub use model::records::{
    Account, Asset, Deal, MonthlySnapshot, Routine, WeeklySnapshot,
};
pub use repo::entry_repo::{EntryRepository, SqliteEntryRepository};
pub use repo::reference_repo::{ReferenceRepository, SqliteReferenceRepository};
pub use repo::snapshot_repo::{SnapshotRepository, SqliteSnapshotRepository};
pub use repo::{RepoError, RepoResult};
pub use report::metrics::{collect_metrics, MetricsBundle};
pub use report::narrative::{render_monthly, render_weekly, MonthlyNarrative, WeeklyNarrative};
pub use report::window::ReportWindow;
pub use search::{search_all, SearchMatches, SearchQuery};
pub use service::entry_service::{DealMove, EntryService, LoggedEntry, TodayOverview};
pub use service::report_service::ReportService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
