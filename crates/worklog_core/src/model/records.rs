//! Reference records consumed by the aggregator and snapshot artifacts.
//!
//! # Responsibility
//! - Define account/deal/asset/routine shapes read during reporting.
//! - Define the immutable weekly/monthly snapshot artifacts.
//!
//! # Invariants
//! - Snapshots are append-only; nothing in core mutates one after creation.
//! - The aggregator treats all reference records as read-only.

use crate::report::metrics::MetricsBundle;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AccountId = Uuid;
pub type DealId = Uuid;
pub type AssetId = Uuid;
pub type RoutineId = Uuid;
pub type SnapshotId = Uuid;

/// Customer account touched by logged work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub industry: String,
    pub segment: String,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        industry: impl Into<String>,
        segment: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            industry: industry.into(),
            segment: segment.into(),
        }
    }
}

/// Sales opportunity with pipeline value estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub account_id: AccountId,
    pub name: String,
    pub play_type: String,
    pub stage: String,
    /// Estimated total value; missing values count as zero in metrics.
    pub est_value: Option<f64>,
    /// Estimated influenced-margin value; missing values count as zero.
    pub est_fm: Option<f64>,
    pub next_step: String,
    pub next_step_date: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}

/// Produced collateral (deck, one-pager, datasheet, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub date: NaiveDate,
    pub asset_type: String,
    pub title: String,
    pub linked_account_id: Option<AccountId>,
    pub linked_deal_id: Option<DealId>,
    pub effort_min: i64,
}

/// Recurring cadence commitment tracked for completion rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub id: RoutineId,
    pub routine_type: String,
    pub frequency: String,
    pub default_day: String,
    pub last_completed_date: Option<NaiveDate>,
    pub is_active: bool,
}

/// Immutable weekly report artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySnapshot {
    pub id: SnapshotId,
    /// Monday of the reported week.
    pub week_start: NaiveDate,
    pub teams_text: String,
    pub email_subject: String,
    pub email_body: String,
    pub slide_bullets: String,
    pub metrics: MetricsBundle,
    pub generated_at: NaiveDateTime,
}

/// Immutable monthly report artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    pub id: SnapshotId,
    /// Month key formatted as `YYYY-MM`.
    pub month_key: String,
    pub teams_text: String,
    pub email_subject: String,
    pub email_body: String,
    pub slide_bullets: String,
    pub metrics: MetricsBundle,
    pub generated_at: NaiveDateTime,
}
