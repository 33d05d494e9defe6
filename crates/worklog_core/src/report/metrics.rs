//! Metric aggregation over windowed records.
//!
//! # Responsibility
//! - Compute the immutable metrics bundle for one reporting window.
//!
//! # Invariants
//! - Pure read/compute step: input slices are never mutated.
//! - Grouped metrics use ordered maps so downstream rendering stays
//!   deterministic.
//! - The cadence rate denominator is floored at 1; zero active routines
//!   report a rate of 0 rather than an error.

use crate::model::entry::{Entry, FollowUp, FollowUpStatus};
use crate::model::records::{Asset, Deal, Routine};
use crate::report::window::ReportWindow;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Numeric metrics for one reporting window. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsBundle {
    /// Entry counts grouped by open entry-type label.
    pub entry_counts_by_type: BTreeMap<String, i64>,
    /// Hours grouped by play label, rounded to 2 decimal places.
    pub hours_by_play: BTreeMap<String, f64>,
    /// Fraction of active routines completed in the window, in [0, 1].
    pub cadence_completion_rate: f64,
    pub accounts_touched: i64,
    pub deals_touched: i64,
    pub assets_created: i64,
    pub followups_created: i64,
    pub followups_closed: i64,
    /// Summed estimated value of deals updated in the window.
    pub influenced_value: f64,
    /// Summed estimated influenced-margin value of those deals.
    pub influenced_fm: f64,
}

/// Computes the metrics bundle for one window.
///
/// Callers supply records already scoped to the window by the storage
/// collaborator: `entries` by timestamp, `followups` by due date, `assets`
/// by creation date and `deals` by last-updated timestamp. `routines` is the
/// full set of active routines; their completion is evaluated against the
/// window here.
pub fn collect_metrics(
    entries: &[Entry],
    followups: &[FollowUp],
    assets: &[Asset],
    deals: &[Deal],
    routines: &[Routine],
    window: &ReportWindow,
) -> MetricsBundle {
    let mut entry_counts_by_type: BTreeMap<String, i64> = BTreeMap::new();
    let mut hours_by_play: BTreeMap<String, f64> = BTreeMap::new();
    for entry in entries {
        *entry_counts_by_type
            .entry(entry.entry_type.clone())
            .or_insert(0) += 1;
        *hours_by_play
            .entry(entry.play.label().to_string())
            .or_insert(0.0) += entry.duration_min as f64 / 60.0;
    }
    for hours in hours_by_play.values_mut() {
        *hours = round2(*hours);
    }

    let completed = routines
        .iter()
        .filter(|routine| {
            routine
                .last_completed_date
                .is_some_and(|day| window.contains_date(day))
        })
        .count();
    let cadence_completion_rate = round2(completed as f64 / routines.len().max(1) as f64);

    MetricsBundle {
        entry_counts_by_type,
        hours_by_play,
        cadence_completion_rate,
        accounts_touched: count_unique(entries.iter().map(|entry| entry.account_id)),
        deals_touched: count_unique(entries.iter().map(|entry| entry.deal_id)),
        assets_created: assets.len() as i64,
        followups_created: followups.len() as i64,
        followups_closed: followups
            .iter()
            .filter(|followup| followup.status == FollowUpStatus::Done)
            .count() as i64,
        influenced_value: deals.iter().map(|deal| deal.est_value.unwrap_or(0.0)).sum(),
        influenced_fm: deals.iter().map(|deal| deal.est_fm.unwrap_or(0.0)).sum(),
    }
}

/// Counts distinct non-null ids.
fn count_unique(ids: impl Iterator<Item = Option<Uuid>>) -> i64 {
    ids.flatten().collect::<BTreeSet<_>>().len() as i64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
