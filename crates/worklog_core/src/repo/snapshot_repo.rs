//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Append and list immutable weekly/monthly report snapshots.
//!
//! # Invariants
//! - Snapshots are append-only; no update or delete path exists.
//! - The metrics bundle is persisted as a JSON payload and must round-trip
//!   losslessly.

use crate::model::records::{MonthlySnapshot, SnapshotId, WeeklySnapshot};
use crate::repo::{
    encode_date, encode_datetime, encode_json, parse_date, parse_datetime, parse_json, parse_uuid,
    RepoResult,
};
use rusqlite::{params, Connection, Row};

/// Repository interface for report snapshots.
pub trait SnapshotRepository {
    /// Appends one weekly snapshot and returns its stable id.
    fn append_weekly(&self, snapshot: &WeeklySnapshot) -> RepoResult<SnapshotId>;
    /// Appends one monthly snapshot and returns its stable id.
    fn append_monthly(&self, snapshot: &MonthlySnapshot) -> RepoResult<SnapshotId>;
    /// Lists weekly snapshots, most recently generated first.
    fn list_weekly(&self) -> RepoResult<Vec<WeeklySnapshot>>;
    /// Lists monthly snapshots, most recently generated first.
    fn list_monthly(&self) -> RepoResult<Vec<MonthlySnapshot>>;
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn append_weekly(&self, snapshot: &WeeklySnapshot) -> RepoResult<SnapshotId> {
        self.conn.execute(
            "INSERT INTO snapshots_weekly (
                id,
                week_start,
                teams_text,
                email_subject,
                email_body,
                slide_bullets,
                metrics_json,
                generated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                snapshot.id.to_string(),
                encode_date(snapshot.week_start),
                snapshot.teams_text.as_str(),
                snapshot.email_subject.as_str(),
                snapshot.email_body.as_str(),
                snapshot.slide_bullets.as_str(),
                encode_json(&snapshot.metrics, "snapshots_weekly.metrics_json")?,
                encode_datetime(snapshot.generated_at),
            ],
        )?;

        Ok(snapshot.id)
    }

    fn append_monthly(&self, snapshot: &MonthlySnapshot) -> RepoResult<SnapshotId> {
        self.conn.execute(
            "INSERT INTO snapshots_monthly (
                id,
                month_key,
                teams_text,
                email_subject,
                email_body,
                slide_bullets,
                metrics_json,
                generated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                snapshot.id.to_string(),
                snapshot.month_key.as_str(),
                snapshot.teams_text.as_str(),
                snapshot.email_subject.as_str(),
                snapshot.email_body.as_str(),
                snapshot.slide_bullets.as_str(),
                encode_json(&snapshot.metrics, "snapshots_monthly.metrics_json")?,
                encode_datetime(snapshot.generated_at),
            ],
        )?;

        Ok(snapshot.id)
    }

    fn list_weekly(&self) -> RepoResult<Vec<WeeklySnapshot>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                week_start,
                teams_text,
                email_subject,
                email_body,
                slide_bullets,
                metrics_json,
                generated_at
             FROM snapshots_weekly
             ORDER BY generated_at DESC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut snapshots = Vec::new();
        while let Some(row) = rows.next()? {
            snapshots.push(parse_weekly_row(row)?);
        }

        Ok(snapshots)
    }

    fn list_monthly(&self) -> RepoResult<Vec<MonthlySnapshot>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                month_key,
                teams_text,
                email_subject,
                email_body,
                slide_bullets,
                metrics_json,
                generated_at
             FROM snapshots_monthly
             ORDER BY generated_at DESC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut snapshots = Vec::new();
        while let Some(row) = rows.next()? {
            snapshots.push(parse_monthly_row(row)?);
        }

        Ok(snapshots)
    }
}

fn parse_weekly_row(row: &Row<'_>) -> RepoResult<WeeklySnapshot> {
    let id_text: String = row.get("id")?;
    let week_start_text: String = row.get("week_start")?;
    let metrics_text: String = row.get("metrics_json")?;
    let generated_text: String = row.get("generated_at")?;

    Ok(WeeklySnapshot {
        id: parse_uuid(&id_text, "snapshots_weekly.id")?,
        week_start: parse_date(&week_start_text, "snapshots_weekly.week_start")?,
        teams_text: row.get("teams_text")?,
        email_subject: row.get("email_subject")?,
        email_body: row.get("email_body")?,
        slide_bullets: row.get("slide_bullets")?,
        metrics: parse_json(&metrics_text, "snapshots_weekly.metrics_json")?,
        generated_at: parse_datetime(&generated_text, "snapshots_weekly.generated_at")?,
    })
}

fn parse_monthly_row(row: &Row<'_>) -> RepoResult<MonthlySnapshot> {
    let id_text: String = row.get("id")?;
    let metrics_text: String = row.get("metrics_json")?;
    let generated_text: String = row.get("generated_at")?;

    Ok(MonthlySnapshot {
        id: parse_uuid(&id_text, "snapshots_monthly.id")?,
        month_key: row.get("month_key")?,
        teams_text: row.get("teams_text")?,
        email_subject: row.get("email_subject")?,
        email_body: row.get("email_body")?,
        slide_bullets: row.get("slide_bullets")?,
        metrics: parse_json(&metrics_text, "snapshots_monthly.metrics_json")?,
        generated_at: parse_datetime(&generated_text, "snapshots_monthly.generated_at")?,
    })
}
