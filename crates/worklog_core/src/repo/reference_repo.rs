//! Reference-record repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist accounts, deals, assets, routines and follow-up obligations.
//! - Serve the inclusive window queries the aggregator consumes.
//!
//! # Invariants
//! - Window queries never mutate records; the only mutations this layer owns
//!   are `set_followup_status` and `set_deal_stage`.
//! - Deal listings use explicit ORDER BY so result order is reproducible.

use crate::model::entry::{FollowUp, FollowUpId, FollowUpStatus};
use crate::model::records::{Account, AccountId, Asset, AssetId, Deal, DealId, Routine, RoutineId};
use crate::repo::{
    encode_date, encode_datetime, parse_date, parse_datetime, parse_opt_date, parse_opt_uuid,
    parse_uuid, RepoError, RepoResult,
};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, Row};

pub(crate) const DEAL_SELECT_SQL: &str = "SELECT
    id,
    account_id,
    name,
    play_type,
    stage,
    est_value,
    est_fm,
    next_step,
    next_step_date,
    updated_at
FROM deals";

const FOLLOWUP_SELECT_SQL: &str = "SELECT
    id,
    title,
    due_date,
    status,
    linked_entry_id,
    linked_deal_id
FROM followups";

/// Repository interface for reference records and follow-up rows.
pub trait ReferenceRepository {
    fn create_account(&self, account: &Account) -> RepoResult<AccountId>;
    fn create_deal(&self, deal: &Deal) -> RepoResult<DealId>;
    fn create_asset(&self, asset: &Asset) -> RepoResult<AssetId>;
    fn create_routine(&self, routine: &Routine) -> RepoResult<RoutineId>;
    fn create_followup(&self, followup: &FollowUp) -> RepoResult<FollowUpId>;

    /// Gets one deal by stable id.
    fn get_deal(&self, id: DealId) -> RepoResult<Option<Deal>>;
    /// Moves one deal to a new stage, bumping its last-updated timestamp.
    fn set_deal_stage(
        &self,
        id: DealId,
        stage: &str,
        updated_at: NaiveDateTime,
    ) -> RepoResult<()>;

    /// Transitions one follow-up's status.
    fn set_followup_status(&self, id: FollowUpId, status: FollowUpStatus) -> RepoResult<()>;

    /// Follow-ups whose due date falls in the inclusive range.
    fn followups_due_between(&self, start: NaiveDate, end: NaiveDate)
        -> RepoResult<Vec<FollowUp>>;
    /// Open follow-ups due on or before `due_end`.
    fn open_followups_due_by(&self, due_end: NaiveDate) -> RepoResult<Vec<FollowUp>>;
    /// Assets whose creation date falls in the inclusive range.
    fn assets_created_between(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<Vec<Asset>>;
    /// Deals whose last-updated timestamp falls in the inclusive range.
    fn deals_updated_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepoResult<Vec<Deal>>;
    /// Deals whose next-step date falls in the inclusive range, ordered by
    /// next-step date then id.
    fn deals_next_step_between(&self, start: NaiveDate, end: NaiveDate)
        -> RepoResult<Vec<Deal>>;
    /// All routines currently flagged active.
    fn active_routines(&self) -> RepoResult<Vec<Routine>>;
}

/// SQLite-backed reference repository.
pub struct SqliteReferenceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReferenceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReferenceRepository for SqliteReferenceRepository<'_> {
    fn create_account(&self, account: &Account) -> RepoResult<AccountId> {
        self.conn.execute(
            "INSERT INTO accounts (id, name, industry, segment)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                account.id.to_string(),
                account.name.as_str(),
                account.industry.as_str(),
                account.segment.as_str(),
            ],
        )?;

        Ok(account.id)
    }

    fn create_deal(&self, deal: &Deal) -> RepoResult<DealId> {
        self.conn.execute(
            "INSERT INTO deals (
                id,
                account_id,
                name,
                play_type,
                stage,
                est_value,
                est_fm,
                next_step,
                next_step_date,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                deal.id.to_string(),
                deal.account_id.to_string(),
                deal.name.as_str(),
                deal.play_type.as_str(),
                deal.stage.as_str(),
                deal.est_value,
                deal.est_fm,
                deal.next_step.as_str(),
                deal.next_step_date.map(encode_date),
                encode_datetime(deal.updated_at),
            ],
        )?;

        Ok(deal.id)
    }

    fn create_asset(&self, asset: &Asset) -> RepoResult<AssetId> {
        self.conn.execute(
            "INSERT INTO assets (
                id,
                date,
                asset_type,
                title,
                linked_account_id,
                linked_deal_id,
                effort_min
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                asset.id.to_string(),
                encode_date(asset.date),
                asset.asset_type.as_str(),
                asset.title.as_str(),
                asset.linked_account_id.map(|id| id.to_string()),
                asset.linked_deal_id.map(|id| id.to_string()),
                asset.effort_min,
            ],
        )?;

        Ok(asset.id)
    }

    fn create_routine(&self, routine: &Routine) -> RepoResult<RoutineId> {
        self.conn.execute(
            "INSERT INTO routines (
                id,
                routine_type,
                frequency,
                default_day,
                last_completed_date,
                is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                routine.id.to_string(),
                routine.routine_type.as_str(),
                routine.frequency.as_str(),
                routine.default_day.as_str(),
                routine.last_completed_date.map(encode_date),
                i64::from(routine.is_active),
            ],
        )?;

        Ok(routine.id)
    }

    fn create_followup(&self, followup: &FollowUp) -> RepoResult<FollowUpId> {
        self.conn.execute(
            "INSERT INTO followups (
                id,
                title,
                due_date,
                status,
                linked_entry_id,
                linked_deal_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                followup.id.to_string(),
                followup.title.as_str(),
                encode_date(followup.due_date),
                followup.status.label(),
                followup.linked_entry_id.map(|id| id.to_string()),
                followup.linked_deal_id.map(|id| id.to_string()),
            ],
        )?;

        Ok(followup.id)
    }

    fn get_deal(&self, id: DealId) -> RepoResult<Option<Deal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEAL_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_deal_row(row)?));
        }

        Ok(None)
    }

    fn set_deal_stage(
        &self,
        id: DealId,
        stage: &str,
        updated_at: NaiveDateTime,
    ) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE deals SET stage = ?2, updated_at = ?3 WHERE id = ?1;",
            params![id.to_string(), stage, encode_datetime(updated_at)],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn set_followup_status(&self, id: FollowUpId, status: FollowUpStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE followups SET status = ?2 WHERE id = ?1;",
            params![id.to_string(), status.label()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn followups_due_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<FollowUp>> {
        let mut stmt = self.conn.prepare(&format!(
            "{FOLLOWUP_SELECT_SQL}
             WHERE due_date >= ?1
               AND due_date <= ?2
             ORDER BY due_date ASC, id ASC;"
        ))?;
        let mut rows = stmt.query(params![encode_date(start), encode_date(end)])?;
        let mut followups = Vec::new();
        while let Some(row) = rows.next()? {
            followups.push(parse_followup_row(row)?);
        }

        Ok(followups)
    }

    fn open_followups_due_by(&self, due_end: NaiveDate) -> RepoResult<Vec<FollowUp>> {
        let mut stmt = self.conn.prepare(&format!(
            "{FOLLOWUP_SELECT_SQL}
             WHERE status = 'open'
               AND due_date <= ?1
             ORDER BY due_date ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([encode_date(due_end)])?;
        let mut followups = Vec::new();
        while let Some(row) = rows.next()? {
            followups.push(parse_followup_row(row)?);
        }

        Ok(followups)
    }

    fn assets_created_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<Asset>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                date,
                asset_type,
                title,
                linked_account_id,
                linked_deal_id,
                effort_min
             FROM assets
             WHERE date >= ?1
               AND date <= ?2
             ORDER BY date ASC, id ASC;",
        )?;
        let mut rows = stmt.query(params![encode_date(start), encode_date(end)])?;
        let mut assets = Vec::new();
        while let Some(row) = rows.next()? {
            assets.push(parse_asset_row(row)?);
        }

        Ok(assets)
    }

    fn deals_updated_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepoResult<Vec<Deal>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DEAL_SELECT_SQL}
             WHERE updated_at >= ?1
               AND updated_at <= ?2
             ORDER BY updated_at ASC, id ASC;"
        ))?;
        let mut rows = stmt.query(params![encode_datetime(start), encode_datetime(end)])?;
        let mut deals = Vec::new();
        while let Some(row) = rows.next()? {
            deals.push(parse_deal_row(row)?);
        }

        Ok(deals)
    }

    fn deals_next_step_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<Deal>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DEAL_SELECT_SQL}
             WHERE next_step_date >= ?1
               AND next_step_date <= ?2
             ORDER BY next_step_date ASC, id ASC;"
        ))?;
        let mut rows = stmt.query(params![encode_date(start), encode_date(end)])?;
        let mut deals = Vec::new();
        while let Some(row) = rows.next()? {
            deals.push(parse_deal_row(row)?);
        }

        Ok(deals)
    }

    fn active_routines(&self) -> RepoResult<Vec<Routine>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                routine_type,
                frequency,
                default_day,
                last_completed_date,
                is_active
             FROM routines
             WHERE is_active = 1
             ORDER BY routine_type ASC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut routines = Vec::new();
        while let Some(row) = rows.next()? {
            routines.push(parse_routine_row(row)?);
        }

        Ok(routines)
    }
}

fn parse_followup_row(row: &Row<'_>) -> RepoResult<FollowUp> {
    let id_text: String = row.get("id")?;
    let due_text: String = row.get("due_date")?;
    let status_text: String = row.get("status")?;
    let status = FollowUpStatus::from_label(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid follow-up status `{status_text}` in followups.status"
        ))
    })?;

    Ok(FollowUp {
        id: parse_uuid(&id_text, "followups.id")?,
        title: row.get("title")?,
        due_date: parse_date(&due_text, "followups.due_date")?,
        status,
        linked_entry_id: parse_opt_uuid(row.get("linked_entry_id")?, "followups.linked_entry_id")?,
        linked_deal_id: parse_opt_uuid(row.get("linked_deal_id")?, "followups.linked_deal_id")?,
    })
}

fn parse_asset_row(row: &Row<'_>) -> RepoResult<Asset> {
    let id_text: String = row.get("id")?;
    let date_text: String = row.get("date")?;

    Ok(Asset {
        id: parse_uuid(&id_text, "assets.id")?,
        date: parse_date(&date_text, "assets.date")?,
        asset_type: row.get("asset_type")?,
        title: row.get("title")?,
        linked_account_id: parse_opt_uuid(row.get("linked_account_id")?, "assets.linked_account_id")?,
        linked_deal_id: parse_opt_uuid(row.get("linked_deal_id")?, "assets.linked_deal_id")?,
        effort_min: row.get("effort_min")?,
    })
}

pub(crate) fn parse_deal_row(row: &Row<'_>) -> RepoResult<Deal> {
    let id_text: String = row.get("id")?;
    let account_text: String = row.get("account_id")?;
    let updated_text: String = row.get("updated_at")?;

    Ok(Deal {
        id: parse_uuid(&id_text, "deals.id")?,
        account_id: parse_uuid(&account_text, "deals.account_id")?,
        name: row.get("name")?,
        play_type: row.get("play_type")?,
        stage: row.get("stage")?,
        est_value: row.get("est_value")?,
        est_fm: row.get("est_fm")?,
        next_step: row.get("next_step")?,
        next_step_date: parse_opt_date(row.get("next_step_date")?, "deals.next_step_date")?,
        updated_at: parse_datetime(&updated_text, "deals.updated_at")?,
    })
}

fn parse_routine_row(row: &Row<'_>) -> RepoResult<Routine> {
    let id_text: String = row.get("id")?;
    let is_active = match row.get::<_, i64>("is_active")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_active value `{other}` in routines.is_active"
            )));
        }
    };

    Ok(Routine {
        id: parse_uuid(&id_text, "routines.id")?,
        routine_type: row.get("routine_type")?,
        frequency: row.get("frequency")?,
        default_day: row.get("default_day")?,
        last_completed_date: parse_opt_date(
            row.get("last_completed_date")?,
            "routines.last_completed_date",
        )?,
        is_active,
    })
}
