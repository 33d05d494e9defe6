//! Entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist classified entries and read them back by id or time window.
//!
//! # Invariants
//! - List collections (tags, stakeholders, outcomes) are stored as JSON text.
//! - Window listings are ordered by `timestamp ASC, id ASC` so downstream
//!   rendering stays deterministic.

use crate::model::entry::{Entry, EntryId, IntentionBucket, Play};
use crate::repo::{
    encode_datetime, encode_json, parse_datetime, parse_json, parse_opt_uuid, parse_uuid,
    RepoError, RepoResult,
};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

pub(crate) const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    timestamp,
    type,
    title,
    raw_note,
    play,
    tags,
    account_id,
    deal_id,
    duration_min,
    stakeholders,
    outcomes,
    intention_bucket,
    created_at
FROM entries";

/// Repository interface for classified entries.
pub trait EntryRepository {
    /// Persists one classified entry and returns its stable id.
    fn create_entry(&self, entry: &Entry) -> RepoResult<EntryId>;
    /// Gets one entry by stable id.
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>>;
    /// Lists entries whose timestamp falls in the inclusive range.
    fn list_entries_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepoResult<Vec<Entry>>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn create_entry(&self, entry: &Entry) -> RepoResult<EntryId> {
        self.conn.execute(
            "INSERT INTO entries (
                id,
                timestamp,
                type,
                title,
                raw_note,
                play,
                tags,
                account_id,
                deal_id,
                duration_min,
                stakeholders,
                outcomes,
                intention_bucket,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14);",
            params![
                entry.id.to_string(),
                encode_datetime(entry.timestamp),
                entry.entry_type.as_str(),
                entry.title.as_str(),
                entry.raw_note.as_str(),
                entry.play.label(),
                encode_json(&entry.tags, "entries.tags")?,
                entry.account_id.map(|id| id.to_string()),
                entry.deal_id.map(|id| id.to_string()),
                entry.duration_min,
                encode_json(&entry.stakeholders, "entries.stakeholders")?,
                encode_json(&entry.outcomes, "entries.outcomes")?,
                entry.intention_bucket.label(),
                encode_datetime(entry.created_at),
            ],
        )?;

        Ok(entry.id)
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(row)?));
        }

        Ok(None)
    }

    fn list_entries_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepoResult<Vec<Entry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL}
             WHERE timestamp >= ?1
               AND timestamp <= ?2
             ORDER BY timestamp ASC, id ASC;"
        ))?;
        let mut rows = stmt.query(params![encode_datetime(start), encode_datetime(end)])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }
}

pub(crate) fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let id_text: String = row.get("id")?;
    let timestamp_text: String = row.get("timestamp")?;
    let created_text: String = row.get("created_at")?;

    let play_text: String = row.get("play")?;
    let play = Play::from_label(&play_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid play value `{play_text}` in entries.play"))
    })?;

    let bucket_text: String = row.get("intention_bucket")?;
    let intention_bucket = IntentionBucket::from_label(&bucket_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid intention bucket `{bucket_text}` in entries.intention_bucket"
        ))
    })?;

    let tags_text: String = row.get("tags")?;
    let stakeholders_text: String = row.get("stakeholders")?;
    let outcomes_text: String = row.get("outcomes")?;

    Ok(Entry {
        id: parse_uuid(&id_text, "entries.id")?,
        timestamp: parse_datetime(&timestamp_text, "entries.timestamp")?,
        entry_type: row.get("type")?,
        title: row.get("title")?,
        raw_note: row.get("raw_note")?,
        play,
        tags: parse_json(&tags_text, "entries.tags")?,
        account_id: parse_opt_uuid(row.get("account_id")?, "entries.account_id")?,
        deal_id: parse_opt_uuid(row.get("deal_id")?, "entries.deal_id")?,
        duration_min: row.get("duration_min")?,
        stakeholders: parse_json(&stakeholders_text, "entries.stakeholders")?,
        outcomes: parse_json(&outcomes_text, "entries.outcomes")?,
        intention_bucket,
        created_at: parse_datetime(&created_text, "entries.created_at")?,
    })
}
