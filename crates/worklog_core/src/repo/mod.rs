//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for entries, reference
//!   records and report snapshots.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Date-range predicates are inclusive on both boundaries.
//! - Read paths reject invalid persisted state (`InvalidData`) instead of
//!   masking it.

use crate::db::DbError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod entry_repo;
pub mod reference_repo;
pub mod snapshot_repo;

/// Storage formats for calendar dates and timestamps. ISO-8601 text keeps
/// SQL range predicates lexicographically correct.
pub(crate) const DATE_FMT: &str = "%Y-%m-%d";
pub(crate) const DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(Uuid),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn parse_opt_uuid(value: Option<String>, column: &str) -> RepoResult<Option<Uuid>> {
    value
        .as_deref()
        .map(|text| parse_uuid(text, column))
        .transpose()
}

pub(crate) fn parse_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FMT)
        .map_err(|_| RepoError::InvalidData(format!("invalid date value `{value}` in {column}")))
}

pub(crate) fn parse_opt_date(value: Option<String>, column: &str) -> RepoResult<Option<NaiveDate>> {
    value
        .as_deref()
        .map(|text| parse_date(text, column))
        .transpose()
}

pub(crate) fn parse_datetime(value: &str, column: &str) -> RepoResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FMT).map_err(|_| {
        RepoError::InvalidData(format!("invalid timestamp value `{value}` in {column}"))
    })
}

pub(crate) fn encode_date(value: NaiveDate) -> String {
    value.format(DATE_FMT).to_string()
}

pub(crate) fn encode_datetime(value: NaiveDateTime) -> String {
    value.format(DATETIME_FMT).to_string()
}

pub(crate) fn encode_json<T: Serialize>(value: &T, column: &str) -> RepoResult<String> {
    serde_json::to_string(value)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode {column}: {err}")))
}

pub(crate) fn parse_json<T: DeserializeOwned>(value: &str, column: &str) -> RepoResult<T> {
    serde_json::from_str(value)
        .map_err(|err| RepoError::InvalidData(format!("invalid json in {column}: {err}")))
}
