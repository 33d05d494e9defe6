//! Substring search over logged entries and deals.
//!
//! # Responsibility
//! - Provide keyword lookup across entry note text and deal names.
//! - Return typed matches with stable IDs.
//!
//! # Invariants
//! - Matching is a case-insensitive substring scan; user text is never
//!   interpreted as pattern syntax.
//! - Result ordering is deterministic (entries by timestamp, deals by name,
//!   id as tie-break).
//! - Blank queries and zero limits return empty results instead of scanning.

use crate::model::entry::Entry;
use crate::model::records::Deal;
use crate::repo::entry_repo::{parse_entry_row, ENTRY_SELECT_SQL};
use crate::repo::reference_repo::{parse_deal_row, DEAL_SELECT_SQL};
use crate::repo::RepoResult;
use rusqlite::{params, Connection};

/// Search options for substring lookup behavior.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// User query text, matched as a substring.
    pub text: String,
    /// Maximum number of matches per record kind.
    pub limit: u32,
}

impl SearchQuery {
    /// Creates a query with default pagination.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: 20,
        }
    }
}

/// Matches returned by [`search_all`], grouped by record kind.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatches {
    /// Entries whose raw note contains the query text.
    pub entries: Vec<Entry>,
    /// Deals whose name contains the query text.
    pub deals: Vec<Deal>,
}

/// Searches entry notes and deal names for the query text.
///
/// Returns empty matches for blank queries.
pub fn search_all(conn: &Connection, query: &SearchQuery) -> RepoResult<SearchMatches> {
    let text = query.text.trim();
    if text.is_empty() || query.limit == 0 {
        return Ok(SearchMatches {
            entries: Vec::new(),
            deals: Vec::new(),
        });
    }

    let pattern = format!("%{}%", escape_like_term(text));
    let limit = i64::from(query.limit);

    let mut stmt = conn.prepare(&format!(
        "{ENTRY_SELECT_SQL}
         WHERE raw_note LIKE ?1 ESCAPE '\\'
         ORDER BY timestamp ASC, id ASC
         LIMIT ?2;"
    ))?;
    let mut rows = stmt.query(params![pattern, limit])?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next()? {
        entries.push(parse_entry_row(row)?);
    }

    let mut stmt = conn.prepare(&format!(
        "{DEAL_SELECT_SQL}
         WHERE name LIKE ?1 ESCAPE '\\'
         ORDER BY name ASC, id ASC
         LIMIT ?2;"
    ))?;
    let mut rows = stmt.query(params![pattern, limit])?;
    let mut deals = Vec::new();
    while let Some(row) = rows.next()? {
        deals.push(parse_deal_row(row)?);
    }

    Ok(SearchMatches { entries, deals })
}

/// Escapes LIKE wildcard characters so query text matches literally.
fn escape_like_term(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::escape_like_term;

    #[test]
    fn escape_neutralizes_like_wildcards() {
        assert_eq!(escape_like_term("100%"), "100\\%");
        assert_eq!(escape_like_term("a_b"), "a\\_b");
        assert_eq!(escape_like_term("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like_term("plain"), "plain");
    }
}
