//! Entry domain model and classification vocabularies.
//!
//! # Responsibility
//! - Define the classified entry record produced from free-text notes.
//! - Define the closed play/intention/follow-up vocabularies with their
//!   fallback variants.
//!
//! # Invariants
//! - `Play::Other` is the fallback when no keyword matches.
//! - `IntentionBucket` values keep their A..D priority order.
//! - Follow-up status transitions are owned by external callers; core code
//!   only creates `Open` obligations and reads the status back.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a logged entry.
pub type EntryId = Uuid;
/// Stable identifier for a follow-up obligation.
pub type FollowUpId = Uuid;

/// Closed classification of an activity's primary technical focus.
///
/// Labels mirror the reporting vocabulary; `Other` is the mandatory fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Play {
    #[serde(rename = "GCVE")]
    Gcve,
    #[serde(rename = "GDC")]
    Gdc,
    #[serde(rename = "GKE")]
    Gke,
    #[serde(rename = "Vertex")]
    Vertex,
    #[serde(rename = "FinOps")]
    FinOps,
    #[serde(rename = "AI Readiness")]
    AiReadiness,
    #[serde(rename = "Other")]
    Other,
}

impl Play {
    /// Returns the human-facing label used in narratives and storage.
    pub fn label(self) -> &'static str {
        match self {
            Self::Gcve => "GCVE",
            Self::Gdc => "GDC",
            Self::Gke => "GKE",
            Self::Vertex => "Vertex",
            Self::FinOps => "FinOps",
            Self::AiReadiness => "AI Readiness",
            Self::Other => "Other",
        }
    }

    /// Parses a persisted label back into the closed set.
    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "GCVE" => Some(Self::Gcve),
            "GDC" => Some(Self::Gdc),
            "GKE" => Some(Self::Gke),
            "Vertex" => Some(Self::Vertex),
            "FinOps" => Some(Self::FinOps),
            "AI Readiness" => Some(Self::AiReadiness),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Strategic purpose of an activity, highest (A) to lowest (D) match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentionBucket {
    A,
    B,
    C,
    D,
}

impl IntentionBucket {
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            _ => None,
        }
    }
}

/// Lifecycle state of a follow-up obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUpStatus {
    /// Created and not yet resolved.
    Open,
    /// Resolved by an external caller.
    Done,
}

impl FollowUpStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Done => "done",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// Raw note input before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInput {
    /// Open entry-type label, e.g. "meeting", "deal", "note".
    pub entry_type: String,
    pub title: String,
    pub raw_note: String,
    pub account_id: Option<Uuid>,
    pub deal_id: Option<Uuid>,
    pub duration_min: i64,
    pub stakeholders: Vec<String>,
}

/// Derived attributes for one note, produced by the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub play: Play,
    /// Deduplicated, lexicographically sorted.
    pub tags: Vec<String>,
    /// Deduplicated, lexicographically sorted, at most 5 entries.
    pub outcomes: Vec<String>,
    pub intention_bucket: IntentionBucket,
    /// Zero or one obligation per note, by design.
    pub followup: Option<FollowUpDraft>,
}

/// Follow-up obligation derived from note text, before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpDraft {
    /// Note text truncated to the title length cap.
    pub title: String,
    pub due_date: NaiveDate,
    pub status: FollowUpStatus,
}

/// Classified, persistable work entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub timestamp: NaiveDateTime,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub entry_type: String,
    pub title: String,
    pub raw_note: String,
    pub play: Play,
    pub tags: Vec<String>,
    pub account_id: Option<Uuid>,
    pub deal_id: Option<Uuid>,
    pub duration_min: i64,
    pub stakeholders: Vec<String>,
    pub outcomes: Vec<String>,
    pub intention_bucket: IntentionBucket,
    pub created_at: NaiveDateTime,
}

impl Entry {
    /// Assembles a persistable entry from raw input plus derived attributes.
    ///
    /// # Invariants
    /// - `timestamp` and `created_at` are caller-provided; core logic never
    ///   reads wall-clock time.
    pub fn from_classified(
        input: NoteInput,
        classification: &Classification,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            entry_type: input.entry_type,
            title: input.title,
            raw_note: input.raw_note,
            play: classification.play,
            tags: classification.tags.clone(),
            account_id: input.account_id,
            deal_id: input.deal_id,
            duration_min: input.duration_min,
            stakeholders: input.stakeholders,
            outcomes: classification.outcomes.clone(),
            intention_bucket: classification.intention_bucket,
            created_at: timestamp,
        }
    }
}

/// Persisted follow-up obligation linked to its source entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUp {
    pub id: FollowUpId,
    pub title: String,
    pub due_date: NaiveDate,
    pub status: FollowUpStatus,
    pub linked_entry_id: Option<Uuid>,
    pub linked_deal_id: Option<Uuid>,
}

impl FollowUp {
    /// Materializes a classifier draft into a persistable row.
    pub fn from_draft(
        draft: &FollowUpDraft,
        linked_entry_id: Option<Uuid>,
        linked_deal_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            due_date: draft.due_date,
            status: draft.status,
            linked_entry_id,
            linked_deal_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FollowUpStatus, IntentionBucket, Play};

    #[test]
    fn play_labels_round_trip() {
        for play in [
            Play::Gcve,
            Play::Gdc,
            Play::Gke,
            Play::Vertex,
            Play::FinOps,
            Play::AiReadiness,
            Play::Other,
        ] {
            assert_eq!(Play::from_label(play.label()), Some(play));
        }
        assert_eq!(Play::from_label("gcve"), None);
    }

    #[test]
    fn bucket_and_status_labels_round_trip() {
        assert_eq!(IntentionBucket::from_label("B"), Some(IntentionBucket::B));
        assert_eq!(IntentionBucket::from_label("E"), None);
        assert_eq!(
            FollowUpStatus::from_label("done"),
            Some(FollowUpStatus::Done)
        );
        assert_eq!(FollowUpStatus::from_label("closed"), None);
    }
}
