//! Domain model for worklog entries and reporting records.
//!
//! # Responsibility
//! - Define canonical data structures shared by classification, aggregation
//!   and narrative rendering.
//! - Keep closed vocabularies (play, intention bucket, follow-up status) as
//!   enums with explicit fallback/default variants.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Entry type stays an open string; it is matched against, never validated.

pub mod entry;
pub mod records;
