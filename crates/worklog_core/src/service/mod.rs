//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate classifier, aggregator and repository calls into use-case
//!   level APIs.
//! - Keep transport/export layers decoupled from storage details.
//!
//! # Invariants
//! - Every service API takes an explicit reference timestamp; nothing below
//!   this layer reads wall-clock time.

pub mod entry_service;
pub mod report_service;
