//! Periodic aggregation and narrative generation.
//!
//! # Responsibility
//! - Compute reporting windows and numeric metric bundles over classified
//!   records.
//! - Render deterministic weekly/monthly narrative artifacts.
//!
//! # Invariants
//! - Everything in this module is a pure computation over materialized
//!   values; no I/O, no mutation of inputs.
//! - Rendering iterates ordered structures only, so output is byte-identical
//!   for identical inputs.

pub mod metrics;
pub mod narrative;
pub mod window;
