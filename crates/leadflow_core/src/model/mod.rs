//! Lead domain model.
//!
//! # Responsibility
//! - Define the canonical lead record tracked on the pipeline board.
//! - Keep pipeline status and priority vocabularies in one place.
//!
//! # Invariants
//! - Every lead is identified by a stable `LeadId`.
//! - Status values form the fixed four-stage pipeline.

pub mod lead;
