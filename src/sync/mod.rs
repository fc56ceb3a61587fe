//! Synchronization — drive synthesis and duration fitting per segment.
//!
//! This module provides:
//! * [`SyncOrchestrator`] — fans segments out over a bounded worker pool,
//!   isolating per-segment failures and honouring cancellation.
//! * [`compute_slot`] / [`compute_slots`] — the time window each dubbed
//!   clip must fit within, derived from segment boundaries.
//! * [`ProgressUpdate`] / [`SyncReport`] — observational progress and the
//!   run summary.

pub mod orchestrator;
pub mod slot;

pub use orchestrator::{ProgressUpdate, SyncOrchestrator, SyncReport};
pub use slot::{compute_slot, compute_slots};
