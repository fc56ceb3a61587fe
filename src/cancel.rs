//! Cooperative cancellation for long-running batch and synthesis jobs.
//!
//! A [`CancelToken`] is a cheap clonable flag. Producers (Ctrl-C handler,
//! UI, tests) call [`cancel`](CancelToken::cancel); the translation batcher
//! and the sync orchestrator check [`is_cancelled`](CancelToken::is_cancelled)
//! between batches / segments. Work already completed keeps its results;
//! unfinished items stay in their prior state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Clonable cancellation flag shared between the driver and its workers.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent; visible to all clones.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
