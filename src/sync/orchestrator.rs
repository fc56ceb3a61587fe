//! Synchronization orchestrator — synthesize and fit every segment.
//!
//! For each segment, in list order: pick the text to speak (translation,
//! else source text), synthesize it with the active provider, and fit the
//! clip into the segment's time slot. Work fans out over a bounded worker
//! pool; each worker owns exactly one segment's result, and slots are
//! precomputed from the immutable boundaries, so no segment is ever written
//! by two tasks.
//!
//! A failed synthesis leaves that one segment silent and the run moving —
//! the returned list always keeps its full length and order. `Done` with an
//! empty `audio_path` is a valid terminal state, not a run error.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

use crate::audio::{DurationFitter, FitOutcome};
use crate::cancel::CancelToken;
use crate::config::{SyncConfig, TtsConfig};
use crate::segment::Segment;
use crate::tts::TtsProvider;

use super::slot::compute_slots;

// ---------------------------------------------------------------------------
// ProgressUpdate / SyncReport
// ---------------------------------------------------------------------------

/// Observational progress event, emitted after each segment completes.
/// Dropping the receiver has no effect on the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Segments finished so far (succeeded or failed).
    pub completed: usize,
    /// Total segments in the list.
    pub total: usize,
}

/// Outcome of a synchronization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Length of the segment list.
    pub total: usize,
    /// Segments that now carry a fitted clip.
    pub synthesized: usize,
    /// Segments with nothing to speak (empty text and translation).
    pub skipped: usize,
    /// Segments whose synthesis failed; their `audio_path` stays empty.
    pub failed: usize,
    /// `true` when the run stopped early on a cancellation request.
    /// Finished segments keep their clips; the rest stay untouched.
    pub cancelled: bool,
}

enum TaskOutcome {
    Fitted(FitOutcome),
    Failed,
    /// Cancellation landed before this worker started; segment untouched.
    Unstarted,
}

// ---------------------------------------------------------------------------
// SyncOrchestrator
// ---------------------------------------------------------------------------

/// Drives provider + fitter across a segment list.
pub struct SyncOrchestrator {
    provider: Arc<dyn TtsProvider>,
    fitter: Arc<DurationFitter>,
    voice: String,
    speed: f32,
    concurrency: usize,
    slot_floor_secs: f64,
    slot_buffer_secs: f64,
}

impl SyncOrchestrator {
    pub fn new(
        provider: Arc<dyn TtsProvider>,
        fitter: Arc<DurationFitter>,
        tts: &TtsConfig,
        sync: &SyncConfig,
    ) -> Self {
        Self {
            provider,
            fitter,
            voice: tts.voice.clone(),
            speed: tts.speed,
            concurrency: tts.concurrency.max(1),
            slot_floor_secs: sync.slot_floor_secs,
            slot_buffer_secs: sync.slot_buffer_secs,
        }
    }

    /// Synthesize and fit every speakable segment, writing `audio_path` in
    /// place. Never fails; degraded segments are reported, not raised.
    pub async fn run(
        &self,
        segments: &mut [Segment],
        cancel: &CancelToken,
        progress: Option<mpsc::Sender<ProgressUpdate>>,
    ) -> SyncReport {
        let total = segments.len();
        let mut report = SyncReport {
            total,
            ..SyncReport::default()
        };

        // One read-only pass over the immutable boundaries; workers index
        // into this instead of touching neighbouring segments.
        let slots = compute_slots(segments, self.slot_floor_secs, self.slot_buffer_secs);

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks: JoinSet<(usize, TaskOutcome)> = JoinSet::new();

        for (index, seg) in segments.iter().enumerate() {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let Some(text) = seg.speakable_text() else {
                log::debug!("segment {}: nothing to speak, skipping", seg.id);
                report.skipped += 1;
                continue;
            };

            let text = text.to_string();
            let slot = slots[index];
            let seg_id = seg.id;
            let voice = self.voice.clone();
            let speed = self.speed;
            let provider = Arc::clone(&self.provider);
            let fitter = Arc::clone(&self.fitter);
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return (index, TaskOutcome::Unstarted),
                };
                if cancel.is_cancelled() {
                    return (index, TaskOutcome::Unstarted);
                }

                let clip = match provider.synthesize(&text, &voice, speed).await {
                    Ok(clip) => clip,
                    Err(e) => {
                        log::warn!("segment {seg_id}: synthesis failed: {e}");
                        return (index, TaskOutcome::Failed);
                    }
                };

                let outcome = fitter.fit(clip, slot).await;
                log::debug!(
                    "segment {seg_id}: {:?}, {:.2}s into a {:.2}s slot",
                    outcome.remedy,
                    outcome.duration_secs,
                    slot
                );
                (index, TaskOutcome::Fitted(outcome))
            });
        }

        let mut completed = 0usize;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, TaskOutcome::Fitted(outcome))) => {
                    segments[index].audio_path = Some(outcome.path);
                    report.synthesized += 1;
                }
                Ok((index, TaskOutcome::Failed)) => {
                    segments[index].audio_path = None;
                    report.failed += 1;
                }
                Ok((_, TaskOutcome::Unstarted)) => {
                    report.cancelled = true;
                    continue;
                }
                Err(e) => {
                    log::warn!("synthesis worker panicked: {e}");
                    report.failed += 1;
                }
            }

            completed += 1;
            if let Some(tx) = &progress {
                let _ = tx.send(ProgressUpdate { completed, total }).await;
            }
        }

        report
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
