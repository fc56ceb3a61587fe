//! Duration fitting — compress a dubbed clip into its time slot.
//!
//! The contract, per clip:
//! * a clip already inside its slot is returned untouched (dubbed speech is
//!   never slowed down to fill a gap);
//! * an oversized clip is sped up pitch-preserved, but never past the
//!   configured ceiling — intelligibility beats slot precision;
//! * when the ceiling leaves a small overrun, the tail is hard-trimmed;
//!   a large overrun is kept rather than cutting audible speech;
//! * a media-tool failure returns the clip from before the failed stage —
//!   degraded timing, never a lost clip, never a failed run.
//!
//! Which remedy was applied is reported in [`FitOutcome`] so the caller can
//! log and account for it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::SyncConfig;

use super::speed::{split_ratio, STAGE_CEILING};
use super::toolkit::AudioToolkit;

// ---------------------------------------------------------------------------
// FitOutcome
// ---------------------------------------------------------------------------

/// How a clip was made to fit (or allowed not to).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitRemedy {
    /// Clip already fit its slot; returned byte-identical.
    Unchanged,
    /// Sped up within the ceiling; now inside the slot.
    Compressed,
    /// Speed ceiling was insufficient; the small remainder was cut off.
    Trimmed,
    /// Speed ceiling was insufficient and the remainder was too large to
    /// cut; the clip overruns its slot.
    Overrun,
}

/// Result of a fitting pass.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    /// The clip to use from here on.
    pub path: PathBuf,
    pub remedy: FitRemedy,
    /// Last measured duration of `path`, in seconds.
    pub duration_secs: f64,
}

// ---------------------------------------------------------------------------
// DurationFitter
// ---------------------------------------------------------------------------

/// Fits synthesized clips into their slots using an [`AudioToolkit`].
pub struct DurationFitter {
    toolkit: Arc<dyn AudioToolkit>,
    max_speed: f64,
    speed_margin: f64,
    trim_threshold_secs: f64,
}

impl DurationFitter {
    pub fn new(toolkit: Arc<dyn AudioToolkit>, config: &SyncConfig) -> Self {
        Self {
            toolkit,
            max_speed: config.max_speed,
            speed_margin: config.speed_margin,
            trim_threshold_secs: config.trim_threshold_secs,
        }
    }

    /// Fit `clip` into `target_secs`. Infallible upward: every failure path
    /// degrades to a usable clip and logs its cause.
    pub async fn fit(&self, clip: PathBuf, target_secs: f64) -> FitOutcome {
        let actual = match self.toolkit.probe_duration(&clip).await {
            Ok(d) => d,
            Err(e) => {
                log::warn!("duration probe failed for {}: {e}", clip.display());
                return FitOutcome {
                    path: clip,
                    remedy: FitRemedy::Unchanged,
                    duration_secs: 0.0,
                };
            }
        };

        if target_secs <= 0.0 || actual <= target_secs {
            return FitOutcome {
                path: clip,
                remedy: FitRemedy::Unchanged,
                duration_secs: actual,
            };
        }

        // Margin over the exact ratio absorbs encoder rounding; the ceiling
        // keeps speech intelligible even when the slot loses.
        let required_speed = (actual / target_secs) * self.speed_margin;
        let applied_speed = required_speed.min(self.max_speed);
        let stages = split_ratio(applied_speed, STAGE_CEILING);

        let stretched = match self.toolkit.stretch(&clip, &stages).await {
            Ok(p) => p,
            Err(e) => {
                log::warn!("stretch failed for {}: {e}", clip.display());
                return FitOutcome {
                    path: clip,
                    remedy: FitRemedy::Unchanged,
                    duration_secs: actual,
                };
            }
        };
        remove_superseded(&clip, &stretched);

        let new_duration = match self.toolkit.probe_duration(&stretched).await {
            Ok(d) => d,
            Err(e) => {
                log::warn!("post-stretch probe failed for {}: {e}", stretched.display());
                return FitOutcome {
                    path: stretched,
                    remedy: FitRemedy::Compressed,
                    duration_secs: target_secs,
                };
            }
        };

        if new_duration <= target_secs {
            return FitOutcome {
                path: stretched,
                remedy: FitRemedy::Compressed,
                duration_secs: new_duration,
            };
        }

        let overrun = new_duration - target_secs;
        if overrun >= self.trim_threshold_secs {
            log::debug!(
                "accepting {overrun:.2}s overrun for {} (speed capped at {applied_speed:.2})",
                stretched.display()
            );
            return FitOutcome {
                path: stretched,
                remedy: FitRemedy::Overrun,
                duration_secs: new_duration,
            };
        }

        match self.toolkit.trim(&stretched, target_secs).await {
            Ok(trimmed) => {
                remove_superseded(&stretched, &trimmed);
                FitOutcome {
                    path: trimmed,
                    remedy: FitRemedy::Trimmed,
                    duration_secs: target_secs,
                }
            }
            Err(e) => {
                log::warn!("trim failed for {}: {e}", stretched.display());
                FitOutcome {
                    path: stretched,
                    remedy: FitRemedy::Overrun,
                    duration_secs: new_duration,
                }
            }
        }
    }
}

/// Delete a clip that a later stage replaced. Missing files are not an
/// error — the toolkit may have produced its output in place.
fn remove_superseded(old: &Path, new: &Path) {
    if old == new {
        return;
    }
    if let Err(e) = std::fs::remove_file(old) {
        log::debug!("could not remove superseded clip {}: {e}", old.display());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
