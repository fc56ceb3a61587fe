//! Audio processing — duration measurement, pitch-preserving compression,
//! trimming, and the fitting policy that composes them.
//!
//! # Fitting flow
//!
//! ```text
//! raw clip ──▶ probe_duration
//!     │   fits slot ──────────────────────────▶ Unchanged
//!     └─▶ split_ratio(min(required, max) )
//!           └─▶ stretch (atempo chain) ──▶ probe again
//!                 │   fits slot ──────────────▶ Compressed
//!                 ├─▶ overrun < threshold ──▶ trim ──▶ Trimmed
//!                 └─▶ overrun ≥ threshold ─────────▶ Overrun (accepted)
//! ```

pub mod fitter;
pub mod speed;
pub mod toolkit;

pub use fitter::{DurationFitter, FitOutcome, FitRemedy};
pub use speed::{split_ratio, STAGE_CEILING, STAGE_FLOOR};
pub use toolkit::{AudioError, AudioToolkit, FfmpegToolkit};
