//! VietDub — English→Vietnamese video dubbing pipeline.
//!
//! Takes a time-coded transcript (produced upstream by speech recognition),
//! translates it to Vietnamese in batches over OpenRouter, synthesizes each
//! line with a pluggable TTS backend, and compresses every clip into the
//! time slot vacated by the original utterance without shifting pitch.
//!
//! # Pipeline flow
//!
//! ```text
//! segments.json ({id, start, end, text})
//!   └─▶ translate::translate_segments      fills `translation` (verbatim
//!         │                                 fallback on any batch failure)
//!   └─▶ sync::SyncOrchestrator::run        per segment, bounded pool:
//!         ├─ TtsProvider::synthesize  ──▶  raw clip
//!         └─ DurationFitter::fit      ──▶  clip fitted to the time slot
//!   └─▶ segments.json, now carrying `translation` + `audio_path`,
//!       handed to the external muxing stage
//! ```
//!
//! Failures degrade quality instead of aborting: an unreachable translation
//! backend leaves verbatim English text, a failed synthesis leaves that one
//! segment silent. Only configuration and credential errors are fatal, and
//! those are raised before a run starts.

pub mod audio;
pub mod cancel;
pub mod config;
pub mod segment;
pub mod sync;
pub mod translate;
pub mod tts;
