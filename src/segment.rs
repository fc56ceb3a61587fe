//! The segment list — the one data structure threaded through the pipeline.
//!
//! Upstream speech recognition produces an ordered list of
//! `{id, start, end, text}` records. This core fills in `translation` and
//! `audio_path`; the external muxing stage reads the finished list. Segments
//! are never deleted or re-ordered here, and `id`/`start`/`end`/`text` are
//! treated as immutable recognition truth.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// One time-coded unit of source text with optional translation and
/// synthesized-audio reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Unique id assigned by recognition. Never reassigned.
    pub id: i64,
    /// Start time in seconds. `start < end`.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Source-language (English) utterance.
    pub text: String,
    /// Vietnamese translation. `None` until the batcher fills it; once set
    /// to a non-empty string it is never overwritten by a fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// Path to the synthesized, duration-fitted clip. `None` until the
    /// orchestrator succeeds for this segment; `None` is a valid terminal
    /// state (silent segment), not a run-level error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_path: Option<PathBuf>,
}

impl Segment {
    /// Returns `true` when a non-empty translation is present.
    pub fn has_translation(&self) -> bool {
        self.translation.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The text the TTS stage should speak: the translation when present,
    /// else the original text, else `None` (nothing to synthesize).
    pub fn speakable_text(&self) -> Option<&str> {
        match self.translation.as_deref() {
            Some(t) if !t.is_empty() => Some(t),
            _ if !self.text.is_empty() => Some(&self.text),
            _ => None,
        }
    }

    /// Segment length in seconds as recognised upstream.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

// ---------------------------------------------------------------------------
// List I/O
// ---------------------------------------------------------------------------

/// Read an ordered segment list from a JSON file.
pub fn read_segments(path: &Path) -> Result<Vec<Segment>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read segment list {}", path.display()))?;
    let segments: Vec<Segment> = serde_json::from_str(&data)
        .with_context(|| format!("invalid segment list {}", path.display()))?;
    Ok(segments)
}

/// Write the segment list as pretty-printed JSON, creating parent
/// directories as needed.
pub fn write_segments(path: &Path, segments: &[Segment]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(segments)?;
    std::fs::write(path, data)
        .with_context(|| format!("failed to write segment list {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
