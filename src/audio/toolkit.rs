//! The [`AudioToolkit`] seam and its ffmpeg-backed implementation.
//!
//! The duration fitter needs three primitives: measure a clip, stretch it
//! pitch-preserved, and trim it. They live behind an async trait so the
//! fitter and orchestrator can be exercised against an in-memory double,
//! while production shells out to `ffprobe`/`ffmpeg` via `tokio::process`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

// ---------------------------------------------------------------------------
// AudioError
// ---------------------------------------------------------------------------

/// Errors from the media tools.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The tool could not be spawned or exited non-zero.
    #[error("media tool failed: {0}")]
    Tool(String),

    /// Tool output did not have the expected shape.
    #[error("unexpected media tool output: {0}")]
    Parse(String),

    #[error("media I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// AudioToolkit trait
// ---------------------------------------------------------------------------

/// Async trait over the media primitives the fitter composes.
///
/// Implementations write derived clips as new sibling files and never
/// modify their input in place; cleanup of superseded files is the
/// fitter's responsibility.
#[async_trait]
pub trait AudioToolkit: Send + Sync {
    /// Duration of `clip` in seconds.
    async fn probe_duration(&self, clip: &Path) -> Result<f64, AudioError>;

    /// Apply a pitch-preserving tempo chain (each ratio within the
    /// primitive's per-application range) and return the new clip.
    async fn stretch(&self, clip: &Path, ratios: &[f64]) -> Result<PathBuf, AudioError>;

    /// Cut `clip` down to exactly `seconds` and return the new clip.
    async fn trim(&self, clip: &Path, seconds: f64) -> Result<PathBuf, AudioError>;
}

// ---------------------------------------------------------------------------
// FfmpegToolkit
// ---------------------------------------------------------------------------

/// Production toolkit shelling out to `ffprobe` and `ffmpeg`.
#[derive(Debug, Clone, Default)]
pub struct FfmpegToolkit;

impl FfmpegToolkit {
    pub fn new() -> Self {
        Self
    }

    /// `seg.mp3` + `"x1.50"` → `seg.x1.50.mp3`, next to the input.
    fn derived_path(clip: &Path, tag: &str) -> PathBuf {
        let stem = clip
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("clip");
        let ext = clip
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("mp3");
        clip.with_file_name(format!("{stem}.{tag}.{ext}"))
    }

    async fn run(mut cmd: Command, tool: &str) -> Result<std::process::Output, AudioError> {
        let output = cmd
            .output()
            .await
            .map_err(|e| AudioError::Tool(format!("failed to spawn {tool}: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AudioError::Tool(format!(
                "{tool} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(output)
    }
}

#[async_trait]
impl AudioToolkit for FfmpegToolkit {
    async fn probe_duration(&self, clip: &Path) -> Result<f64, AudioError> {
        let mut cmd = Command::new("ffprobe");
        cmd.args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(clip);

        let output = Self::run(cmd, "ffprobe").await?;
        let text = String::from_utf8_lossy(&output.stdout);
        text.trim()
            .parse::<f64>()
            .map_err(|_| AudioError::Parse(format!("ffprobe duration: {:?}", text.trim())))
    }

    async fn stretch(&self, clip: &Path, ratios: &[f64]) -> Result<PathBuf, AudioError> {
        if ratios.is_empty() {
            return Ok(clip.to_path_buf());
        }

        let filter = ratios
            .iter()
            .map(|r| format!("atempo={r}"))
            .collect::<Vec<_>>()
            .join(",");
        let overall: f64 = ratios.iter().product();
        let out = Self::derived_path(clip, &format!("x{overall:.3}"));

        let mut cmd = Command::new("ffmpeg");
        cmd.arg("-y")
            .arg("-i")
            .arg(clip)
            .args(["-filter:a", &filter, "-vn"])
            .arg(&out);

        Self::run(cmd, "ffmpeg").await?;
        Ok(out)
    }

    async fn trim(&self, clip: &Path, seconds: f64) -> Result<PathBuf, AudioError> {
        let out = Self::derived_path(clip, "cut");

        // Stream copy: trimming must not re-encode what the stretch stage
        // already produced.
        let mut cmd = Command::new("ffmpeg");
        cmd.arg("-y")
            .arg("-i")
            .arg(clip)
            .args(["-t", &seconds.to_string(), "-c", "copy"])
            .arg(&out);

        Self::run(cmd, "ffmpeg").await?;
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_path_keeps_directory_and_extension() {
        let out = FfmpegToolkit::derived_path(Path::new("/work/clips/seg_0001.mp3"), "x1.500");
        assert_eq!(out, Path::new("/work/clips/seg_0001.x1.500.mp3"));
    }

    #[test]
    fn derived_path_tolerates_missing_extension() {
        let out = FfmpegToolkit::derived_path(Path::new("/work/clips/raw"), "cut");
        assert_eq!(out, Path::new("/work/clips/raw.cut.mp3"));
    }

    #[tokio::test]
    async fn empty_ratio_chain_is_identity() {
        let toolkit = FfmpegToolkit::new();
        let clip = Path::new("/work/clips/seg.mp3");
        let out = toolkit.stretch(clip, &[]).await.unwrap();
        assert_eq!(out, clip);
    }
}
