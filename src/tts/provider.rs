//! The [`TtsProvider`] capability trait, shared error type, and clip store.
//!
//! Every backend implements the same narrow capability: text in, path to a
//! synthesized clip out. Credentials, endpoints and wire formats stay inside
//! the backend; transport failures surface as [`TtsError`] values the
//! orchestrator can log and skip past — never a panic, never an abort.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// TtsError
// ---------------------------------------------------------------------------

/// Errors that can occur while synthesizing speech.
#[derive(Debug, Error)]
pub enum TtsError {
    /// Backend selector did not name a known provider. Fatal at
    /// construction time, never deferred to the first call.
    #[error("unknown TTS provider: {0}")]
    UnknownProvider(String),

    /// No API key configured for the selected backend. Fatal at
    /// construction time.
    #[error("{0} API key is missing — set tts.api_key")]
    MissingApiKey(&'static str),

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("TTS request timed out")]
    Timeout,

    /// The backend replied with a non-success status.
    #[error("TTS backend returned status {0}")]
    Status(u16),

    /// The backend reply did not have the expected shape.
    #[error("unexpected TTS reply: {0}")]
    Parse(String),

    /// Asynchronous generation was not finished when the content reference
    /// was fetched. Treated as a per-clip failure, not retried.
    #[error("generated audio was not ready at fetch time")]
    NotReady,

    /// Failed to write the clip to the working directory.
    #[error("clip I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for TtsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TtsError::Timeout
        } else {
            TtsError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// TtsProvider trait
// ---------------------------------------------------------------------------

/// Async capability trait for speech-synthesis backends.
///
/// Implementors must be `Send + Sync` so the orchestrator can share one
/// provider across its worker pool (`Arc<dyn TtsProvider>`).
#[async_trait]
pub trait TtsProvider: Send + Sync {
    /// Synthesize `text` with the given voice and base speed, returning the
    /// path of the written clip.
    async fn synthesize(&self, text: &str, voice: &str, speed: f32)
        -> Result<PathBuf, TtsError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// ClipStore
// ---------------------------------------------------------------------------

/// Writes synthesized audio bytes into the clips working directory under
/// unique, monotonically numbered names. One store per provider instance;
/// the counter makes concurrent workers collision-free.
pub struct ClipStore {
    dir: PathBuf,
    counter: AtomicU64,
}

impl ClipStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            counter: AtomicU64::new(0),
        }
    }

    /// Persist `bytes` as `<prefix>_<n>.mp3` and return the path.
    pub async fn write(&self, prefix: &str, bytes: &[u8]) -> Result<PathBuf, TtsError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let path = self.dir.join(format!("{prefix}_{n:05}.mp3"));
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
