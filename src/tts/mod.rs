//! Speech-synthesis providers.
//!
//! This module provides:
//! * [`TtsProvider`] — async capability trait implemented by all backends.
//! * [`FptTts`] — asynchronous generation behind a pollable content URL.
//! * [`ElevenLabsTts`] — synchronous bytes with fixed quality settings.
//! * [`OpenAiTts`] — synchronous bytes, native speed parameter.
//! * [`create_provider`] — factory keyed by a backend selector string.
//! * [`catalog`] — static provider/voice tables.
//! * [`TtsError`] — error variants for synthesis operations.
//!
//! Exactly one backend is active per run. Per-call failures (transport,
//! bad status, not-ready content) are values the orchestrator logs and
//! skips past; an unknown selector or a missing credential is fatal at
//! construction, before any segment is attempted.

pub mod catalog;
pub mod elevenlabs;
pub mod fpt;
pub mod openai;
pub mod provider;

pub use elevenlabs::ElevenLabsTts;
pub use fpt::FptTts;
pub use openai::OpenAiTts;
pub use provider::{ClipStore, TtsError, TtsProvider};

use std::path::Path;

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Build the backend named by `selector`.
///
/// * Unknown selector → [`TtsError::UnknownProvider`], immediately.
/// * Missing/empty `api_key` → [`TtsError::MissingApiKey`], immediately.
///
/// Synthesized clips are written into `clips_dir`.
pub fn create_provider(
    selector: &str,
    api_key: Option<&str>,
    clips_dir: &Path,
    timeout_secs: u64,
) -> Result<Box<dyn TtsProvider>, TtsError> {
    let key = api_key.unwrap_or("").to_string();

    match selector {
        "fpt" => {
            if key.is_empty() {
                return Err(TtsError::MissingApiKey("FPT.AI"));
            }
            Ok(Box::new(FptTts::new(key, clips_dir, timeout_secs)))
        }
        "elevenlabs" => {
            if key.is_empty() {
                return Err(TtsError::MissingApiKey("ElevenLabs"));
            }
            Ok(Box::new(ElevenLabsTts::new(key, clips_dir, timeout_secs)))
        }
        "openai" => {
            if key.is_empty() {
                return Err(TtsError::MissingApiKey("OpenAI"));
            }
            Ok(Box::new(OpenAiTts::new(key, clips_dir, timeout_secs)))
        }
        other => Err(TtsError::UnknownProvider(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn factory_builds_each_known_backend() {
        let dir = tempdir().expect("temp dir");
        for selector in ["fpt", "elevenlabs", "openai"] {
            let provider = create_provider(selector, Some("key"), dir.path(), 60)
                .unwrap_or_else(|e| panic!("{selector}: {e}"));
            assert_eq!(provider.name(), selector);
        }
    }

    #[test]
    fn unknown_selector_is_fatal() {
        let dir = tempdir().expect("temp dir");
        assert!(matches!(
            create_provider("acme-tts", Some("key"), dir.path(), 60),
            Err(TtsError::UnknownProvider(name)) if name == "acme-tts"
        ));
    }

    #[test]
    fn missing_key_is_fatal_at_construction() {
        let dir = tempdir().expect("temp dir");
        assert!(matches!(
            create_provider("fpt", None, dir.path(), 60),
            Err(TtsError::MissingApiKey(_))
        ));
        assert!(matches!(
            create_provider("openai", Some(""), dir.path(), 60),
            Err(TtsError::MissingApiKey(_))
        ));
    }
}
