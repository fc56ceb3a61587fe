//! ElevenLabs TTS backend — synchronous bytes with fixed quality settings.
//!
//! Stability/similarity tuning lives here and is not exposed upward; the
//! capability surface stays `synthesize(text, voice, speed)`. ElevenLabs has
//! no wire-level speed parameter — clip timing is owned by the duration
//! fitter downstream, so the base speed is accepted and ignored.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::provider::{ClipStore, TtsError, TtsProvider};

const API_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";
const MODEL_ID: &str = "eleven_multilingual_v2";

// Quality settings tuned for dubbed speech; fixed by this backend.
const STABILITY: f32 = 0.5;
const SIMILARITY_BOOST: f32 = 0.75;
const STYLE: f32 = 0.0;

/// ElevenLabs multilingual speech synthesis.
pub struct ElevenLabsTts {
    client: reqwest::Client,
    api_key: String,
    store: ClipStore,
}

impl ElevenLabsTts {
    pub fn new(api_key: String, clips_dir: &Path, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_key,
            store: ClipStore::new(clips_dir),
        }
    }

    fn endpoint(voice: &str) -> String {
        format!("{API_URL}/{voice}")
    }
}

#[async_trait]
impl TtsProvider for ElevenLabsTts {
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        _speed: f32,
    ) -> Result<PathBuf, TtsError> {
        let body = serde_json::json!({
            "text": text,
            "model_id": MODEL_ID,
            "voice_settings": {
                "stability": STABILITY,
                "similarity_boost": SIMILARITY_BOOST,
                "style": STYLE,
                "use_speaker_boost": true
            }
        });

        let response = self
            .client
            .post(Self::endpoint(voice))
            .header("Accept", "audio/mpeg")
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TtsError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        self.store.write("elevenlabs", &bytes).await
    }

    fn name(&self) -> &'static str {
        "elevenlabs"
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
    fn endpoint_embeds_the_voice_id() {
        assert_eq!(
            ElevenLabsTts::endpoint("21m00Tcm4TlvDq8ikWAM"),
            "https://api.elevenlabs.io/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"
        );
    }

    #[test]
    fn builds_without_panic() {
        let dir = tempdir().expect("temp dir");
        let provider = ElevenLabsTts::new("xi-test".into(), dir.path(), 60);
        assert_eq!(provider.name(), "elevenlabs");
    }
}
