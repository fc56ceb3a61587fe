//! FPT.AI TTS backend — asynchronous generation behind a pollable URL.
//!
//! Unlike the other backends, FPT.AI does not return audio bytes in the
//! POST reply. It returns a JSON envelope whose `async` field is a URL where
//! the clip will appear shortly. We wait one fixed interval and fetch the
//! URL exactly once; a still-not-ready fetch is a per-clip failure, not a
//! retry loop — the orchestrator moves on to the next segment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use super::provider::{ClipStore, TtsError, TtsProvider};

const API_URL: &str = "https://api.fpt.ai/hmi/tts/v5";

/// How long generated audio typically takes to land at the content URL.
const FETCH_DELAY: Duration = Duration::from_secs(1);

/// FPT.AI speech synthesis — the strongest Vietnamese voices.
pub struct FptTts {
    client: reqwest::Client,
    api_key: String,
    store: ClipStore,
}

impl FptTts {
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
}

#[async_trait]
impl TtsProvider for FptTts {
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        speed: f32,
    ) -> Result<PathBuf, TtsError> {
        // FPT.AI takes its parameters as headers and the raw text as body.
        let response = self
            .client
            .post(API_URL)
            .header("api-key", &self.api_key)
            .header("voice", voice)
            .header("speed", speed.to_string())
            .body(text.as_bytes().to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TtsError::Status(status.as_u16()));
        }

        let envelope: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TtsError::Parse(e.to_string()))?;

        let audio_url = envelope["async"]
            .as_str()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| TtsError::Parse("reply carries no async content URL".into()))?
            .to_string();

        // Give generation time to finish, then fetch once.
        tokio::time::sleep(FETCH_DELAY).await;

        let audio_response = self.client.get(&audio_url).send().await?;
        if !audio_response.status().is_success() {
            return Err(TtsError::NotReady);
        }

        let bytes = audio_response.bytes().await?;
        if bytes.is_empty() {
            return Err(TtsError::NotReady);
        }

        self.store.write("fpt", &bytes).await
    }

    fn name(&self) -> &'static str {
        "fpt"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
