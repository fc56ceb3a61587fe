//! OpenAI TTS backend — synchronous POST returning audio bytes directly.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::provider::{ClipStore, TtsError, TtsProvider};

const API_URL: &str = "https://api.openai.com/v1/audio/speech";
const MODEL: &str = "tts-1";

/// OpenAI speech synthesis. The simplest backend: one POST, audio bytes in
/// the reply body, native support for the numeric speed parameter.
pub struct OpenAiTts {
    client: reqwest::Client,
    api_key: String,
    store: ClipStore,
}

impl OpenAiTts {
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
impl TtsProvider for OpenAiTts {
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        speed: f32,
    ) -> Result<PathBuf, TtsError> {
        let body = serde_json::json!({
            "model": MODEL,
            "input": text,
            "voice": voice,
            "speed": speed
        });

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TtsError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        self.store.write("openai", &bytes).await
    }

    fn name(&self) -> &'static str {
        "openai"
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
    fn builds_without_panic() {
        let dir = tempdir().expect("temp dir");
        let provider = OpenAiTts::new("sk-test".into(), dir.path(), 60);
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn is_object_safe() {
        let dir = tempdir().expect("temp dir");
        let _: Box<dyn TtsProvider> = Box::new(OpenAiTts::new("sk-test".into(), dir.path(), 60));
    }
}
