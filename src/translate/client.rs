//! Core [`Translator`] trait and the OpenRouter implementation.
//!
//! [`OpenRouterClient`] issues one chat-completions request per batch to
//! `https://openrouter.ai/api/v1/chat/completions`. Connection details come
//! from [`TranslationConfig`]; the API key is validated at construction so a
//! missing credential is reported before a run starts, not on batch twenty.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;

use crate::config::TranslationConfig;

use super::parse::parse_reply;
use super::prompt::PromptBuilder;
use super::TranslateError;

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

// ---------------------------------------------------------------------------
// BatchItem
// ---------------------------------------------------------------------------

/// One `{id, english}` pair as serialized into the prompt.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub id: i64,
    pub english: String,
}

// ---------------------------------------------------------------------------
// Translator trait
// ---------------------------------------------------------------------------

/// Async trait for batch translation backends.
///
/// Implementors must be `Send + Sync` so the batch driver can share them
/// across tasks. Returns an `id → Vietnamese` map; ids absent from the map
/// are handled by the caller's fallback logic.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate_batch(
        &self,
        batch: &[BatchItem],
    ) -> Result<HashMap<i64, String>, TranslateError>;
}

// ---------------------------------------------------------------------------
// OpenRouterClient
// ---------------------------------------------------------------------------

/// Chat-completions client for openrouter.ai.
pub struct OpenRouterClient {
    client: reqwest::Client,
    config: TranslationConfig,
    prompt_builder: PromptBuilder,
}

impl OpenRouterClient {
    /// Build a client from application config.
    ///
    /// Fails immediately with [`TranslateError::MissingApiKey`] when no key
    /// is configured — credential problems must surface before any batch is
    /// attempted.
    pub fn from_config(config: &TranslationConfig) -> Result<Self, TranslateError> {
        if config.api_key.as_deref().unwrap_or("").is_empty() {
            return Err(TranslateError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Ok(Self {
            client,
            config: config.clone(),
            prompt_builder: PromptBuilder::new(),
        })
    }
}

#[async_trait]
impl Translator for OpenRouterClient {
    /// Send one batch to OpenRouter and parse the reply into a map.
    async fn translate_batch(
        &self,
        batch: &[BatchItem],
    ) -> Result<HashMap<i64, String>, TranslateError> {
        let batch_json = serde_json::to_string_pretty(batch)
            .map_err(|e| TranslateError::Parse(e.to_string()))?;
        let (system_msg, user_msg) = self.prompt_builder.build_chat(&batch_json);

        let body = serde_json::json!({
            "model":       self.config.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg   }
            ],
            "max_tokens":  self.config.max_tokens,
            "temperature": self.config.temperature
        });

        // Constructor guarantees the key is present and non-empty.
        let key = self.config.api_key.as_deref().unwrap_or("");

        let response = self
            .client
            .post(OPENROUTER_API_URL)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(TranslateError::EmptyResponse)?;

        if content.trim().is_empty() {
            return Err(TranslateError::EmptyResponse);
        }

        parse_reply(content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
