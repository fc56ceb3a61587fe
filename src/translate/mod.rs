//! Batch translation over OpenRouter.
//!
//! This module provides:
//! * [`Translator`] — async trait implemented by translation backends.
//! * [`OpenRouterClient`] — chat-completions client for openrouter.ai.
//! * [`translate_segments`] — in-place batch driver that never fails:
//!   every segment ends up with a translation or a verbatim fallback.
//! * [`PromptBuilder`] — builds the English→Vietnamese translation prompt.
//! * [`parse_reply`] — tolerant parsing of loosely-structured LLM replies.
//! * [`estimate_cost`] / [`PriceTable`] — offline cost estimation.
//! * [`TranslateError`] — error variants for translation operations.
//!
//! # Recovery contract
//!
//! One request is issued per batch. Whatever goes wrong — transport error,
//! timeout, unparseable reply, missing ids in the reply — is caught at the
//! batch boundary: affected segments fall back to their verbatim English
//! text and the run continues with the next batch. A segment that already
//! carries a non-empty translation is never overwritten by a fallback.

pub mod batcher;
pub mod client;
pub mod parse;
pub mod pricing;
pub mod prompt;

pub use batcher::{translate_segments, TranslateReport};
pub use client::{BatchItem, OpenRouterClient, Translator};
pub use parse::parse_reply;
pub use pricing::{estimate_cost, model_label, PriceTable, TRANSLATION_MODELS};
pub use prompt::PromptBuilder;

use thiserror::Error;

// ---------------------------------------------------------------------------
// TranslateError
// ---------------------------------------------------------------------------

/// Errors that can occur while translating a batch.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// No API key configured. Raised at client construction, before a run.
    #[error("OpenRouter API key is missing — set translation.api_key")]
    MissingApiKey,

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("translation request timed out")]
    Timeout,

    /// The backend replied with a non-success status.
    #[error("translation backend returned status {0}")]
    Status(u16),

    /// The reply contained no parsable `{id, translation}` array.
    #[error("failed to parse translation reply: {0}")]
    Parse(String),

    /// The backend returned a response with no usable text content.
    #[error("translation backend returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Timeout
        } else {
            TranslateError::Request(e.to_string())
        }
    }
}
