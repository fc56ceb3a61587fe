//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across tasks.
//! Settings are read once at startup and passed into the components that
//! need them; nothing reads configuration from ambient global state.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// TranslationConfig
// ---------------------------------------------------------------------------

/// Settings for the OpenRouter translation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// OpenRouter API key. Required before a translation run starts.
    pub api_key: Option<String>,
    /// Model identifier sent to OpenRouter
    /// (e.g. `"meta-llama/llama-3.3-70b-instruct:free"`).
    pub model: String,
    /// Number of segments translated per request.
    pub batch_size: usize,
    /// Sampling temperature. Kept low for deterministic translations.
    pub temperature: f32,
    /// Maximum tokens the model may generate per batch reply.
    pub max_tokens: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Factor applied to the computed raw cost before it is shown to the
    /// user. Applied after raw cost computation; carries no other meaning.
    pub cost_display_multiplier: f64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "meta-llama/llama-3.3-70b-instruct:free".into(),
            batch_size: 20,
            temperature: 0.3,
            max_tokens: 4096,
            timeout_secs: 60,
            cost_display_multiplier: 2.0,
        }
    }
}

// ---------------------------------------------------------------------------
// TtsConfig
// ---------------------------------------------------------------------------

/// Settings for the speech-synthesis step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// Backend selector: `"fpt"`, `"elevenlabs"` or `"openai"`.
    /// An unknown name is a fatal configuration error at provider
    /// construction time.
    pub provider: String,
    /// API key for the selected backend.
    pub api_key: Option<String>,
    /// Voice identifier understood by the selected backend.
    pub voice: String,
    /// Base speech speed requested from the backend (1.0 = natural).
    pub speed: f32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Size of the synthesis worker pool. Bounds concurrent requests so the
    /// backend's rate limits are respected.
    pub concurrency: usize,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: "fpt".into(),
            api_key: None,
            voice: "banmai".into(),
            speed: 1.0,
            timeout_secs: 60,
            concurrency: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// SyncConfig
// ---------------------------------------------------------------------------

/// Tuning for duration fitting and time-slot computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Ceiling on dubbed speech speed-up. Clips that would need more are
    /// capped here and trimmed or left overrunning instead.
    pub max_speed: f64,
    /// Safety factor applied to the required speed so rounding drift after
    /// stretching cannot push the clip back over its slot.
    pub speed_margin: f64,
    /// Minimum usable slot length in seconds, even when neighbouring
    /// segments start almost simultaneously.
    pub slot_floor_secs: f64,
    /// Gap in seconds kept between a clip and the next segment's start.
    pub slot_buffer_secs: f64,
    /// Overruns below this many seconds are hard-trimmed to the slot;
    /// larger overruns are accepted rather than cutting audible speech.
    pub trim_threshold_secs: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_speed: 1.5,
            speed_margin: 1.15,
            slot_floor_secs: 0.5,
            slot_buffer_secs: 0.1,
            trim_threshold_secs: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

/// Relative volumes for the final mix. Not used by this core — carried as
/// pass-through data for the external muxing stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Volume of the original track under the dub.
    pub original_volume: f32,
    /// Volume of the dubbed track.
    pub dubbing_volume: f32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            original_volume: 0.1,
            dubbing_volume: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// OpenRouter translation settings.
    pub translation: TranslationConfig,
    /// Speech-synthesis settings.
    pub tts: TtsConfig,
    /// Duration-fitting and slot tuning.
    pub sync: SyncConfig,
    /// Final-mix volumes (consumed downstream).
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
