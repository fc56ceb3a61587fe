//! Offline cost estimation for a translation run.
//!
//! Pure arithmetic, no I/O: token counts are approximated from word counts,
//! rates come from a static per-model price table, and the result is scaled
//! by the configured display multiplier before being shown to the user.

use crate::segment::Segment;

// ---------------------------------------------------------------------------
// Token approximation constants
// ---------------------------------------------------------------------------

/// Average tokens per English word.
const TOKENS_PER_WORD: f64 = 1.3;

/// Vietnamese output tends to expand the token count relative to the input.
const OUTPUT_EXPANSION: f64 = 1.5;

/// Fixed prompt overhead per batch request, in tokens.
const PROMPT_OVERHEAD_TOKENS: f64 = 200.0;

/// Display estimates are rounded to this many decimal places (USD).
const ROUND_DECIMALS: i32 = 6;

// ---------------------------------------------------------------------------
// Model catalog
// ---------------------------------------------------------------------------

/// Supported OpenRouter models with human-readable labels.
pub const TRANSLATION_MODELS: &[(&str, &str)] = &[
    // Free models
    (
        "meta-llama/llama-3.3-70b-instruct:free",
        "Llama 3.3 70B (free, recommended)",
    ),
    ("allenai/molmo-2-8b:free", "Molmo 2 8B (free)"),
    // Paid models
    (
        "meta-llama/llama-3.1-8b-instruct",
        "Llama 3.1 8B ($0.02/$0.05 per 1M)",
    ),
    (
        "google/gemini-2.0-flash-lite-preview-02-05",
        "Gemini 2.0 Flash Lite ($0.10/$0.40 per 1M)",
    ),
];

/// Human-readable label for a model id, when catalogued.
pub fn model_label(model: &str) -> Option<&'static str> {
    TRANSLATION_MODELS
        .iter()
        .find(|(id, _)| *id == model)
        .map(|(_, label)| *label)
}

// ---------------------------------------------------------------------------
// PriceTable
// ---------------------------------------------------------------------------

/// Per-model `(input, output)` rates in USD per million tokens.
///
/// Constructed once and passed in; unknown (or free) models price at zero.
#[derive(Debug, Clone)]
pub struct PriceTable {
    entries: Vec<(&'static str, (f64, f64))>,
}

impl PriceTable {
    /// The built-in OpenRouter rates.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                ("meta-llama/llama-3.3-70b-instruct:free", (0.0, 0.0)),
                ("allenai/molmo-2-8b:free", (0.0, 0.0)),
                ("meta-llama/llama-3.1-8b-instruct", (0.02, 0.05)),
                ("google/gemini-2.0-flash-lite-preview-02-05", (0.10, 0.40)),
            ],
        }
    }

    /// `(input_rate, output_rate)` per million tokens; `(0, 0)` for unknown
    /// models.
    pub fn rates(&self, model: &str) -> (f64, f64) {
        self.entries
            .iter()
            .find(|(id, _)| *id == model)
            .map(|(_, rates)| *rates)
            .unwrap_or((0.0, 0.0))
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// Estimate the user-facing cost (USD) of translating `segments`.
///
/// The returned figure is `display_multiplier ×` the computed raw cost,
/// rounded to six decimal places. The multiplier is display policy applied
/// after raw cost computation, not a hidden charge.
pub fn estimate_cost(
    segments: &[Segment],
    model: &str,
    batch_size: usize,
    table: &PriceTable,
    display_multiplier: f64,
) -> f64 {
    let total_words: usize = segments
        .iter()
        .map(|s| s.text.split_whitespace().count())
        .sum();

    let input_tokens = (total_words as f64 * TOKENS_PER_WORD).floor();
    let overhead =
        PROMPT_OVERHEAD_TOKENS * segments.len() as f64 / batch_size.max(1) as f64;
    let input_with_prompt = input_tokens + overhead;
    let output_tokens = (input_tokens * OUTPUT_EXPANSION).floor();

    let (input_rate, output_rate) = table.rates(model);
    let real_cost = (input_with_prompt / 1_000_000.0) * input_rate
        + (output_tokens / 1_000_000.0) * output_rate;

    round_to(real_cost * display_multiplier, ROUND_DECIMALS)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn seg_with_words(id: i64, words: usize) -> Segment {
        Segment {
            id,
            start: 0.0,
            end: 1.0,
            text: vec!["word"; words].join(" "),
            translation: None,
            audio_path: None,
        }
    }

    #[test]
    fn free_model_costs_zero_regardless_of_size() {
        let table = PriceTable::builtin();
        let segments: Vec<Segment> = (0..500).map(|i| seg_with_words(i, 40)).collect();
        let cost = estimate_cost(
            &segments,
            "meta-llama/llama-3.3-70b-instruct:free",
            20,
            &table,
            2.0,
        );
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn unknown_model_defaults_to_zero_rates() {
        let table = PriceTable::builtin();
        let segments = vec![seg_with_words(1, 1000)];
        assert_eq!(
            estimate_cost(&segments, "some/unknown-model", 20, &table, 2.0),
            0.0
        );
    }

    #[test]
    fn display_cost_is_exactly_multiplier_times_real() {
        let table = PriceTable::builtin();
        let segments: Vec<Segment> = (0..100).map(|i| seg_with_words(i, 20)).collect();
        let model = "meta-llama/llama-3.1-8b-instruct";

        let real = estimate_cost(&segments, model, 20, &table, 1.0);
        let display = estimate_cost(&segments, model, 20, &table, 2.0);

        assert!(real > 0.0);
        assert!((display - real * 2.0).abs() < 1e-9);
    }

    #[test]
    fn cost_scales_linearly_with_segment_count() {
        let table = PriceTable::builtin();
        let model = "google/gemini-2.0-flash-lite-preview-02-05";

        let one: Vec<Segment> = (0..50).map(|i| seg_with_words(i, 20)).collect();
        let two: Vec<Segment> = (0..100).map(|i| seg_with_words(i, 20)).collect();

        let cost_one = estimate_cost(&one, model, 20, &table, 2.0);
        let cost_two = estimate_cost(&two, model, 20, &table, 2.0);

        assert!(cost_one > 0.0);
        // Twice the segments (same word count each) → twice the cost, give or
        // take rounding at the sixth decimal.
        assert!((cost_two - cost_one * 2.0).abs() < 1e-5);
    }

    #[test]
    fn estimate_is_rounded_to_six_decimals() {
        let table = PriceTable::builtin();
        let segments = vec![seg_with_words(1, 7)];
        let cost = estimate_cost(
            &segments,
            "meta-llama/llama-3.1-8b-instruct",
            20,
            &table,
            2.0,
        );
        let scaled = cost * 1_000_000.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }

    #[test]
    fn model_label_lookup() {
        assert!(model_label("meta-llama/llama-3.3-70b-instruct:free")
            .is_some_and(|l| l.contains("Llama 3.3")));
        assert!(model_label("nope/never-heard-of-it").is_none());
    }
}
