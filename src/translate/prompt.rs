//! Prompt builder for English→Vietnamese batch translation.
//!
//! [`PromptBuilder::build_chat`] produces a `(system_msg, user_msg)` pair for
//! an OpenAI-compatible `/chat/completions` endpoint. The system message pins
//! the target language and the preserved-terms rule; the user message embeds
//! the batch as a JSON array and restates the required output format.

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

const SYSTEM_INSTRUCTION: &str = "\
You are a professional English to Vietnamese translator. \
Always reply with valid JSON.";

/// Technical terms and proper nouns that must survive translation verbatim.
/// Listed in the prompt so the model does not localise them.
const PRESERVED_TERMS: &[&str] = &[
    "AI",
    "Machine Learning",
    "blockchain",
    "YouTube",
    "ICT",
    "stop rate",
    "setup",
    "order flow",
];

const TASK_INSTRUCTION: &str = "\
TASK: Translate the following English sentences to Vietnamese.

CRITICAL RULES:
1. KEEP English technical terms, specialized concepts, and proper names
   as is. DO NOT translate them. Examples: {terms}.
2. Translate ONLY the surrounding context to Vietnamese.
3. Use natural Vietnamese as Vietnamese people speak.
4. Keep the meaning and emotion of the original.

OUTPUT FORMAT: Return ONLY a JSON array with this exact format:
[{\"id\": 1, \"vietnamese\": \"ban dich tieng Viet\"}]

EXAMPLE:
Input: [{\"id\": 1, \"english\": \"In this video, we will discuss the ICT entry checklist and stop rate.\"}]
Output: [{\"id\": 1, \"vietnamese\": \"Trong video này, chúng ta sẽ thảo luận về ICT entry checklist và stop rate.\"}]

INPUT TO TRANSLATE:
{segments}

Remember: Output MUST be in Vietnamese language, BUT keep English terms as is!";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds the translation prompt around a serialized segment batch.
///
/// # Example
/// ```rust
/// use vietdub::translate::PromptBuilder;
///
/// let builder = PromptBuilder::new();
/// let (system, user) = builder.build_chat(r#"[{"id": 1, "english": "hello"}]"#);
/// assert!(system.contains("Vietnamese translator"));
/// assert!(user.contains("\"english\": \"hello\""));
/// ```
#[derive(Debug, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a `(system_msg, user_msg)` pair embedding `batch_json`,
    /// a JSON array of `{id, english}` objects.
    pub fn build_chat(&self, batch_json: &str) -> (String, String) {
        let user_msg = TASK_INSTRUCTION
            .replace("{terms}", &PRESERVED_TERMS.join(", "))
            .replace("{segments}", batch_json);
        (SYSTEM_INSTRUCTION.to_string(), user_msg)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
