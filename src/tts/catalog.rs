//! Static provider and voice catalogs.
//!
//! Immutable lookup data for the CLI: which backends exist, which voices
//! each one ships, and human-readable labels for both. Nothing here is
//! read from or written to at runtime — construction-time configuration
//! is validated against these tables and that is all.

/// Known backend selectors with labels.
pub const TTS_PROVIDERS: &[(&str, &str)] = &[
    ("fpt", "FPT.AI (best Vietnamese voices)"),
    ("elevenlabs", "ElevenLabs (multilingual)"),
    ("openai", "OpenAI TTS (simple)"),
];

/// FPT.AI Vietnamese voices.
pub const FPT_VOICES: &[(&str, &str)] = &[
    ("banmai", "Ban Mai (female, northern)"),
    ("leminh", "Lê Minh (male, northern)"),
    ("thuminh", "Thu Minh (female, northern)"),
    ("giahuy", "Gia Huy (male, northern)"),
    ("myan", "Mỹ An (female, southern)"),
    ("lannhi", "Lan Nhi (female, southern)"),
    ("linhsan", "Linh San (female, central)"),
    ("minhquang", "Minh Quang (male, central)"),
];

/// ElevenLabs voice ids with Vietnamese support.
pub const ELEVENLABS_VOICES: &[(&str, &str)] = &[
    ("21m00Tcm4TlvDq8ikWAM", "Rachel (female)"),
    ("AZnzlk1XvdvUeBnXmlld", "Domi (female)"),
    ("EXAVITQu4vr4xnSDxMaL", "Bella (female)"),
    ("ErXwobaYiN019PkySvjV", "Antoni (male)"),
    ("MF3mGyEYCl7XYWbV9V6O", "Elli (female)"),
    ("TxGEqnHWrfWFTfGW9XjX", "Josh (male)"),
];

/// OpenAI TTS voices.
pub const OPENAI_VOICES: &[(&str, &str)] = &[
    ("alloy", "Alloy (neutral)"),
    ("echo", "Echo (male)"),
    ("fable", "Fable (British)"),
    ("onyx", "Onyx (male, deep)"),
    ("nova", "Nova (female)"),
    ("shimmer", "Shimmer (female)"),
];

/// The voice table for a backend selector, when the selector is known.
pub fn voices_for(provider: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match provider {
        "fpt" => Some(FPT_VOICES),
        "elevenlabs" => Some(ELEVENLABS_VOICES),
        "openai" => Some(OPENAI_VOICES),
        _ => None,
    }
}

/// `true` when `voice` appears in the catalog of a known `provider`.
pub fn is_known_voice(provider: &str, voice: &str) -> bool {
    voices_for(provider)
        .is_some_and(|voices| voices.iter().any(|(id, _)| *id == voice))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_provider_has_a_voice_table() {
        for (provider, _) in TTS_PROVIDERS {
            assert!(
                voices_for(provider).is_some_and(|v| !v.is_empty()),
                "no voices for {provider}"
            );
        }
    }

    #[test]
    fn default_fpt_voice_is_catalogued() {
        assert!(is_known_voice("fpt", "banmai"));
    }

    #[test]
    fn unknown_voice_or_provider_is_rejected() {
        assert!(!is_known_voice("fpt", "no-such-voice"));
        assert!(!is_known_voice("acme-tts", "banmai"));
    }
}
