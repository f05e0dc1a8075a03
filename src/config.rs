//! Configuration surface consumed by the provider.
//!
//! The host platform owns persistence: it hands us a [`ConfigEntry`] made of
//! immutable [`EntryData`] (captured by the setup flow) and mutable
//! [`EntryOptions`] (edited through the options flow). This crate only reads
//! them. [`CallOptions`] carries per-call overrides and is discarded after
//! each request.

use serde::{Deserialize, Serialize};

/// Built-in default voice identifier.
pub const DEFAULT_VOICE: &str = "echo";
/// Built-in default synthesis model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini-tts";
/// Built-in default style instructions (none).
pub const DEFAULT_INSTRUCTIONS: &str = "";
/// Built-in default audio output format.
pub const DEFAULT_RESPONSE_FORMAT: &str = "mp3";

/// Voice presets accepted by the speech endpoint.
pub const OPENAI_VOICES: [&str; 10] = [
    "alloy", "echo", "fable", "onyx", "nova", "shimmer", "coral", "sage", "ash", "ballad",
];

/// Synthesis models accepted by the speech endpoint.
pub const OPENAI_MODELS: [&str; 3] = ["gpt-4o-mini-tts", "tts-1", "tts-1-hd"];

/// Audio output formats accepted by the speech endpoint.
pub const OUTPUT_FORMATS: [&str; 6] = ["mp3", "opus", "aac", "flac", "wav", "pcm"];

/// Option field name for the voice identifier.
pub const CONF_VOICE: &str = "voice";
/// Option field name for the synthesis model.
pub const CONF_MODEL: &str = "model";
/// Option field name for style instructions.
pub const CONF_INSTRUCTIONS: &str = "instructions";
/// Option field name for the audio output format.
pub const CONF_RESPONSE_FORMAT: &str = "response_format";

/// Every recognized per-call option, in cache-key field order.
pub const SUPPORTED_OPTIONS: [&str; 4] =
    [CONF_VOICE, CONF_MODEL, CONF_INSTRUCTIONS, CONF_RESPONSE_FORMAT];

/// Immutable entry data captured once by the setup flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryData {
    /// OpenAI API key used for every request of this entry
    pub api_key: String,
}

/// Mutable entry options managed through the options flow.
///
/// Every field is optional: an absent field means "use the built-in
/// default". `Some("")` for instructions is meaningful and distinct from
/// absent; the options flow stores blank instructions as the explicit
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryOptions {
    /// Default voice identifier for this entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// Default synthesis model for this entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Default style instructions for this entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Default audio output format for this entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
}

/// One configured instance of the provider, persisted by the host platform.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    /// Host-assigned identifier, stable for the lifetime of the entry
    pub entry_id: String,
    /// Human-readable title shown by the host platform
    pub title: String,
    /// Immutable setup data
    pub data: EntryData,
    /// Mutable options
    pub options: EntryOptions,
}

impl ConfigEntry {
    /// Creates an entry with the given id and API key and empty options.
    pub fn new(entry_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            entry_id: entry_id.into(),
            title: "OpenAI TTS".to_string(),
            data: EntryData {
                api_key: api_key.into(),
            },
            options: EntryOptions::default(),
        }
    }

    /// Replaces the mutable options, as the host does after an options flow.
    pub fn with_options(mut self, options: EntryOptions) -> Self {
        self.options = options;
        self
    }
}

/// Per-call overrides supplied with a single synthesis request.
///
/// A `Some` field overrides the stored configuration for that call only;
/// presence decides, not truthiness, so `Some(String::new())` wins over a
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOptions {
    /// Voice identifier override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// Synthesis model override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Style instructions override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Audio output format override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
}

impl CallOptions {
    /// Creates an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the voice override.
    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Sets the model override.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the instructions override.
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Sets the output format override.
    pub fn response_format(mut self, response_format: impl Into<String>) -> Self {
        self.response_format = Some(response_format.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_options_skip_absent_fields() {
        let options = EntryOptions {
            model: Some("tts-1".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"model":"tts-1"}"#);
    }

    #[test]
    fn call_options_builder() {
        let options = CallOptions::new().voice("nova").instructions("");
        assert_eq!(options.voice.as_deref(), Some("nova"));
        assert_eq!(options.instructions.as_deref(), Some(""));
        assert!(options.model.is_none());
        assert!(options.response_format.is_none());
    }

    #[test]
    fn config_entry_defaults() {
        let entry = ConfigEntry::new("entry-1", "sk-test");
        assert_eq!(entry.title, "OpenAI TTS");
        assert_eq!(entry.data.api_key, "sk-test");
        assert_eq!(entry.options, EntryOptions::default());
    }
}
