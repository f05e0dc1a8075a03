//! The speech-synthesis provider surface consumed by the host platform.

use crate::cache;
use crate::client::OpenAiClient;
use crate::config::{CallOptions, ConfigEntry, DEFAULT_RESPONSE_FORMAT};
use crate::error::TtsError;
use crate::options::{self, resolve_options, Voice};
use crate::SpeechProvider;
use async_trait::async_trait;

/// Languages the gpt-4o-mini-tts model handles.
const SUPPORTED_LANGUAGES: [&str; 31] = [
    "en", "ja", "zh", "de", "hi", "fr", "ko", "pt", "it", "es", "id", "nl", "tr", "fil", "pl",
    "sv", "bg", "ro", "ar", "cs", "el", "fi", "hr", "ms", "sk", "da", "ta", "uk", "vi", "hu",
    "no",
];

/// OpenAI speech-synthesis provider bound to one configuration entry.
pub struct OpenAiTtsProvider {
    entry: ConfigEntry,
    client: OpenAiClient,
    unique_id: String,
    name: String,
}

impl OpenAiTtsProvider {
    /// Creates a provider for the given entry using the given client.
    pub fn new(entry: ConfigEntry, client: OpenAiClient) -> Self {
        let unique_id = format!("{}-tts", entry.entry_id);
        log::debug!("initialized TTS provider with unique_id: {}", unique_id);
        Self {
            entry,
            client,
            unique_id,
            name: "OpenAI TTS".to_string(),
        }
    }

    /// Provider display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stable identifier, derived from the entry id.
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Language assumed when the caller does not specify one.
    pub fn default_language(&self) -> &'static str {
        "en"
    }

    /// Languages this provider accepts.
    pub fn supported_languages(&self) -> &'static [&'static str] {
        &SUPPORTED_LANGUAGES
    }

    /// Audio output the provider produces when nothing else is asked for.
    pub fn default_audio_output(&self) -> &'static str {
        DEFAULT_RESPONSE_FORMAT
    }
}

#[async_trait]
impl SpeechProvider for OpenAiTtsProvider {
    /// Synthesizes `message`, merging per-call options over the entry's
    /// stored options over built-in defaults, and returns the audio format
    /// together with the raw bytes. Remote failures propagate; an unknown
    /// voice never fails the call.
    async fn synthesize(
        &self,
        message: &str,
        language: &str,
        call_options: Option<&CallOptions>,
    ) -> Result<(String, Vec<u8>), TtsError> {
        log::debug!(
            "synthesize called, language: {}, message length: {}",
            language,
            message.len()
        );
        let default_options = CallOptions::default();
        let call = call_options.unwrap_or(&default_options);
        let resolved = resolve_options(call, &self.entry.options);
        self.client.speech(message, &resolved).await
    }

    /// Derives the deterministic cache key for `message` under the
    /// effective option set of this entry.
    fn cache_key(&self, message: &str, language: &str, call_options: Option<&CallOptions>) -> String {
        let default_options = CallOptions::default();
        let call = call_options.unwrap_or(&default_options);
        cache::cache_key(message, language, call, &self.entry.options)
    }

    /// The fixed, ordered voice list.
    fn supported_voices(&self) -> Vec<Voice> {
        options::supported_voices()
    }
}
