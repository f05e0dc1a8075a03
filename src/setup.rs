//! Setup and options flows.
//!
//! The host platform renders the forms; these flows validate submitted
//! input and translate every failure into a field error code the UI can
//! show. No error escapes a `submit` uncaught.

use crate::client::OpenAiClient;
use crate::config::{
    EntryData, EntryOptions, CONF_INSTRUCTIONS, CONF_MODEL, CONF_RESPONSE_FORMAT, CONF_VOICE,
    DEFAULT_INSTRUCTIONS, DEFAULT_MODEL, DEFAULT_RESPONSE_FORMAT, DEFAULT_VOICE, OPENAI_MODELS,
    OPENAI_VOICES, OUTPUT_FORMATS,
};
use crate::error::TtsError;
use crate::options::normalize_instructions;
use std::collections::HashMap;

/// Field name used for API-key errors in the setup form.
pub const FIELD_API_KEY: &str = "api_key";

/// Outcome of submitting the setup form.
#[derive(Debug)]
pub enum SetupOutcome {
    /// The key validated; the host should persist a new entry
    CreateEntry {
        /// Title for the new entry
        title: String,
        /// Immutable entry data
        data: EntryData,
    },
    /// Validation failed; field name to error code
    Errors(HashMap<&'static str, String>),
}

/// Outcome of submitting the options form.
#[derive(Debug)]
pub enum OptionsOutcome {
    /// The input validated; the host should persist the new options
    UpdateOptions(EntryOptions),
    /// Validation failed; field name to error code
    Errors(HashMap<&'static str, String>),
}

/// The one-step setup flow: collect and validate an API key.
#[derive(Debug, Default)]
pub struct SetupFlow {
    /// Base URL override forwarded to the validation client
    base_url: Option<String>,
}

impl SetupFlow {
    /// Creates a setup flow against the public API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the validation call at another base URL (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Validates the submitted API key and decides the flow outcome.
    pub async fn submit(&self, api_key: &str) -> SetupOutcome {
        if let Some(code) = self.validate_api_key(api_key).await {
            let mut errors = HashMap::new();
            errors.insert(FIELD_API_KEY, code);
            return SetupOutcome::Errors(errors);
        }

        SetupOutcome::CreateEntry {
            title: "OpenAI TTS".to_string(),
            data: EntryData {
                api_key: api_key.to_string(),
            },
        }
    }

    /// Returns `None` when the key is valid, otherwise the error code for
    /// the form.
    async fn validate_api_key(&self, api_key: &str) -> Option<String> {
        let client = match OpenAiClient::new(api_key, self.base_url.clone(), None) {
            Ok(client) => client,
            Err(e) => return Some(format!("unknown_error: {}", e)),
        };

        match client.validate_key().await {
            Ok(()) => None,
            Err(TtsError::Auth(_)) => Some("invalid_auth".to_string()),
            Err(TtsError::RateLimit(_)) => Some("rate_limit".to_string()),
            Err(TtsError::Http(_)) => Some("cannot_connect".to_string()),
            Err(e @ (TtsError::Provider(_) | TtsError::ResponseFormat { .. })) => {
                Some(format!("openai_error: {}", e))
            }
            Err(e) => Some(format!("unknown_error: {}", e)),
        }
    }
}

/// The options flow: edit the mutable per-entry settings.
#[derive(Debug)]
pub struct OptionsFlow {
    current: EntryOptions,
}

impl OptionsFlow {
    /// Creates an options flow over the entry's current options.
    pub fn new(current: EntryOptions) -> Self {
        Self { current }
    }

    /// Current values with built-in defaults filled in, for rendering the
    /// form. Instructions come back as an explicit string, never absent.
    pub fn form_defaults(&self) -> EntryOptions {
        EntryOptions {
            voice: Some(
                self.current
                    .voice
                    .clone()
                    .unwrap_or_else(|| DEFAULT_VOICE.to_string()),
            ),
            model: Some(
                self.current
                    .model
                    .clone()
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            ),
            instructions: Some(normalize_instructions(
                self.current.instructions.as_deref().or(Some(DEFAULT_INSTRUCTIONS)),
            )),
            response_format: Some(
                self.current
                    .response_format
                    .clone()
                    .unwrap_or_else(|| DEFAULT_RESPONSE_FORMAT.to_string()),
            ),
        }
    }

    /// Validates submitted options and decides the flow outcome.
    ///
    /// Choice fields must come from their fixed enumerations; blank
    /// instructions are stored as the explicit empty string so the entry
    /// never carries a whitespace-only value.
    pub fn submit(&self, mut input: EntryOptions) -> OptionsOutcome {
        let mut errors: HashMap<&'static str, String> = HashMap::new();

        if let Some(voice) = &input.voice {
            if !OPENAI_VOICES.contains(&voice.to_lowercase().as_str()) {
                errors.insert(CONF_VOICE, "invalid_option".to_string());
            }
        }
        if let Some(model) = &input.model {
            if !OPENAI_MODELS.contains(&model.as_str()) {
                errors.insert(CONF_MODEL, "invalid_option".to_string());
            }
        }
        if let Some(format) = &input.response_format {
            if !OUTPUT_FORMATS.contains(&format.as_str()) {
                errors.insert(CONF_RESPONSE_FORMAT, "invalid_option".to_string());
            }
        }

        if !errors.is_empty() {
            return OptionsOutcome::Errors(errors);
        }

        if let Some(instructions) = input.instructions.take() {
            let normalized = normalize_instructions(Some(instructions.as_str()));
            if normalized != instructions {
                log::debug!("storing blank {} as empty string", CONF_INSTRUCTIONS);
            }
            input.instructions = Some(normalized);
        }

        OptionsOutcome::UpdateOptions(input)
    }
}
