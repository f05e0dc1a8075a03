//! Option resolution: per-call overrides merged over stored configuration
//! over built-in defaults, plus the instruction normalizer shared with the
//! cache-key builder.

use crate::config::{
    CallOptions, EntryOptions, DEFAULT_INSTRUCTIONS, DEFAULT_MODEL, DEFAULT_RESPONSE_FORMAT,
    DEFAULT_VOICE, OPENAI_VOICES,
};
use serde::{Deserialize, Serialize};

/// A voice preset as shown to the host platform's UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Identifier sent to the API
    pub voice_id: String,
    /// Display name
    pub name: String,
}

/// Returns the fixed, ordered list of voice descriptors.
///
/// OpenAI voices are predefined by the API, so the list is static; display
/// names are the capitalized identifiers.
pub fn supported_voices() -> Vec<Voice> {
    OPENAI_VOICES
        .iter()
        .map(|id| Voice {
            voice_id: id.to_string(),
            name: capitalize(id),
        })
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Looks up a voice by identifier, case-insensitively.
///
/// Returns the canonical (lowercase) identifier, or `None` when the
/// identifier is not one of the supported voices. A miss is a value, not an
/// error; callers fall back to the configured default.
pub fn find_voice(identifier: &str) -> Option<&'static str> {
    let identifier = identifier.to_lowercase();
    match OPENAI_VOICES.iter().find(|v| **v == identifier) {
        Some(v) => Some(*v),
        None => {
            log::warn!("Could not find voice with identifier {}", identifier);
            None
        }
    }
}

/// Normalizes an instructions value so every consumer agrees on "blank".
///
/// `None`, the empty string and whitespace-only strings all normalize to the
/// empty string; any other value is returned unchanged. Applied identically
/// for synthesis calls and cache-key derivation, so "no instructions" and
/// "blank instructions" share one cache entry and one outgoing request
/// shape.
pub fn normalize_instructions(raw: Option<&str>) -> String {
    match raw {
        None => {
            log::trace!("normalize_instructions: converting absent value to empty string");
            String::new()
        }
        Some(s) if s.trim().is_empty() => {
            log::trace!("normalize_instructions: converting blank value to empty string");
            String::new()
        }
        Some(s) => s.to_string(),
    }
}

/// The fully materialized parameter set for one synthesis request.
///
/// Invariant: every field is non-empty except `instructions`, which is the
/// empty string when unset or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Canonical voice identifier, guaranteed to be a supported voice
    pub voice: String,
    /// Synthesis model
    pub model: String,
    /// Normalized style instructions, `""` when there is nothing to say
    pub instructions: String,
    /// Audio output format
    pub response_format: String,
}

/// Merges call-time options over stored options over built-in defaults.
///
/// Precedence is presence-based for every field: a `Some` value wins even
/// when it is the empty string. Instructions pass through
/// [`normalize_instructions`] regardless of which layer supplied them.
/// Unrecognized voice identifiers degrade to the configured default voice
/// (the stored voice when that is itself recognized, else the built-in
/// default) instead of failing the call.
pub fn resolve_options(call: &CallOptions, stored: &EntryOptions) -> ResolvedOptions {
    let requested_voice = call
        .voice
        .as_deref()
        .or(stored.voice.as_deref())
        .unwrap_or(DEFAULT_VOICE);

    let voice = match find_voice(requested_voice) {
        Some(v) => v.to_string(),
        None => default_voice(stored),
    };

    let model = call
        .model
        .as_deref()
        .or(stored.model.as_deref())
        .unwrap_or(DEFAULT_MODEL)
        .to_string();

    let response_format = call
        .response_format
        .as_deref()
        .or(stored.response_format.as_deref())
        .unwrap_or(DEFAULT_RESPONSE_FORMAT)
        .to_string();

    let instructions = normalize_instructions(Some(
        call.instructions
            .as_deref()
            .or(stored.instructions.as_deref())
            .unwrap_or(DEFAULT_INSTRUCTIONS),
    ));

    ResolvedOptions {
        voice,
        model,
        instructions,
        response_format,
    }
}

/// The voice used when lookup fails: the stored default when it is itself a
/// recognized identifier, the built-in default otherwise.
fn default_voice(stored: &EntryOptions) -> String {
    stored
        .voice
        .as_deref()
        .and_then(find_voice)
        .unwrap_or(DEFAULT_VOICE)
        .to_string()
}
