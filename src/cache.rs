//! Deterministic cache-key derivation for synthesis requests.
//!
//! The host platform caches synthesized audio keyed by the digest computed
//! here; two requests that would produce the same audio must hash to the
//! same key, and any option difference that changes the audio must change
//! it.

use crate::config::{
    CallOptions, EntryOptions, CONF_INSTRUCTIONS, CONF_MODEL, CONF_RESPONSE_FORMAT, CONF_VOICE,
    SUPPORTED_OPTIONS,
};
use crate::options::normalize_instructions;
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;

/// Derives the cache key for one synthesis request.
///
/// The effective option set is the per-call options with stored
/// configuration copied in for every supported field the call did not force
/// itself, so changing a stored default changes the key only when the caller
/// left that field alone. Instructions are normalized and dropped entirely
/// when blank, making "no instructions" and "blank instructions" the same
/// cache entry. The map is serialized with sorted keys and stable
/// separators, concatenated with the message and language, and hashed with
/// SHA-1, rendered as 40 lowercase hex characters.
///
/// The result is a pure function of `(message, language, effective
/// options)`: no iteration order, timestamps or randomness are involved.
pub fn cache_key(
    message: &str,
    language: &str,
    call: &CallOptions,
    stored: &EntryOptions,
) -> String {
    let mut effective: BTreeMap<&str, String> = BTreeMap::new();

    if let Some(v) = &call.voice {
        effective.insert(CONF_VOICE, v.clone());
    }
    if let Some(v) = &call.model {
        effective.insert(CONF_MODEL, v.clone());
    }
    if let Some(v) = &call.instructions {
        effective.insert(CONF_INSTRUCTIONS, v.clone());
    }
    if let Some(v) = &call.response_format {
        effective.insert(CONF_RESPONSE_FORMAT, v.clone());
    }

    for field in SUPPORTED_OPTIONS {
        if effective.contains_key(field) {
            continue;
        }
        let stored_value = match field {
            CONF_VOICE => stored.voice.as_deref(),
            CONF_MODEL => stored.model.as_deref(),
            CONF_INSTRUCTIONS => stored.instructions.as_deref(),
            CONF_RESPONSE_FORMAT => stored.response_format.as_deref(),
            _ => None,
        };
        if let Some(value) = stored_value {
            effective.insert(field, value.to_string());
        }
    }

    let instructions =
        normalize_instructions(effective.get(CONF_INSTRUCTIONS).map(String::as_str));
    if instructions.is_empty() {
        effective.remove(CONF_INSTRUCTIONS);
    } else {
        effective.insert(CONF_INSTRUCTIONS, instructions);
    }

    // BTreeMap serializes with sorted keys; serde_json's compact form gives
    // the stable `,`/`:` separators.
    let options_json =
        serde_json::to_string(&effective).unwrap_or_else(|_| "{}".to_string());

    let key_base = format!("{}_{}_{}", message, language, options_json);
    log::trace!("cache key base: {}", key_base);

    let mut hasher = Sha1::new();
    hasher.update(key_base.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_give_identical_keys() {
        let call = CallOptions::new().voice("nova").model("tts-1");
        let stored = EntryOptions {
            response_format: Some("wav".to_string()),
            ..Default::default()
        };
        let a = cache_key("Hello world", "en", &call, &stored);
        let b = cache_key("Hello world", "en", &call, &stored);
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn blank_instruction_variants_share_one_key() {
        let stored = EntryOptions::default();
        let none = cache_key("Hello world", "en", &CallOptions::new(), &stored);
        let empty = cache_key(
            "Hello world",
            "en",
            &CallOptions::new().instructions(""),
            &stored,
        );
        let blank = cache_key(
            "Hello world",
            "en",
            &CallOptions::new().instructions("   "),
            &stored,
        );
        assert_eq!(none, empty);
        assert_eq!(none, blank);
    }

    #[test]
    fn real_instructions_change_the_key() {
        let stored = EntryOptions::default();
        let without = cache_key("Hello world", "en", &CallOptions::new(), &stored);
        let with = cache_key(
            "Hello world",
            "en",
            &CallOptions::new().instructions("speak slowly"),
            &stored,
        );
        assert_ne!(without, with);
    }

    #[test]
    fn stored_defaults_flow_into_the_key_when_not_overridden() {
        let empty = EntryOptions::default();
        let stored = EntryOptions {
            voice: Some("nova".to_string()),
            ..Default::default()
        };
        let call = CallOptions::new();
        assert_ne!(
            cache_key("Hi", "en", &call, &empty),
            cache_key("Hi", "en", &call, &stored)
        );
    }

    #[test]
    fn call_override_masks_stored_value_in_the_key() {
        let stored_a = EntryOptions {
            voice: Some("nova".to_string()),
            ..Default::default()
        };
        let stored_b = EntryOptions {
            voice: Some("onyx".to_string()),
            ..Default::default()
        };
        let call = CallOptions::new().voice("echo");
        // The caller forced its own voice, so the stored default is invisible.
        assert_eq!(
            cache_key("Hi", "en", &call, &stored_a),
            cache_key("Hi", "en", &call, &stored_b)
        );
    }

    #[test]
    fn message_and_language_are_part_of_the_key() {
        let call = CallOptions::new();
        let stored = EntryOptions::default();
        let base = cache_key("Hello", "en", &call, &stored);
        assert_ne!(base, cache_key("Hello!", "en", &call, &stored));
        assert_ne!(base, cache_key("Hello", "de", &call, &stored));
    }

    #[test]
    fn every_supported_option_is_key_sensitive() {
        let stored = EntryOptions::default();
        let base = cache_key("Hi", "en", &CallOptions::new(), &stored);
        let variants = [
            CallOptions::new().voice("nova"),
            CallOptions::new().model("tts-1-hd"),
            CallOptions::new().instructions("cheerful"),
            CallOptions::new().response_format("flac"),
        ];
        for call in &variants {
            assert_ne!(base, cache_key("Hi", "en", call, &stored));
        }
    }

    #[test]
    fn caller_options_are_not_mutated() {
        let call = CallOptions::new().instructions("   ");
        let before = call.clone();
        let _ = cache_key("Hi", "en", &call, &EntryOptions::default());
        assert_eq!(call, before);
    }

    #[test]
    fn blank_stored_instructions_match_absent_stored_instructions() {
        let without = EntryOptions::default();
        let with_blank = EntryOptions {
            instructions: Some("  ".to_string()),
            ..Default::default()
        };
        let call = CallOptions::new();
        assert_eq!(
            cache_key("Hi", "en", &call, &without),
            cache_key("Hi", "en", &call, &with_blank)
        );
    }
}
