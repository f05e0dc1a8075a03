//! OpenAI text-to-speech synthesis provider for host automation platforms.
//!
//! # Overview
//! This crate exposes OpenAI's speech API as a speech-synthesis provider:
//! the host platform stores configuration, schedules calls and caches
//! audio; this crate resolves options, derives cache keys and performs the
//! single outbound synthesis request. It supports:
//!
//! - Per-call option overrides merged over stored configuration over
//!   built-in defaults
//! - Deterministic cache-key derivation over the effective option set
//! - Setup/options flows with API-key validation and field-level errors
//! - An explicit provider registry driven by the host's entry lifecycle
//!
//! # Architecture
//! The crate is organized into modules that handle different aspects of the
//! provider:

// Re-export for convenience
pub use async_trait::async_trait;

/// Deterministic cache-key derivation for synthesis requests
pub mod cache;

/// Thin client for the OpenAI speech API
pub mod client;

/// Configuration surface: constants, entry data/options, call options
pub mod config;

/// Error types and handling
pub mod error;

/// Option resolution and the instruction normalizer
pub mod options;

/// The provider implementation bound to a configuration entry
pub mod provider;

/// Provider registry and entry lifecycle
pub mod registry;

/// Setup and options flows
pub mod setup;

pub use config::{CallOptions, ConfigEntry, EntryData, EntryOptions};
pub use error::TtsError;
pub use options::Voice;
pub use provider::OpenAiTtsProvider;
pub use registry::ProviderRegistry;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
/// This is a no-op if the feature is not enabled.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

/// The seam the host platform consumes: synthesis, cache-key derivation and
/// voice listing for one configured provider.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Converts `message` into speech audio.
    ///
    /// # Arguments
    ///
    /// * `message` - Text to synthesize
    /// * `language` - Language tag of the text
    /// * `call_options` - Per-call overrides, if any
    ///
    /// # Returns
    ///
    /// * `Ok((String, Vec<u8>))` - The audio format and the raw bytes
    /// * `Err(TtsError)` - What went wrong with the remote call
    async fn synthesize(
        &self,
        message: &str,
        language: &str,
        call_options: Option<&config::CallOptions>,
    ) -> Result<(String, Vec<u8>), error::TtsError>;

    /// Derives the deterministic cache key identifying this request.
    fn cache_key(
        &self,
        message: &str,
        language: &str,
        call_options: Option<&config::CallOptions>,
    ) -> String;

    /// The ordered list of voice descriptors this provider supports.
    fn supported_voices(&self) -> Vec<options::Voice>;
}
