//! Thin client for the OpenAI speech API.
//!
//! One endpoint, one request per synthesis call, no retry: transient
//! failures surface as errors and the host platform decides what to do.

use crate::error::TtsError;
use crate::options::ResolvedOptions;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use std::time::Duration;

/// Default base URL for the OpenAI API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";

/// Body sent to `audio/speech`.
///
/// `instructions` is omitted from the wire entirely when there is nothing
/// meaningful to say; the API may treat an explicitly empty field
/// differently from an absent one.
#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
}

/// Client for the OpenAI speech API.
pub struct OpenAiClient {
    /// API key for bearer authentication
    api_key: String,
    /// Base URL for API requests
    base_url: Url,
    /// Optional per-request timeout in seconds
    timeout_seconds: Option<u64>,
    /// HTTP client for making requests
    client: Client,
}

impl OpenAiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for authentication
    /// * `base_url` - Base URL override (proxies, tests); `None` uses the
    ///   public API
    /// * `timeout_seconds` - Optional timeout applied to every request
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, TtsError> {
        let mut base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // Url::join drops the last path segment without this.
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url =
            Url::parse(&base).map_err(|e| TtsError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            api_key: api_key.into(),
            base_url,
            timeout_seconds,
            client: Client::new(),
        })
    }

    /// Validates the API key with a lightweight `models` listing call.
    ///
    /// Used by the setup flow to reject a bad key before it is persisted.
    pub async fn validate_key(&self) -> Result<(), TtsError> {
        if self.api_key.is_empty() {
            return Err(TtsError::Auth("Missing OpenAI API key".into()));
        }

        let url = self
            .base_url
            .join("models")
            .map_err(|e| TtsError::Http(e.to_string()))?;

        let mut req = self.client.get(url).bearer_auth(&self.api_key);
        if let Some(t) = self.timeout_seconds {
            req = req.timeout(Duration::from_secs(t));
        }

        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        log::debug!("key validation failed with HTTP {}: {}", status, body);
        Err(classify_status(status, body))
    }

    /// Synthesizes speech for `message` with the given resolved options.
    ///
    /// Returns the response format together with the raw audio bytes.
    /// Instructions are put on the wire only when non-blank after
    /// normalization; the `ResolvedOptions` invariant guarantees the field
    /// is already `""` in every "nothing to say" case.
    pub async fn speech(
        &self,
        message: &str,
        options: &ResolvedOptions,
    ) -> Result<(String, Vec<u8>), TtsError> {
        if self.api_key.is_empty() {
            return Err(TtsError::Auth("Missing OpenAI API key".into()));
        }

        let url = self
            .base_url
            .join("audio/speech")
            .map_err(|e| TtsError::Http(e.to_string()))?;

        let instructions = if options.instructions.trim().is_empty() {
            None
        } else {
            Some(options.instructions.as_str())
        };

        let body = SpeechRequest {
            model: &options.model,
            input: message,
            voice: &options.voice,
            response_format: &options.response_format,
            instructions,
        };

        log::debug!(
            "TTS request - model: {}, voice: {}, format: {}, instructions: {}",
            options.model,
            options.voice,
            options.response_format,
            if instructions.is_some() { "set" } else { "omitted" }
        );

        let mut req = self.client.post(url).bearer_auth(&self.api_key).json(&body);
        if let Some(t) = self.timeout_seconds {
            req = req.timeout(Duration::from_secs(t));
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            log::debug!("speech call failed with HTTP {}: {}", status, body);
            return Err(classify_status(status, body));
        }

        let audio = resp.bytes().await?;
        Ok((options.response_format.clone(), audio.to_vec()))
    }
}

/// Maps a non-success HTTP status onto the error taxonomy.
fn classify_status(status: StatusCode, body: String) -> TtsError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            TtsError::Auth(format!("HTTP {}: {}", status, body))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            TtsError::RateLimit(format!("HTTP {}: {}", status, body))
        }
        _ => TtsError::Provider(format!("HTTP {}: {}", status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(instructions: &str) -> ResolvedOptions {
        ResolvedOptions {
            voice: "echo".to_string(),
            model: "gpt-4o-mini-tts".to_string(),
            instructions: instructions.to_string(),
            response_format: "mp3".to_string(),
        }
    }

    #[test]
    fn speech_request_omits_blank_instructions() {
        let body = SpeechRequest {
            model: "gpt-4o-mini-tts",
            input: "Hello",
            voice: "echo",
            response_format: "mp3",
            instructions: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("instructions").is_none());
        assert_eq!(value["voice"], "echo");
    }

    #[test]
    fn speech_request_carries_real_instructions() {
        let body = SpeechRequest {
            model: "gpt-4o-mini-tts",
            input: "Hello",
            voice: "echo",
            response_format: "mp3",
            instructions: Some("speak slowly"),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["instructions"], "speak slowly");
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            OpenAiClient::new("sk-test", Some("http://localhost:8080/v1".to_string()), None)
                .unwrap();
        assert_eq!(client.base_url.as_str(), "http://localhost:8080/v1/");
        assert_eq!(
            client.base_url.join("audio/speech").unwrap().as_str(),
            "http://localhost:8080/v1/audio/speech"
        );
    }

    #[test]
    fn status_classification_matches_the_taxonomy() {
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, String::new()),
            TtsError::Auth(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            TtsError::RateLimit(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, String::new()),
            TtsError::Provider(_)
        ));
    }

    #[tokio::test]
    async fn empty_api_key_is_rejected_before_any_request() {
        let client = OpenAiClient::new("", None, None).unwrap();
        assert!(matches!(
            client.speech("Hello", &resolved("")).await,
            Err(TtsError::Auth(_))
        ));
        assert!(matches!(
            client.validate_key().await,
            Err(TtsError::Auth(_))
        ));
    }
}
