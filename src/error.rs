use std::fmt;

/// Error types that can occur when talking to the OpenAI speech API.
#[derive(Debug)]
pub enum TtsError {
    /// Authentication failure (invalid or revoked API key)
    Auth(String),
    /// The API rejected the request because of rate limiting
    RateLimit(String),
    /// HTTP transport errors (connectivity, DNS, timeouts)
    Http(String),
    /// Errors reported by the remote API itself
    Provider(String),
    /// The API answered with something we could not interpret
    ResponseFormat {
        /// What went wrong while interpreting the response
        message: String,
        /// The raw response body, kept for diagnostics
        raw_response: String,
    },
    /// Invalid request parameters or configuration
    InvalidRequest(String),
    /// JSON serialization/deserialization errors
    Json(String),
}

impl fmt::Display for TtsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TtsError::Auth(e) => write!(f, "Auth Error: {}", e),
            TtsError::RateLimit(e) => write!(f, "Rate Limit Error: {}", e),
            TtsError::Http(e) => write!(f, "HTTP Error: {}", e),
            TtsError::Provider(e) => write!(f, "Provider Error: {}", e),
            TtsError::ResponseFormat {
                message,
                raw_response,
            } => write!(
                f,
                "Response Format Error: {} (raw: {})",
                message, raw_response
            ),
            TtsError::InvalidRequest(e) => write!(f, "Invalid Request: {}", e),
            TtsError::Json(e) => write!(f, "JSON Parse Error: {}", e),
        }
    }
}

impl std::error::Error for TtsError {}

/// Converts reqwest transport errors into TtsErrors
impl From<reqwest::Error> for TtsError {
    fn from(err: reqwest::Error) -> Self {
        TtsError::Http(err.to_string())
    }
}

/// Converts JSON errors into TtsErrors
impl From<serde_json::Error> for TtsError {
    fn from(err: serde_json::Error) -> Self {
        TtsError::Json(err.to_string())
    }
}
