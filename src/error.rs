use std::fmt;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API key not set. Pass --api-key, set YOUTUBE_API_KEY or run `yt-scout init`.")]
    ApiKeyMissing,

    #[error("YouTube API error: {0}")]
    Api(ApiError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Structured failure reported by the remote service, as opposed to
    /// transport, decoding or local failures.
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    /// Probable cause to show next to the error, if one is known.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::Api(api) => Some(api.hint()),
            Error::ApiKeyMissing => Some("Create a key for the YouTube Data API v3 in the Google Cloud console."),
            _ => None,
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure returned by the YouTube Data API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub reason: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<u16>,
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}

impl ApiError {
    /// Decode the Google error envelope, falling back to the raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => Self {
                status: envelope.error.code.unwrap_or(status),
                reason: envelope.error.errors.into_iter().find_map(|e| e.reason),
                message: envelope
                    .error
                    .message
                    .unwrap_or_else(|| "Unknown error".to_string()),
            },
            Err(_) => Self {
                status,
                reason: None,
                message: if body.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.trim().to_string()
                },
            },
        }
    }

    pub fn hint(&self) -> &'static str {
        match self.reason.as_deref() {
            Some("quotaExceeded" | "dailyLimitExceeded" | "rateLimitExceeded") => {
                "The API quota is probably exhausted. Try again after the daily reset or lower --max-videos."
            }
            Some("keyInvalid" | "keyExpired") => "The API key is invalid. Check the key you entered.",
            Some("accessNotConfigured" | "forbidden" | "ipRefererBlocked") => {
                "The key is not allowed to call the YouTube Data API v3. Check the key's API restrictions."
            }
            _ if self.message.contains("API key not valid") => {
                "The API key is invalid. Check the key you entered."
            }
            _ if self.status == 400 => "The request was rejected. It may contain an invalid channel ID.",
            _ if self.status == 403 => "The API quota may be exhausted or the key may be restricted.",
            _ => "Check the API key and its quota in the Google Cloud console.",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{} ({}): {}", self.status, reason, self.message),
            None => write!(f, "{}: {}", self.status, self.message),
        }
    }
}
