use thiserror::Error;

/// Failures from the advisory text service.
///
/// None of these are fatal to a caller that goes through
/// [`request_advice`](crate::request_advice), which turns them into a
/// user-visible diagnostic string.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no API key configured for {0}")]
    MissingApiKey(&'static str),

    #[error("configuration error: {0}")]
    Configuration(String),
}
