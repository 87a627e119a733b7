use std::fmt;
use std::time::Duration;

/// Backend-agnostic settings for the advisory text service.
///
/// `backend` must match the [`AdvisorFactory::backend_name`] of a registered
/// factory. Fields left as `None` fall back to that backend's defaults.
///
/// | backend  | default model      | default endpoint                              | api key  |
/// |----------|--------------------|-----------------------------------------------|----------|
/// | `ollama` | `mistral`          | `http://localhost:11434`                      | unused   |
/// | `gemini` | `gemini-1.5-flash` | `https://generativelanguage.googleapis.com`   | required |
///
/// [`AdvisorFactory::backend_name`]: crate::AdvisorFactory::backend_name
#[derive(Clone, PartialEq, Eq)]
pub struct AdvisorConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"ollama"`).
    pub backend: String,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    /// Upper bound on a single request's round trip.
    pub timeout: Duration,
}

impl AdvisorConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            ..Default::default()
        }
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            backend: "ollama".to_string(),
            model: None,
            endpoint: None,
            api_key: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

// Hand-written so the API key never reaches a log line.
impl fmt::Debug for AdvisorConfig {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("AdvisorConfig")
            .field("backend", &self.backend)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
