use async_trait::async_trait;
use tracing::{debug, error};

use crate::error::AdvisorError;

/// Text shown when a service answers but produces no usable text.
pub const NO_RESPONSE: &str = "Could not generate a response.";

/// One-shot text completion: a prompt goes in, free text comes out.
///
/// Implementations differ only in which service they call. Everything
/// upstream (the calculator, the prompt builder, the CLI) is shared.
#[async_trait]
pub trait AdviceBackend: Send + Sync {
    /// Display name used in diagnostics, e.g. `"Ollama"`.
    fn name(&self) -> &'static str;

    /// Sends `prompt` and returns the generated text.
    async fn generate(
        &self,
        prompt: &str,
    ) -> Result<String, AdvisorError>;
}

/// Requests advice and always returns something displayable.
///
/// Service failures become `"<Backend> Error: <detail>"` and an empty
/// answer becomes [`NO_RESPONSE`]; neither is propagated to the caller.
pub async fn request_advice(
    backend: &dyn AdviceBackend,
    prompt: &str,
) -> String {
    debug!(backend = backend.name(), prompt_len = prompt.len(), "requesting advice");

    match backend.generate(prompt).await {
        Ok(text) if text.trim().is_empty() => NO_RESPONSE.to_string(),
        Ok(text) => text,
        Err(error) => {
            error!(backend = backend.name(), %error, "advice request failed");
            format!("{} Error: {error}", backend.name())
        }
    }
}
