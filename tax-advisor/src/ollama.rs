//! Locally hosted models served by Ollama.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{AdviceBackend, NO_RESPONSE};
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::registry::AdvisorFactory;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "mistral";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// Calls `POST {endpoint}/api/generate` with streaming disabled.
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaBackend {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint)
    }
}

#[async_trait]
impl AdviceBackend for OllamaBackend {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    async fn generate(
        &self,
        prompt: &str,
    ) -> Result<String, AdvisorError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, raw = %body, "ollama raw response");

        if !status.is_success() {
            return Err(api_error(status.as_u16(), body));
        }

        parse_generate_response(&body)
    }
}

/// Extracts the generated text from an `/api/generate` reply.
///
/// A reply without a `response` field yields [`NO_RESPONSE`].
pub fn parse_generate_response(body: &str) -> Result<String, AdvisorError> {
    let parsed: GenerateResponse = serde_json::from_str(body)?;
    Ok(parsed.response.unwrap_or_else(|| NO_RESPONSE.to_string()))
}

fn api_error(
    status: u16,
    body: String,
) -> AdvisorError {
    let message = serde_json::from_str::<OllamaError>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    AdvisorError::Api { status, message }
}

/// Registers under `"ollama"`; no API key needed.
pub struct OllamaFactory;

impl AdvisorFactory for OllamaFactory {
    fn backend_name(&self) -> &'static str {
        "ollama"
    }

    fn create(
        &self,
        config: &AdvisorConfig,
    ) -> Result<Box<dyn AdviceBackend>, AdvisorError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);

        Ok(Box::new(OllamaBackend::new(client, endpoint, model)))
    }
}
