//! Google's hosted Gemini models via the `generateContent` REST endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{AdviceBackend, NO_RESPONSE};
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::registry::AdvisorFactory;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Calls `POST {endpoint}/v1beta/models/{model}:generateContent`.
#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

#[async_trait]
impl AdviceBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate(
        &self,
        prompt: &str,
    ) -> Result<String, AdvisorError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, raw = %body, "gemini raw response");

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AdvisorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_generate_content_response(&body)
    }
}

/// Joins the text parts of the first candidate.
///
/// A reply with no candidates (for example a blocked prompt) yields
/// [`NO_RESPONSE`].
pub fn parse_generate_content_response(body: &str) -> Result<String, AdvisorError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)?;

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        Ok(NO_RESPONSE.to_string())
    } else {
        Ok(text)
    }
}

/// Registers under `"gemini"`; requires an API key.
pub struct GeminiFactory;

impl AdvisorFactory for GeminiFactory {
    fn backend_name(&self) -> &'static str {
        "gemini"
    }

    fn create(
        &self,
        config: &AdvisorConfig,
    ) -> Result<Box<dyn AdviceBackend>, AdvisorError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AdvisorError::MissingApiKey("Gemini"))?;
        let client = Client::builder().timeout(config.timeout).build()?;
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);

        Ok(Box::new(GeminiBackend::new(client, endpoint, model, api_key)))
    }
}
