//! Advisory text for a tax assessment.
//!
//! Builds a prompt from the calculator's output and forwards it to a
//! swappable text-generation service. Two services are built in: a local
//! Ollama server and Google's hosted Gemini API.

pub mod backend;
pub mod config;
pub mod error;
pub mod gemini;
pub mod ollama;
pub mod prompts;
pub mod registry;

pub use backend::{AdviceBackend, NO_RESPONSE, request_advice};
pub use config::AdvisorConfig;
pub use error::AdvisorError;
pub use gemini::{GeminiBackend, GeminiFactory};
pub use ollama::{OllamaBackend, OllamaFactory};
pub use prompts::{
    EntityType, FilerDetails, Language, ParseOptionError, PromptOptions, PromptTemplate,
    advice_prompt, question_prompt,
};
pub use registry::{AdvisorFactory, AdvisorRegistry};
