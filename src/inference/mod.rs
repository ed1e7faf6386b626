//! Inference client: a single chat-completion call per itinerary request.
//! No retries, no streaming, no timeout override.

pub mod ollama;

use async_trait::async_trait;
use thiserror::Error;

pub use ollama::OllamaClient;

/// Errors from the inference call. Note that the itinerary service converts
/// these into itinerary *text*; they never reach the web boundary as errors.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unusable response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Submit one user-role prompt and return the model's reply verbatim.
    async fn chat(&self, prompt: &str) -> Result<String, InferenceError>;
}
