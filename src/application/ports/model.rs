//! Generative model port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::speech::AudioPayload;

/// Generative model errors
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty model response")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for the generative model behind every pipeline stage.
///
/// Each call is one structured prompt; the reply is the model's raw text,
/// which the calling stage decodes and validates against its own schema.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send a text prompt and return the model's raw reply.
    async fn generate_text(&self, prompt: &str) -> Result<String, ModelError>;

    /// Send a text prompt together with an inline audio clip.
    async fn generate_with_audio(
        &self,
        prompt: &str,
        audio: &AudioPayload,
    ) -> Result<String, ModelError>;
}
