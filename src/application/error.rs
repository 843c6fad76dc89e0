//! Pipeline failure taxonomy

use thiserror::Error;

use super::ports::{ModelError, SearchError};

/// The failure categories a pipeline stage can produce.
///
/// Stages return these typed failures; only the assistant translates them
/// into user-facing messages.
#[derive(Debug, Clone, Error)]
pub enum StageError {
    /// Caller-supplied data violates preconditions; no external call was made
    #[error("{0}")]
    InvalidRequest(String),

    /// A required credential or setting is missing
    #[error("{0}")]
    Configuration(String),

    /// A collaborator's response did not conform to the expected shape
    #[error("Response did not match the expected shape: {0}")]
    SchemaViolation(String),

    /// A collaborator succeeded but returned no usable data
    #[error("No usable data in response: {0}")]
    EmptyResult(String),

    /// Network or service error from a model or search call
    #[error("Upstream service failure: {0}")]
    Upstream(String),

    /// The audio payload is malformed; no model call was made
    #[error("Unsupported audio payload: {0}")]
    UnsupportedFormat(String),
}

impl StageError {
    /// Whether the caller can correct this failure themselves
    pub fn is_caller_correctable(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_) | Self::Configuration(_) | Self::UnsupportedFormat(_)
        )
    }
}

impl From<ModelError> for StageError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidApiKey => {
                Self::Configuration("The Gemini API key was rejected".to_string())
            }
            ModelError::EmptyResponse => Self::EmptyResult("the model reply was empty".to_string()),
            ModelError::ParseError(message) => Self::SchemaViolation(message),
            other => Self::Upstream(other.to_string()),
        }
    }
}

impl From<SearchError> for StageError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::MissingApiKey => Self::Configuration(err.to_string()),
            other => Self::Upstream(other.to_string()),
        }
    }
}
