//! Product search port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::shopping::RawProduct;

/// Product search errors
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("Missing SerpAPI key. Set SERPAPI_API_KEY or run 'smart-basket config set serpapi_api_key <key>'")]
    MissingApiKey,

    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse search response: {0}")]
    ParseError(String),

    #[error("Search API error: {0}")]
    ApiError(String),
}

/// Port for the external product-search service.
#[async_trait]
pub trait ProductSearch: Send + Sync {
    /// Run one search query and return every candidate product found.
    ///
    /// Candidates without a parseable price are dropped by the adapter;
    /// everything else is forwarded untouched.
    async fn search(&self, query: &str) -> Result<Vec<RawProduct>, SearchError>;
}
