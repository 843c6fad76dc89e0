//! SerpAPI product search adapter

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::application::ports::{ProductSearch, SearchError};
use crate::domain::shopping::{parse_price_text, RawProduct};

/// SerpAPI base URL
const API_BASE_URL: &str = "https://serpapi.com";

/// Search engine passed to SerpAPI
const SEARCH_ENGINE: &str = "walmart";

/// Bounded timeout for every search call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Response types for SerpAPI

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    shopping_results: Option<Vec<ShoppingResult>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ShoppingResult {
    #[serde(default)]
    title: Option<String>,
    // price arrives as "$3.98" or as a bare number depending on the listing
    #[serde(default)]
    price: Option<Value>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

/// SerpAPI Walmart-engine search adapter.
///
/// The credential is checked at call time: a missing key fails before any
/// HTTP request is issued.
pub struct SerpApiSearch {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl SerpApiSearch {
    /// Create a new search adapter; `None` means no credential is configured
    pub fn new(api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            api_key: api_key.filter(|key| !key.is_empty()),
            base_url: API_BASE_URL.to_string(),
            client,
        }
    }

    /// Create an adapter reading `SERPAPI_API_KEY` from the environment
    pub fn from_env() -> Self {
        Self::new(std::env::var("SERPAPI_API_KEY").ok())
    }

    /// Override the API base URL (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Map raw search results to products, dropping entries without a
    /// usable title or a parseable price.
    fn parse_results(results: Vec<ShoppingResult>) -> Vec<RawProduct> {
        results
            .into_iter()
            .filter_map(|result| {
                let name = result.title?;
                let price = price_value(result.price.as_ref()?)?;
                Some(RawProduct {
                    name,
                    price,
                    image_url: result.thumbnail.unwrap_or_default(),
                    product_url: result.link.unwrap_or_default(),
                })
            })
            .collect()
    }
}

fn price_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .filter(|price| price.is_finite() && *price >= 0.0),
        Value::String(text) => parse_price_text(text),
        _ => None,
    }
}

#[async_trait]
impl ProductSearch for SerpApiSearch {
    async fn search(&self, query: &str) -> Result<Vec<RawProduct>, SearchError> {
        // credential check first, so a missing key never issues a request
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;

        let url = format!("{}/search.json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("engine", SEARCH_ENGINE),
                ("query", query),
                ("api_key", api_key),
            ])
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SearchError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(SearchError::ApiError(error));
        }

        Ok(Self::parse_results(body.shopping_results.unwrap_or_default()))
    }
}
