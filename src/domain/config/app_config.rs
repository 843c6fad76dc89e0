//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Default number of people a meal serves when nothing is configured
const DEFAULT_PARTY_SIZE: u32 = 2;
/// Default meal budget in dollars
const DEFAULT_BUDGET: f64 = 30.0;
/// Default recipe cache bound
const DEFAULT_CACHE_ENTRIES: usize = 64;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub serpapi_api_key: Option<String>,
    /// Gemini model name override
    pub model: Option<String>,
    pub party_size: Option<u32>,
    pub budget: Option<f64>,
    /// Recipe cache bound; 0 disables the bound
    pub cache_entries: Option<usize>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            gemini_api_key: None,
            serpapi_api_key: None,
            model: None,
            party_size: Some(DEFAULT_PARTY_SIZE),
            budget: Some(DEFAULT_BUDGET),
            cache_entries: Some(DEFAULT_CACHE_ENTRIES),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            gemini_api_key: other.gemini_api_key.or(self.gemini_api_key),
            serpapi_api_key: other.serpapi_api_key.or(self.serpapi_api_key),
            model: other.model.or(self.model),
            party_size: other.party_size.or(self.party_size),
            budget: other.budget.or(self.budget),
            cache_entries: other.cache_entries.or(self.cache_entries),
        }
    }

    /// Get party size, or the default if not set
    pub fn party_size_or_default(&self) -> u32 {
        self.party_size.unwrap_or(DEFAULT_PARTY_SIZE)
    }

    /// Get budget, or the default if not set
    pub fn budget_or_default(&self) -> f64 {
        self.budget.unwrap_or(DEFAULT_BUDGET)
    }

    /// Get the recipe cache bound; `None` means unbounded
    pub fn cache_bound(&self) -> Option<usize> {
        match self.cache_entries.unwrap_or(DEFAULT_CACHE_ENTRIES) {
            0 => None,
            bound => Some(bound),
        }
    }
}
