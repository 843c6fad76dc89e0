//! Recipe request value object and its cache key

use std::fmt;

use crate::domain::error::RequestError;

/// Value object representing one user meal request.
/// Constructed only through [`RecipeRequest::new`], so every instance
/// satisfies: non-empty request text, party size >= 1, finite budget >= 0.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeRequest {
    free_text: String,
    party_size: u32,
    budget: f64,
}

impl RecipeRequest {
    /// Create a validated recipe request
    pub fn new(
        free_text: impl Into<String>,
        party_size: u32,
        budget: f64,
    ) -> Result<Self, RequestError> {
        let free_text = free_text.into().trim().to_string();
        if free_text.is_empty() {
            return Err(RequestError::EmptyRequestText);
        }
        if party_size == 0 {
            return Err(RequestError::ZeroPartySize);
        }
        if !budget.is_finite() || budget < 0.0 {
            return Err(RequestError::InvalidBudget(budget));
        }
        Ok(Self {
            free_text,
            party_size,
            budget,
        })
    }

    /// The free-form meal request text
    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    /// Number of people the meal should serve
    pub fn party_size(&self) -> u32 {
        self.party_size
    }

    /// Budget for the meal in dollars
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Deterministic cache key for this request
    pub fn cache_key(&self) -> CacheKey {
        CacheKey(format!(
            "{}|{}|{}",
            self.party_size, self.budget, self.free_text
        ))
    }
}

/// Deterministic identifier for a recipe request, used to deduplicate
/// suggestion computation. Two requests with identical fields always
/// produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// The serialized key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
