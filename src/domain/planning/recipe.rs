//! Recipe entity

use serde::{Deserialize, Serialize};

/// One suggested recipe. Produced by the recipe suggestion stage and never
/// mutated afterwards; field names follow the JSON shape the model returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// The name of the recipe
    pub name: String,
    /// Ingredient names, duplicates allowed
    pub ingredients: Vec<String>,
    /// Free-text preparation instructions
    pub instructions: String,
    /// Estimated cost of the recipe in dollars
    pub estimated_cost: f64,
    /// Why this recipe fits the request, party size, and budget
    pub suitability: String,
}
