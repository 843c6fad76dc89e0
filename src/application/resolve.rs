//! Product resolution stage

use std::sync::Arc;

use futures::future;
use serde::Deserialize;

use crate::domain::shopping::{RawProduct, ShoppingListItem};

use super::error::StageError;
use super::ports::{GenerativeModel, ProductSearch, SearchError};
use super::reply::decode_reply;

/// Expected shape of the model's product-match reply
#[derive(Debug, Deserialize)]
struct MatchReply {
    items: Vec<ShoppingListItem>,
}

/// Resolves ingredient names to purchasable store products.
///
/// One search query per ingredient is fanned out to the product-search
/// service; the aggregated candidates then go through a single generative
/// call that picks the best match per ingredient. A failed search for one
/// ingredient degrades that ingredient only, never the whole batch.
pub struct ProductResolutionStage {
    model: Arc<dyn GenerativeModel>,
    search: Arc<dyn ProductSearch>,
}

impl ProductResolutionStage {
    pub fn new(model: Arc<dyn GenerativeModel>, search: Arc<dyn ProductSearch>) -> Self {
        Self { model, search }
    }

    /// Resolve each ingredient to one shopping-list item.
    ///
    /// The output has exactly one item per input ingredient, in input order;
    /// an item's price is absent when no acceptable product was found.
    pub async fn resolve(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<ShoppingListItem>, StageError> {
        if ingredients.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.gather_candidates(ingredients).await?;
        log::debug!(
            "{} candidate products for {} ingredients",
            candidates.len(),
            ingredients.len()
        );

        let prompt = build_prompt(ingredients, &candidates);
        let raw = self.model.generate_text(&prompt).await?;
        let reply: MatchReply = decode_reply(&raw)?;

        validate_items(ingredients, reply.items)
    }

    // One search per ingredient, issued concurrently; the aggregate follows
    // ingredient input order regardless of completion order.
    async fn gather_candidates(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<RawProduct>, StageError> {
        let searches = ingredients
            .iter()
            .map(|ingredient| self.search.search(ingredient));
        let outcomes = future::join_all(searches).await;

        let mut candidates = Vec::new();
        let mut failures = 0usize;
        for (ingredient, outcome) in ingredients.iter().zip(outcomes) {
            match outcome {
                Ok(products) => candidates.extend(products),
                Err(SearchError::MissingApiKey) => {
                    // a missing credential is fatal, not a per-ingredient failure
                    return Err(SearchError::MissingApiKey.into());
                }
                Err(err) => {
                    failures += 1;
                    log::warn!("product search for {ingredient:?} failed: {err}");
                }
            }
        }

        if failures == ingredients.len() {
            return Err(StageError::Upstream(format!(
                "all {failures} product searches failed"
            )));
        }

        Ok(candidates)
    }
}

fn build_prompt(ingredients: &[String], candidates: &[RawProduct]) -> String {
    let ingredient_lines: String = ingredients
        .iter()
        .map(|ingredient| format!("- {ingredient}\n"))
        .collect();

    let candidate_lines: String = if candidates.is_empty() {
        "(no products found)\n".to_string()
    } else {
        candidates
            .iter()
            .map(|product| format!("- {} (${:.2})\n", product.name, product.price))
            .collect()
    };

    format!(
        r#"You are an AI assistant that maps ingredients to store products. For each ingredient, pick the single best matching product from the candidates below.

Ingredients:
{ingredient_lines}
Candidate products:
{candidate_lines}
Respond with a JSON object of the form
{{"items": [{{"productName": string, "price": number}}]}}
with exactly one item per ingredient, in the same order as the ingredient list. Use the chosen product's name and price; if no candidate is an acceptable match for an ingredient, use the ingredient name and omit the price field. Output only the JSON object."#,
    )
}

fn validate_items(
    ingredients: &[String],
    items: Vec<ShoppingListItem>,
) -> Result<Vec<ShoppingListItem>, StageError> {
    if items.len() != ingredients.len() {
        return Err(StageError::SchemaViolation(format!(
            "expected {} shopping list items, got {}",
            ingredients.len(),
            items.len()
        )));
    }
    for item in &items {
        if item.product_name.trim().is_empty() {
            return Err(StageError::SchemaViolation(
                "shopping list item with a blank product name".to_string(),
            ));
        }
        if let Some(price) = item.price {
            if !price.is_finite() || price < 0.0 {
                return Err(StageError::SchemaViolation(format!(
                    "invalid price for {:?}",
                    item.product_name
                )));
            }
        }
    }
    Ok(items)
}
