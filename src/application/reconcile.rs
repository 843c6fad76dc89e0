//! Price reconciliation and budget stage

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::shopping::{
    round_cents, PriceSource, PricedItem, PricedShoppingList, ShoppingListItem, PRICE_TOLERANCE,
};

use super::error::StageError;
use super::ports::GenerativeModel;
use super::reply::decode_reply;

/// Expected shape of the model's estimate reply
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EstimateReply {
    estimated_shopping_list: Vec<EstimateItem>,
    #[serde(default)]
    total_estimated_cost: Option<f64>,
    budget_adherence: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EstimateItem {
    #[allow(dead_code)]
    product_name: String,
    price: f64,
}

/// Fills price gaps with model-estimated reference prices and judges the
/// completed list against the budget.
///
/// One whole-batch generative call; items that already carry a storefront
/// price pass through unchanged, the model only fills the gaps.
pub struct PriceReconciliationStage {
    model: Arc<dyn GenerativeModel>,
}

impl PriceReconciliationStage {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Reconcile the item list against the budget.
    pub async fn reconcile(
        &self,
        items: &[ShoppingListItem],
        budget: f64,
    ) -> Result<PricedShoppingList, StageError> {
        if items.is_empty() {
            return Err(StageError::InvalidRequest(
                "The shopping list is empty".to_string(),
            ));
        }
        if !budget.is_finite() || budget < 0.0 {
            return Err(StageError::InvalidRequest(
                "Budget must be a non-negative amount".to_string(),
            ));
        }

        let prompt = build_prompt(items, budget);
        let raw = self.model.generate_text(&prompt).await?;
        let reply: EstimateReply = decode_reply(&raw)?;

        if reply.estimated_shopping_list.len() != items.len() {
            return Err(StageError::SchemaViolation(format!(
                "expected {} estimated items, got {}",
                items.len(),
                reply.estimated_shopping_list.len()
            )));
        }

        let verdict = reply.budget_adherence.trim();
        if verdict.is_empty() {
            return Err(StageError::EmptyResult(
                "the model returned no budget verdict".to_string(),
            ));
        }

        let mut priced = Vec::with_capacity(items.len());
        for (input, estimate) in items.iter().zip(&reply.estimated_shopping_list) {
            let item = match input.price {
                // storefront prices pass through exactly; the model never
                // re-estimates a known price
                Some(price) => PricedItem {
                    product_name: input.product_name.clone(),
                    price,
                    price_source: PriceSource::Storefront,
                },
                None => {
                    if !estimate.price.is_finite() || estimate.price < 0.0 {
                        return Err(StageError::SchemaViolation(format!(
                            "invalid estimated price for {:?}",
                            input.product_name
                        )));
                    }
                    PricedItem {
                        product_name: input.product_name.clone(),
                        price: estimate.price,
                        price_source: PriceSource::ReferenceEstimate,
                    }
                }
            };
            priced.push(item);
        }

        let total = round_cents(priced.iter().map(|item| item.price).sum());
        if let Some(reported) = reply.total_estimated_cost {
            if (reported - total).abs() > PRICE_TOLERANCE {
                log::warn!("model reported total ${reported:.2}, item sum is ${total:.2}");
            }
        }

        Ok(PricedShoppingList {
            estimated_shopping_list: priced,
            total_estimated_cost: total,
            budget_adherence: verdict.to_string(),
        })
    }
}

fn build_prompt(items: &[ShoppingListItem], budget: f64) -> String {
    let item_lines: String = items
        .iter()
        .map(|item| match item.price {
            Some(price) => format!("- Product: {}, Price: ${:.2}\n", item.product_name, price),
            None => format!("- Product: {}, Price: unknown\n", item.product_name),
        })
        .collect();

    format!(
        r#"You are an AI assistant specializing in estimating grocery prices and adjusting budgets.

You will receive a shopping list with product names and their prices, if available. For any product whose price is unknown, estimate the price based on current reference prices.

After estimating the missing prices, calculate the total estimated cost of the shopping list. Finally, determine whether the shopping list fits within the given budget. If the total cost exceeds the budget, you must provide at least one concrete suggestion on how to adjust the list (e.g., remove an item, choose a cheaper alternative).

Shopping List:
{item_lines}
Budget: ${budget:.2}

Respond with a JSON object of the form
{{"estimatedShoppingList": [{{"productName": string, "price": number}}], "totalEstimatedCost": number, "budgetAdherence": string}}
with exactly one entry per shopping list item, in the same order. Keep known prices unchanged. budgetAdherence states whether the list adheres to the budget, alongside any suggestions on what to adjust. Output only the JSON object."#,
    )
}
