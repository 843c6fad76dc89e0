//! Shopping list value objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tolerance, in dollars, when comparing currency totals
pub const PRICE_TOLERANCE: f64 = 0.01;

/// One entry of an unreconciled shopping list. The price is present when
/// product resolution matched a real store product, absent otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Where a final price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    /// An actual price found at the storefront
    #[serde(rename = "storefront")]
    Storefront,
    /// A model-estimated reference price, used when no real price was found
    #[serde(rename = "reference-estimate")]
    ReferenceEstimate,
}

impl PriceSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Storefront => "storefront",
            Self::ReferenceEstimate => "reference-estimate",
        }
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a reconciled shopping list; the price is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    pub product_name: String,
    pub price: f64,
    pub price_source: PriceSource,
}

/// The final, fully priced shopping list.
///
/// Invariant: `total_estimated_cost` equals the sum of the item prices
/// within [`PRICE_TOLERANCE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedShoppingList {
    pub estimated_shopping_list: Vec<PricedItem>,
    pub total_estimated_cost: f64,
    /// Budget verdict, with adjustment suggestions when over budget
    pub budget_adherence: String,
}

impl PricedShoppingList {
    /// Sum of the individual item prices
    pub fn items_total(&self) -> f64 {
        self.estimated_shopping_list
            .iter()
            .map(|item| item.price)
            .sum()
    }

    /// Whether the recorded total matches the item sum within tolerance
    pub fn total_is_consistent(&self) -> bool {
        (self.total_estimated_cost - self.items_total()).abs() <= PRICE_TOLERANCE
    }
}

/// Round a currency amount to whole cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
