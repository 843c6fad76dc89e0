//! Store product value object and price-text parsing

use serde::{Deserialize, Serialize};

/// One purchasable product returned by a single product-search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// The name of the product
    pub name: String,
    /// The storefront price in dollars
    pub price: f64,
    /// The URL of the product image
    pub image_url: String,
    /// The URL of the product page
    pub product_url: String,
}

/// Parse a storefront price string such as `"$3.98"` or `"4.5"`.
///
/// Tolerates a leading currency symbol and trailing unit text like `"/lb"`;
/// returns `None` when no non-negative numeric price can be read.
pub fn parse_price_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let without_symbol = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();

    let end = without_symbol
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    let price: f64 = without_symbol[..end].parse().ok()?;
    if price.is_finite() && price >= 0.0 {
        Some(price)
    } else {
        None
    }
}
