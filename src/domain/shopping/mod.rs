//! Shopping list value objects

mod list;
mod product;

pub use list::{
    round_cents, PriceSource, PricedItem, PricedShoppingList, ShoppingListItem, PRICE_TOLERANCE,
};
pub use product::{parse_price_text, RawProduct};
