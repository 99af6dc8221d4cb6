//! Catalog Definition Structures
//!
//! Categories and purchasable items, as read from the shop file.

use serde::{Deserialize, Serialize};

/// Largest unit price the loader accepts. Keeps `quantity * price` inside
/// `u64` for every quantity the purchase form can produce.
pub const MAX_ITEM_PRICE: u64 = u64::MAX / crate::menu::MAX_PURCHASE_AMOUNT as u64;

fn default_count() -> u32 {
    1
}

/// A named group of items shown as one main-menu button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub texture: String,
}

/// A purchasable catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub name: String,
    pub price: u64,
    /// Item-kind reference handed to the resolver, e.g. `wool:red`
    pub item: String,
    pub description: Option<String>,
    pub texture: Option<String>,
    /// Default purchase count shown on the quantity slider
    #[serde(default = "default_count")]
    pub count: u32,
}

impl ShopItem {
    /// Total price for `amount` units, None if it would overflow
    pub fn total_price(&self, amount: u32) -> Option<u64> {
        self.price.checked_mul(u64::from(amount))
    }
}
