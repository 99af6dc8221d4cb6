//! Menu States
//!
//! Each state carries exactly the context its form and its transition need.

use crate::catalog::ShopItem;
use crate::error::{ShopError, ShopResult};
use crate::search::SearchResult;

use super::{SLIDER_MAX, SLIDER_MIN, STACK_MULTIPLIER};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultsContext {
    pub query: String,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryContext {
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseContext {
    pub category_id: String,
    pub item_index: usize,
    pub item: ShopItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmContext {
    pub category_id: String,
    pub item_index: usize,
    pub item: ShopItem,
    pub amount: u32,
    pub total_price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    SearchInput,
    SearchResults(SearchResultsContext),
    CategoryMenu(CategoryContext),
    PurchaseQuantity(PurchaseContext),
    ConfirmPurchase(ConfirmContext),
}

impl MenuState {
    pub fn category(category_id: &str) -> Self {
        MenuState::CategoryMenu(CategoryContext {
            category_id: category_id.to_string(),
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuState::MainMenu => "main_menu",
            MenuState::SearchInput => "search_input",
            MenuState::SearchResults(_) => "search_results",
            MenuState::CategoryMenu(_) => "category_menu",
            MenuState::PurchaseQuantity(_) => "purchase_quantity",
            MenuState::ConfirmPurchase(_) => "confirm_purchase",
        }
    }
}

/// Units bought for a slider position, times a full stack when toggled
pub fn purchase_amount(slider: u32, full_stacks: bool) -> u32 {
    let slider = slider.clamp(SLIDER_MIN, SLIDER_MAX);
    if full_stacks {
        slider * STACK_MULTIPLIER
    } else {
        slider
    }
}

/// Total price of `amount` units of `item`
pub fn quote_total(item: &ShopItem, amount: u32) -> ShopResult<u64> {
    item.total_price(amount).ok_or(ShopError::PriceOverflow {
        quantity: amount,
        price: item.price,
    })
}

/// One purchase attempt, alive until the charge and grant resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub player_id: String,
    pub item_kind: String,
    pub quantity: u32,
    pub total_price: u64,
}

impl PurchaseRequest {
    pub fn from_confirm(player_id: &str, ctx: &ConfirmContext) -> Self {
        Self {
            player_id: player_id.to_string(),
            item_kind: ctx.item.item.clone(),
            quantity: ctx.amount,
            total_price: ctx.total_price,
        }
    }

    /// Price per unit; the refund for units that could not be granted
    pub fn unit_price(&self) -> u64 {
        if self.quantity == 0 {
            0
        } else {
            self.total_price / u64::from(self.quantity)
        }
    }
}
