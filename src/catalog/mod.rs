pub mod definition;
pub mod registry;

pub use definition::{Category, ShopItem, MAX_ITEM_PRICE};
pub use registry::Catalog;
