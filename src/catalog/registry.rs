//! Catalog Registry
//!
//! Loads the shop catalog once at startup and serves read-only lookups.
//! Category order follows the file; it drives menu and search order.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use super::definition::{Category, ShopItem, MAX_ITEM_PRICE};
use crate::error::{ShopError, ShopResult};

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    items: HashMap<String, Vec<ShopItem>>,
}

/// Read-only view of categories and their items
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    items: HashMap<String, Vec<ShopItem>>,
}

impl Catalog {
    /// Build a catalog from already-parsed parts, applying load-time checks
    pub fn from_parts(
        categories: Vec<Category>,
        items: HashMap<String, Vec<ShopItem>>,
    ) -> ShopResult<Self> {
        let mut ordered: Vec<Category> = Vec::with_capacity(categories.len());
        for category in categories {
            match ordered.iter_mut().find(|c| c.id == category.id) {
                Some(existing) => {
                    warn!("Duplicate category ID '{}', overwriting", category.id);
                    *existing = category;
                }
                None => ordered.push(category),
            }
        }

        for (category_id, list) in &items {
            if !ordered.iter().any(|c| &c.id == category_id) {
                warn!(
                    "Items listed under unknown category '{}' ({} entries) will not be shown",
                    category_id,
                    list.len()
                );
            }
            for item in list {
                if item.price > MAX_ITEM_PRICE {
                    return Err(ShopError::InvalidCatalog(format!(
                        "item '{}' in '{}' has price {} above the maximum {}",
                        item.name, category_id, item.price, MAX_ITEM_PRICE
                    )));
                }
                if item.count == 0 {
                    return Err(ShopError::InvalidCatalog(format!(
                        "item '{}' in '{}' has a count of 0",
                        item.name, category_id
                    )));
                }
            }
        }

        Ok(Self {
            categories: ordered,
            items,
        })
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(content: &str, source: &Path) -> ShopResult<Self> {
        let raw: RawCatalog = toml::from_str(content)
            .map_err(|e| ShopError::parse(source, e))?;
        Self::from_parts(raw.categories, raw.items)
    }

    /// Load the catalog file
    pub fn load_from_file(path: &Path) -> ShopResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ShopError::io(path, e))?;
        let catalog = Self::from_toml_str(&content, path)?;

        info!(
            "Loaded shop catalog: {} categories, {} items",
            catalog.categories.len(),
            catalog.item_count()
        );
        Ok(catalog)
    }

    /// Categories in file order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Get a category by ID
    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// Items of a category in file order; empty for unknown categories
    pub fn items_in(&self, category_id: &str) -> &[ShopItem] {
        self.items
            .get(category_id)
            .map(|items| items.as_slice())
            .unwrap_or(&[])
    }

    /// Guarded item lookup by position within its category
    pub fn item(&self, category_id: &str, index: usize) -> Option<&ShopItem> {
        self.items_in(category_id).get(index)
    }

    /// Total number of items across all categories
    pub fn item_count(&self) -> usize {
        self.items.values().map(|items| items.len()).sum()
    }

    /// Check if there are no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SHOP_TOML: &str = r#"
[[categories]]
id = "tools"
name = "Tools"
texture = "textures/items/iron_pickaxe"

[[categories]]
id = "blocks"
name = "Blocks"
texture = "textures/blocks/stone"

[[items.blocks]]
name = "Stone"
price = 5
item = "stone"
count = 16

[[items.blocks]]
name = "Red Wool"
price = 12
item = "wool:red"
description = "Soft and red"
texture = "textures/blocks/wool_colored_red"
"#;

    #[test]
    fn test_load_catalog_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shop.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SHOP_TOML.as_bytes()).unwrap();

        let catalog = Catalog::load_from_file(&path).unwrap();

        let ids: Vec<&str> = catalog.categories().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["tools", "blocks"]);
        assert_eq!(catalog.item_count(), 2);

        let stone = catalog.item("blocks", 0).unwrap();
        assert_eq!(stone.count, 16);
        assert_eq!(stone.description, None);

        let wool = catalog.item("blocks", 1).unwrap();
        assert_eq!(wool.count, 1);
        assert_eq!(wool.item, "wool:red");
        assert_eq!(wool.texture.as_deref(), Some("textures/blocks/wool_colored_red"));
    }

    #[test]
    fn test_unknown_category_lookups_are_empty() {
        let catalog = Catalog::from_toml_str(SHOP_TOML, &PathBuf::from("shop.toml")).unwrap();
        assert!(catalog.items_in("tools").is_empty());
        assert!(catalog.items_in("nope").is_empty());
        assert!(catalog.item("blocks", 2).is_none());
        assert!(catalog.category("nope").is_none());
    }

    #[test]
    fn test_duplicate_category_keeps_position() {
        let toml_content = r#"
[[categories]]
id = "a"
name = "First"

[[categories]]
id = "b"
name = "B"

[[categories]]
id = "a"
name = "Second"
"#;
        let catalog = Catalog::from_toml_str(toml_content, &PathBuf::from("shop.toml")).unwrap();
        assert_eq!(catalog.categories().len(), 2);
        assert_eq!(catalog.categories()[0].name, "Second");
        assert_eq!(catalog.categories()[1].id, "b");
    }

    #[test]
    fn test_rejects_overflowing_price_and_zero_count() {
        let too_expensive = format!(
            "[[categories]]\nid = \"a\"\nname = \"A\"\n\n[[items.a]]\nname = \"Gem\"\nprice = {}\nitem = \"gem\"\n",
            MAX_ITEM_PRICE + 1
        );
        let err = Catalog::from_toml_str(&too_expensive, &PathBuf::from("shop.toml")).unwrap_err();
        assert!(matches!(err, ShopError::InvalidCatalog(_)));

        let zero_count = "[[categories]]\nid = \"a\"\nname = \"A\"\n\n[[items.a]]\nname = \"Gem\"\nprice = 1\nitem = \"gem\"\ncount = 0\n";
        let err = Catalog::from_toml_str(zero_count, &PathBuf::from("shop.toml")).unwrap_err();
        assert!(matches!(err, ShopError::InvalidCatalog(_)));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let err = Catalog::from_toml_str("categories = 5", &PathBuf::from("shop.toml")).unwrap_err();
        assert!(matches!(err, ShopError::Parse { .. }));
    }
}
