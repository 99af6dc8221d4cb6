//! Catalog search.
//!
//! Case-insensitive substring match over category and item names. Every
//! category hit comes before every item hit; the controller resolves a
//! selected button by its index in this order.

use crate::catalog::Catalog;

/// One search hit. Items are addressed by position within their category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Category { category_id: String },
    Item { category_id: String, item_index: usize },
}

impl SearchResult {
    pub fn category_id(&self) -> &str {
        match self {
            SearchResult::Category { category_id } => category_id,
            SearchResult::Item { category_id, .. } => category_id,
        }
    }
}

/// Search the catalog. An empty result means nothing matched.
pub fn search(catalog: &Catalog, query: &str) -> Vec<SearchResult> {
    let query = query.to_lowercase();
    let mut results = Vec::new();

    for category in catalog.categories() {
        if category.name.to_lowercase().contains(&query) {
            results.push(SearchResult::Category {
                category_id: category.id.clone(),
            });
        }
    }

    // Items of undeclared categories are never reachable here
    for category in catalog.categories() {
        for (item_index, item) in catalog.items_in(&category.id).iter().enumerate() {
            if item.name.to_lowercase().contains(&query) {
                results.push(SearchResult::Item {
                    category_id: category.id.clone(),
                    item_index,
                });
            }
        }
    }

    results
}
