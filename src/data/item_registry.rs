use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use super::item_def::{ItemKindDefinition, ItemKindResolver, RawItemKindDefinition, ResolvedKind};
use crate::error::{ShopError, ShopResult};

/// Registry of grantable item kinds, keyed by lower-cased id
pub struct ItemKindRegistry {
    items: HashMap<String, ItemKindDefinition>,
}

impl ItemKindRegistry {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Load all item kind definitions from `<data_dir>/items/*.toml`
    pub fn load_from_directory(&mut self, data_dir: &Path) -> ShopResult<()> {
        let items_dir = data_dir.join("items");

        if !items_dir.exists() {
            warn!("Items directory does not exist: {:?}", items_dir);
            return Ok(());
        }

        let entries = std::fs::read_dir(&items_dir)
            .map_err(|e| ShopError::io(&items_dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| ShopError::io(&items_dir, e))?;
            let path = entry.path();

            if path.extension().map_or(false, |ext| ext == "toml") {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| ShopError::io(&path, e))?;

                // Parse as table of item kinds
                let table: HashMap<String, RawItemKindDefinition> = toml::from_str(&content)
                    .map_err(|e| ShopError::parse(&path, e))?;

                for (id, raw) in table {
                    self.insert_raw(&id, &raw, &path);
                }
            }
        }

        info!("Loaded {} item kind definitions", self.items.len());

        Ok(())
    }

    fn insert_raw(&mut self, id: &str, raw: &RawItemKindDefinition, source: &Path) {
        let def = ItemKindDefinition::from_raw(id, raw);
        if self.items.contains_key(&def.id) {
            warn!("Duplicate item kind '{}' in {:?}, overwriting", def.id, source);
        }
        self.items.insert(def.id.clone(), def);
    }

    /// Register a kind directly (used by hosts that ship built-in kinds)
    pub fn register(&mut self, def: ItemKindDefinition) {
        self.items.insert(def.id.clone(), def);
    }

    /// Get a kind definition by exact id
    pub fn get(&self, id: &str) -> Option<&ItemKindDefinition> {
        self.items.get(id)
    }

    /// Exact id first, then the id with a leading `namespace:` stripped
    fn lookup(&self, name: &str) -> Option<&ItemKindDefinition> {
        self.items.get(name).or_else(|| {
            name.split_once(':')
                .and_then(|(_, rest)| self.items.get(rest))
        })
    }

    /// Get the number of loaded kinds
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemKindResolver for ItemKindRegistry {
    /// Accepts `name`, `namespace:name`, `name:variant` and
    /// `namespace:name:variant`, case-insensitively.
    fn resolve(&self, kind: &str) -> Option<ResolvedKind> {
        let key = kind.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }

        if let Some(def) = self.lookup(&key) {
            return def.resolve(None);
        }

        let (base, variant) = key.rsplit_once(':')?;
        if variant.is_empty() {
            return None;
        }
        self.lookup(base)?.resolve(Some(variant))
    }
}

impl Default for ItemKindRegistry {
    fn default() -> Self {
        Self::new()
    }
}
