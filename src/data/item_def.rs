use serde::Deserialize;

/// Stack size used when a kind does not declare one
pub const DEFAULT_MAX_STACK: u32 = 64;

// ============================================================================
// Raw Item Kind Definition (direct from TOML)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawItemKindDefinition {
    pub display_name: Option<String>,
    pub max_stack: Option<u32>,
    /// Accepted variant names, e.g. colours for wool. Empty = no variants.
    #[serde(default)]
    pub variants: Vec<String>,
}

// ============================================================================
// Resolved Item Kind Definition
// ============================================================================

#[derive(Debug, Clone)]
pub struct ItemKindDefinition {
    pub id: String,
    pub display_name: String,
    pub max_stack: u32,
    pub variants: Vec<String>,
}

impl ItemKindDefinition {
    pub fn from_raw(id: &str, raw: &RawItemKindDefinition) -> Self {
        Self {
            id: id.to_lowercase(),
            display_name: raw.display_name.clone()
                .unwrap_or_else(|| id.to_string()),
            // A zero stack size would make every capacity check divide by zero
            max_stack: raw.max_stack.filter(|n| *n > 0).unwrap_or(DEFAULT_MAX_STACK),
            variants: raw.variants.iter().map(|v| v.to_lowercase()).collect(),
        }
    }

    /// Resolve this definition with an optional variant.
    /// Returns None when the variant is not one this kind accepts.
    pub fn resolve(&self, variant: Option<&str>) -> Option<ResolvedKind> {
        if let Some(v) = variant {
            if !self.variants.iter().any(|known| known == v) {
                return None;
            }
        }
        Some(ResolvedKind {
            id: self.id.clone(),
            variant: variant.map(|v| v.to_string()),
            display_name: self.display_name.clone(),
            max_stack: self.max_stack,
        })
    }
}

// ============================================================================
// Resolved Kinds
// ============================================================================

/// A concrete grantable item kind, produced by an [`ItemKindResolver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKind {
    pub id: String,
    pub variant: Option<String>,
    pub display_name: String,
    pub max_stack: u32,
}

impl ResolvedKind {
    /// Two kinds stack together when base id and variant match
    pub fn same_kind(&self, other: &ResolvedKind) -> bool {
        self.id == other.id && self.variant == other.variant
    }
}

/// Turns an item-kind string from the catalog into a grantable kind
pub trait ItemKindResolver: Send + Sync {
    fn resolve(&self, kind: &str) -> Option<ResolvedKind>;
}
