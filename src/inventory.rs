use std::collections::BTreeMap;

use dashmap::DashMap;
use serde::Serialize;

use crate::data::{ItemKindResolver, ResolvedKind};

// ============================================================================
// Stacks & Snapshots
// ============================================================================

pub const DEFAULT_INVENTORY_SIZE: usize = 36;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    pub kind: ResolvedKind,
    pub count: u32,
}

impl ItemStack {
    pub fn new(kind: ResolvedKind, count: u32) -> Self {
        Self { kind, count }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Read-only view of a player's inventory at one point in time.
/// `contents` holds the occupied slots only, keyed by slot index.
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    pub size: usize,
    pub contents: BTreeMap<usize, ItemStack>,
}

impl InventorySnapshot {
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            contents: BTreeMap::new(),
        }
    }
}

// ============================================================================
// Capacity Check
// ============================================================================

/// Whether `amount` units of `kind` fit, resolving the kind string first.
/// An unresolvable kind never fits.
pub fn has_space(
    snapshot: &InventorySnapshot,
    resolver: &dyn ItemKindResolver,
    kind: &str,
    amount: u32,
) -> bool {
    match resolver.resolve(kind) {
        Some(resolved) => has_space_for(snapshot, &resolved, amount),
        None => false,
    }
}

/// Slot-packing feasibility check for an already resolved kind.
///
/// Counts free slots: each empty slot is one, each same-kind stack adds the
/// number of whole `max_stack` batches it could still take, and whatever
/// slots the snapshot does not cover at all are added at the end.
pub fn has_space_for(snapshot: &InventorySnapshot, kind: &ResolvedKind, amount: u32) -> bool {
    let max_stack = kind.max_stack.max(1) as usize;
    let required_slots = (amount as usize).div_ceil(max_stack);
    let mut free_slots = 0usize;

    for stack in snapshot.contents.values() {
        if stack.is_empty() {
            free_slots += 1;
        } else if stack.kind.same_kind(kind) {
            let slot_max = stack.kind.max_stack as usize;
            free_slots += slot_max.saturating_sub(stack.count as usize) / max_stack;
        }
        if free_slots >= required_slots {
            return true;
        }
    }

    free_slots += snapshot.size.saturating_sub(snapshot.contents.len());
    free_slots >= required_slots
}

// ============================================================================
// Inventory Accessor
// ============================================================================

/// Host-side access to player inventories
pub trait PlayerInventories: Send + Sync {
    /// Current contents, or None if the player is not known to the host
    fn snapshot(&self, player_id: &str) -> Option<InventorySnapshot>;

    /// Add a stack. Returns the quantity that couldn't fit.
    fn add_stack(&self, player_id: &str, stack: ItemStack) -> u32;
}

#[derive(Debug, Clone)]
pub struct Inventory {
    pub slots: Vec<Option<ItemStack>>,
}

impl Inventory {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    /// Try to add items. Returns the quantity that couldn't fit.
    pub fn add_item(&mut self, kind: &ResolvedKind, mut quantity: u32) -> u32 {
        let max_stack = kind.max_stack.max(1);

        // First, try to stack with existing items
        for slot in &mut self.slots {
            if quantity == 0 {
                break;
            }
            if let Some(stack) = slot {
                if stack.kind.same_kind(kind) && stack.count < max_stack {
                    let add = quantity.min(max_stack - stack.count);
                    stack.count += add;
                    quantity -= add;
                }
            }
        }

        // Then, try to find empty slots for remaining quantity
        for slot in &mut self.slots {
            if quantity == 0 {
                break;
            }
            if slot.is_none() {
                let add = quantity.min(max_stack);
                *slot = Some(ItemStack::new(kind.clone(), add));
                quantity -= add;
            }
        }

        quantity
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            size: self.slots.len(),
            contents: self
                .slots
                .iter()
                .enumerate()
                .filter_map(|(i, slot)| slot.as_ref().map(|s| (i, s.clone())))
                .collect(),
        }
    }

    /// Total units of a kind across all slots
    pub fn count_of(&self, kind: &ResolvedKind) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.kind.same_kind(kind))
            .map(|s| s.count)
            .sum()
    }

    pub fn to_update(&self) -> Vec<InventorySlotUpdate> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref().map(|s| InventorySlotUpdate {
                slot: i,
                item: match &s.kind.variant {
                    Some(v) => format!("{}:{}", s.kind.id, v),
                    None => s.kind.id.clone(),
                },
                quantity: s.count,
            })
        }).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InventorySlotUpdate {
    pub slot: usize,
    pub item: String,
    pub quantity: u32,
}

/// In-process inventories, one per player, created on first use
pub struct MemoryInventories {
    size: usize,
    inventories: DashMap<String, Inventory>,
}

impl MemoryInventories {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            inventories: DashMap::new(),
        }
    }

    /// Mutate a player's inventory directly (setup and host commands)
    pub fn with_inventory<R>(&self, player_id: &str, f: impl FnOnce(&mut Inventory) -> R) -> R {
        let mut entry = self
            .inventories
            .entry(player_id.to_string())
            .or_insert_with(|| Inventory::new(self.size));
        f(entry.value_mut())
    }
}

impl PlayerInventories for MemoryInventories {
    fn snapshot(&self, player_id: &str) -> Option<InventorySnapshot> {
        Some(self.with_inventory(player_id, |inv| inv.snapshot()))
    }

    fn add_stack(&self, player_id: &str, stack: ItemStack) -> u32 {
        self.with_inventory(player_id, |inv| inv.add_item(&stack.kind, stack.count))
    }
}
