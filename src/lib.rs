//! Chest-style shop menus for a game server.
//!
//! Players open a main menu with `/shop`, browse categories or search the
//! catalog, pick a quantity, confirm, and pay through whichever economy
//! backend the server runs. The host supplies the presentation surface and
//! inventories; [`start`] wires everything into a [`ShopService`].

pub mod catalog;
pub mod command;
pub mod config;
pub mod data;
pub mod db;
pub mod economy;
pub mod error;
pub mod inventory;
pub mod menu;
pub mod messages;
pub mod search;

use std::sync::Arc;

use tracing::{info, warn};

pub use catalog::Catalog;
pub use command::{CommandOutcome, CommandSender};
pub use config::ShopConfig;
pub use data::{ItemKindRegistry, ItemKindResolver};
pub use economy::EconomyGateway;
pub use error::{ShopError, ShopResult};
pub use inventory::PlayerInventories;
pub use menu::{FormPresenter, ShopController, ShopService, SubmitOutcome};
pub use messages::MessageSet;

/// Build the shop from its collaborators. Fails if any message template is
/// missing, so a broken configuration never reaches a player.
pub fn start(
    catalog: Catalog,
    messages: MessageSet,
    gateway: EconomyGateway,
    resolver: Arc<dyn ItemKindResolver>,
    inventories: Arc<dyn PlayerInventories>,
    presenter: Arc<dyn FormPresenter>,
) -> ShopResult<ShopService> {
    messages.validate()?;
    if catalog.is_empty() {
        warn!("Shop catalog has no categories; the main menu will only offer search");
    }

    info!(
        "Shop ready: {} categories, {} items, economy via {}",
        catalog.categories().len(),
        catalog.item_count(),
        gateway.backend_name()
    );

    let controller = ShopController::new(
        Arc::new(catalog),
        Arc::new(messages),
        gateway,
        resolver,
        inventories,
        presenter,
    );
    Ok(ShopService::new(Arc::new(controller)))
}
