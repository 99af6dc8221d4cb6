//! `/shop` command entry point.

use tracing::info;

use crate::menu::ShopService;

pub const SHOP_COMMAND: &str = "shop";

/// Who issued a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSender {
    /// An in-game player, by id
    Player(String),
    /// Server console or another non-interactive caller
    Console,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Not a command this shop owns
    NotHandled,
    /// Main menu presented
    Opened,
    /// Player already has a purchase in flight
    Busy,
    /// Sender cannot use menus; reply with this text
    Rejected(String),
}

impl ShopService {
    pub fn on_command(&self, sender: &CommandSender, command: &str) -> CommandOutcome {
        if !command.eq_ignore_ascii_case(SHOP_COMMAND) {
            return CommandOutcome::NotHandled;
        }

        match sender {
            CommandSender::Console => {
                info!("Rejected /{} from a non-player sender", SHOP_COMMAND);
                CommandOutcome::Rejected(self.controller().messages().format("command_in_game_only", &[]))
            }
            CommandSender::Player(player_id) => {
                if self.open_main_menu(player_id) {
                    CommandOutcome::Opened
                } else {
                    CommandOutcome::Busy
                }
            }
        }
    }
}
