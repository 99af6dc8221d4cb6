//! Console host: drives the shop for one local player over stdin.
//!
//! `/shop` opens the menu, a number presses a button, a JSON object submits
//! the open custom form, `close` dismisses it.

use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use uuid::Uuid;

use shop_menu::db::SqliteLedger;
use shop_menu::economy::{LedgerService, MemoryWallet, WalletStore};
use shop_menu::inventory::MemoryInventories;
use shop_menu::menu::{Form, FormElement, FormResponse, FormValues};
use shop_menu::{
    Catalog, CommandOutcome, CommandSender, EconomyGateway, FormPresenter, ItemKindRegistry,
    MessageSet, ShopConfig, ShopError, ShopResult, ShopService, SubmitOutcome,
};

const CONFIG_PATH: &str = "config.toml";

// ============================================================================
// Console Presenter
// ============================================================================

/// Prints forms to stdout and remembers the last one shown
#[derive(Default)]
struct ConsolePresenter {
    current: Mutex<Option<Uuid>>,
}

impl ConsolePresenter {
    fn current_form(&self) -> Option<Uuid> {
        self.current.lock().ok().and_then(|current| *current)
    }
}

impl FormPresenter for ConsolePresenter {
    fn send_form(&self, player_id: &str, form_id: Uuid, form: &Form) {
        if let Ok(mut current) = self.current.lock() {
            *current = Some(form_id);
        }

        println!();
        println!("== {} == ({})", plain(form.title()), player_id);
        match form {
            Form::Menu(menu) => {
                for line in plain(&menu.content).lines() {
                    println!("  {}", line);
                }
                for (index, option) in menu.options.iter().enumerate() {
                    let text = plain(&option.text).replace('\n', " | ");
                    println!("  [{}] {}", index, text);
                }
            }
            Form::Custom(custom) => {
                for element in &custom.elements {
                    match element {
                        FormElement::Label { text, .. } => println!("  {}", plain(text)),
                        FormElement::Input { name, label, placeholder, .. } => {
                            println!("  {} \"{}\": text ({})", plain(label), name, plain(placeholder))
                        }
                        FormElement::Toggle { name, label, default } => {
                            println!("  {} \"{}\": true/false (default {})", plain(label), name, default)
                        }
                        FormElement::Slider { name, label, min, max, default, .. } => {
                            println!("  {} \"{}\": {}..{} (default {})", plain(label), name, min, max, default)
                        }
                    }
                }
                println!("  reply with a JSON object, e.g. {{\"amount\": 1, \"stack\": false}}");
            }
        }
    }

    fn send_message(&self, player_id: &str, message: &str) {
        println!("[{}] {}", player_id, plain(message));
    }
}

/// Strip `§x` formatting codes
fn plain(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '§' {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

// ============================================================================
// Startup
// ============================================================================

async fn build(config: &ShopConfig, presenter: Arc<ConsolePresenter>, inventories: Arc<MemoryInventories>) -> ShopResult<ShopService> {
    let mut registry = ItemKindRegistry::new();
    if let Err(e) = registry.load_from_directory(&config.paths.data_dir) {
        error!("Failed to load item kinds: {}", e);
    }

    let catalog = Catalog::load_from_file(&config.paths.catalog)?;
    let messages = MessageSet::with_defaults(config.messages.clone());

    let ledger: Option<Arc<dyn LedgerService>> = if config.economy.use_ledger {
        let ledger = SqliteLedger::new(&config.paths.database_url, config.economy.starting_balance).await?;
        Some(Arc::new(ledger))
    } else {
        None
    };
    let wallet: Option<Arc<dyn WalletStore>> = Some(Arc::new(MemoryWallet::with_starting_balance(
        config.economy.starting_balance,
    )));
    let gateway = EconomyGateway::select(&config.economy, ledger, wallet);

    shop_menu::start(catalog, messages, gateway, Arc::new(registry), inventories, presenter)
}

// ============================================================================
// Input Loop
// ============================================================================

async fn run() -> ShopResult<()> {
    let config = ShopConfig::load(Path::new(CONFIG_PATH))?;
    let player = config.host.player_name.clone();

    let presenter = Arc::new(ConsolePresenter::default());
    let inventories = Arc::new(MemoryInventories::new(config.host.inventory_size));
    let service = build(&config, presenter.clone(), inventories.clone()).await?;

    info!("Playing as {}; type /shop to open the shop, /quit to exit", player);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ShopError::io("<stdin>", e))?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "/quit" => break,
            "/inventory" => {
                let slots = inventories.with_inventory(&player, |inv| inv.to_update());
                match serde_json::to_string_pretty(&slots) {
                    Ok(json) => println!("{}", json),
                    Err(e) => warn!("Cannot print inventory: {}", e),
                }
                continue;
            }
            _ => {}
        }

        if let Some(command) = line.strip_prefix("/console ") {
            report_command(service.on_command(&CommandSender::Console, command.trim()));
            continue;
        }
        if let Some(command) = line.strip_prefix('/') {
            report_command(service.on_command(&CommandSender::Player(player.clone()), command));
            continue;
        }

        let response = if line.eq_ignore_ascii_case("close") {
            FormResponse::Closed
        } else if let Ok(index) = line.parse::<usize>() {
            FormResponse::Selected(index)
        } else {
            match serde_json::from_str::<FormValues>(line) {
                Ok(values) => FormResponse::Submitted(values),
                Err(e) => {
                    println!("Not a button number or a JSON object: {}", e);
                    continue;
                }
            }
        };

        let Some(form_id) = presenter.current_form() else {
            println!("No form open; type /shop");
            continue;
        };
        match service.submit(&player, form_id, response).await {
            SubmitOutcome::Handled => {}
            SubmitOutcome::Closed => println!("Form closed"),
            SubmitOutcome::Ignored => println!("That does not fit the open form"),
            SubmitOutcome::Busy => println!("Still busy with the last purchase"),
        }
    }

    service.player_left(&player);
    Ok(())
}

fn report_command(outcome: CommandOutcome) {
    match outcome {
        CommandOutcome::Opened => {}
        CommandOutcome::NotHandled => println!("Unknown command"),
        CommandOutcome::Busy => println!("Still busy with the last purchase"),
        CommandOutcome::Rejected(message) => println!("{}", plain(&message)),
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "shop_menu=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}
