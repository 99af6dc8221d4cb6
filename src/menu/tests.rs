//! Menu flow tests: navigation through the service, purchase ordering, and
//! per-player serialization.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use uuid::Uuid;

use super::{
    Form, FormPresenter, FormResponse, FormValue, FormValues, MenuState, PurchaseOutcome, Rendered,
    ShopController, ShopService, SubmitOutcome, Transition,
};
use crate::catalog::Catalog;
use crate::command::{CommandOutcome, CommandSender};
use crate::data::{ItemKindDefinition, ItemKindRegistry};
use crate::economy::{EconomyError, EconomyGateway, LedgerService};
use crate::inventory::{InventorySnapshot, ItemStack, MemoryInventories, PlayerInventories};
use crate::messages::MessageSet;
use crate::search::SearchResult;

const CATALOG: &str = r#"
[[categories]]
id = "blocks"
name = "Blocks"
texture = "textures/blocks/stone"

[[categories]]
id = "tools"
name = "Tools"

[[categories]]
id = "empty"
name = "Nothing Here"

[[items.blocks]]
name = "Stone"
price = 5
item = "stone"
count = 16

[[items.blocks]]
name = "Red Wool"
price = 12
item = "wool:red"
description = "Soft"

[[items.tools]]
name = "Stone Pickaxe"
price = 40
item = "stone_pickaxe"
"#;

// ============================================================================
// Fakes
// ============================================================================

#[derive(Default)]
struct RecordingPresenter {
    forms: Mutex<Vec<(String, Uuid, Form)>>,
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingPresenter {
    fn last_form(&self) -> (Uuid, Form) {
        let forms = self.forms.lock().unwrap();
        let (_, id, form) = forms.last().expect("no form presented");
        (*id, form.clone())
    }

    fn form_count(&self) -> usize {
        self.forms.lock().unwrap().len()
    }

    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().iter().map(|(_, m)| m.clone()).collect()
    }
}

impl FormPresenter for RecordingPresenter {
    fn send_form(&self, player_id: &str, form_id: Uuid, form: &Form) {
        self.forms.lock().unwrap().push((player_id.to_string(), form_id, form.clone()));
    }

    fn send_message(&self, player_id: &str, message: &str) {
        self.messages.lock().unwrap().push((player_id.to_string(), message.to_string()));
    }
}

/// Ledger with a fixed answer that records every debit and credit
struct RecordingLedger {
    accept: bool,
    debits: Mutex<Vec<u64>>,
    credits: Mutex<Vec<u64>>,
}

impl RecordingLedger {
    fn new(accept: bool) -> Arc<Self> {
        Arc::new(Self {
            accept,
            debits: Mutex::new(Vec::new()),
            credits: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl LedgerService for RecordingLedger {
    async fn subtract_from_balance(&self, _player_id: &str, amount: u64) -> Result<bool, EconomyError> {
        self.debits.lock().unwrap().push(amount);
        Ok(self.accept)
    }

    async fn add_to_balance(&self, _player_id: &str, amount: u64) -> Result<(), EconomyError> {
        self.credits.lock().unwrap().push(amount);
        Ok(())
    }
}

/// Ledger that parks every debit until released
struct GatedLedger {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl LedgerService for GatedLedger {
    async fn subtract_from_balance(&self, _player_id: &str, _amount: u64) -> Result<bool, EconomyError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(true)
    }

    async fn add_to_balance(&self, _player_id: &str, _amount: u64) -> Result<(), EconomyError> {
        Ok(())
    }
}

/// Reports an empty inventory but only ever accepts `accepts` units
struct ShrinkingInventories {
    accepts: u32,
    added: Mutex<Vec<ItemStack>>,
}

impl PlayerInventories for ShrinkingInventories {
    fn snapshot(&self, _player_id: &str) -> Option<InventorySnapshot> {
        Some(InventorySnapshot::empty(36))
    }

    fn add_stack(&self, _player_id: &str, stack: ItemStack) -> u32 {
        let leftover = stack.count.saturating_sub(self.accepts);
        self.added.lock().unwrap().push(stack);
        leftover
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn registry() -> ItemKindRegistry {
    let mut registry = ItemKindRegistry::new();
    for (id, max_stack, variants) in [
        ("stone", 64, vec![]),
        ("wool", 64, vec!["red".to_string(), "blue".to_string()]),
        ("stone_pickaxe", 1, vec![]),
    ] {
        registry.register(ItemKindDefinition {
            id: id.to_string(),
            display_name: id.to_string(),
            max_stack,
            variants,
        });
    }
    registry
}

fn catalog() -> Catalog {
    Catalog::from_toml_str(CATALOG, Path::new("shop.toml")).unwrap()
}

struct Harness {
    service: ShopService,
    presenter: Arc<RecordingPresenter>,
}

fn harness_with(gateway: EconomyGateway, inventories: Arc<dyn PlayerInventories>) -> Harness {
    let presenter = Arc::new(RecordingPresenter::default());
    let controller = ShopController::new(
        Arc::new(catalog()),
        Arc::new(MessageSet::default()),
        gateway,
        Arc::new(registry()),
        inventories,
        presenter.clone(),
    );
    Harness {
        service: ShopService::new(Arc::new(controller)),
        presenter,
    }
}

fn harness(gateway: EconomyGateway) -> (Harness, Arc<MemoryInventories>) {
    let inventories = Arc::new(MemoryInventories::new(36));
    (harness_with(gateway, inventories.clone()), inventories)
}

fn amount(slider: f64, stacks: bool) -> FormResponse {
    FormResponse::Submitted(
        FormValues::new()
            .with("amount", FormValue::Number(slider))
            .with("stack", FormValue::Bool(stacks)),
    )
}

impl Harness {
    fn messages(&self) -> &MessageSet {
        self.service.controller().messages()
    }

    async fn respond(&self, response: FormResponse) -> SubmitOutcome {
        let (form_id, _) = self.presenter.last_form();
        self.service.submit("steve", form_id, response).await
    }

    /// Main menu -> Blocks -> first item (Stone) -> quantity form
    async fn open_stone_quantity(&self) {
        assert!(self.service.open_main_menu("steve"));
        assert_eq!(self.respond(FormResponse::Selected(1)).await, SubmitOutcome::Handled);
        assert_eq!(self.respond(FormResponse::Selected(1)).await, SubmitOutcome::Handled);
    }
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_main_menu_lists_search_then_categories() {
    let (h, _) = harness(EconomyGateway::disabled());
    let Rendered::Form(form) = h.service.controller().render(&MenuState::MainMenu) else {
        panic!("main menu redirected");
    };
    let menu = form.as_menu().unwrap();
    assert_eq!(menu.options.len(), 1 + h.service.controller().catalog().categories().len());
    assert_eq!(menu.options[0].text, h.messages().format("search_option", &[]));
    assert_eq!(menu.options[1].text, "Blocks");
    assert_eq!(menu.options[1].icon.as_ref().unwrap().path, "textures/blocks/stone");
    assert!(menu.options[2].icon.is_none());
}

#[test]
fn test_empty_category_redirects_to_main_menu() {
    let (h, _) = harness(EconomyGateway::disabled());
    match h.service.controller().render(&MenuState::category("empty")) {
        Rendered::Redirect { notice, to } => {
            assert_eq!(notice, h.messages().format("no_items_message", &[]));
            assert_eq!(to, MenuState::MainMenu);
        }
        other => panic!("expected redirect, got {:?}", other),
    }
}

#[test]
fn test_category_menu_has_back_then_items() {
    let (h, _) = harness(EconomyGateway::disabled());
    let Rendered::Form(form) = h.service.controller().render(&MenuState::category("blocks")) else {
        panic!("blocks redirected");
    };
    let menu = form.as_menu().unwrap();
    assert_eq!(menu.options.len(), 3);
    assert_eq!(menu.options[0].text, h.messages().format("back_option", &[]));
    assert!(menu.options[1].text.contains("Stone"));
    assert!(menu.options[2].text.contains("Soft"));
}

#[tokio::test]
async fn test_quantity_form_defaults_to_item_count() {
    let (h, _) = harness(EconomyGateway::disabled());
    h.open_stone_quantity().await;

    let (_, form) = h.presenter.last_form();
    let custom = form.as_custom().unwrap();
    let names: Vec<&str> = custom.elements.iter().map(|e| e.name()).collect();
    assert_eq!(names, ["info", "stack", "amount"]);
    assert!(matches!(
        custom.elements[2],
        super::FormElement::Slider { min: 1, max: 64, default: 16, .. }
    ));
}

// ============================================================================
// Navigation
// ============================================================================

#[tokio::test]
async fn test_empty_category_selection_returns_to_main_menu() {
    let (h, _) = harness(EconomyGateway::disabled());
    assert!(h.service.open_main_menu("steve"));
    assert_eq!(h.respond(FormResponse::Selected(3)).await, SubmitOutcome::Handled);

    assert_eq!(h.presenter.messages(), [h.messages().format("no_items_message", &[])]);
    let (_, form) = h.presenter.last_form();
    assert_eq!(form.title(), h.messages().format("main_menu_title", &[]));
}

#[tokio::test]
async fn test_search_without_results_notifies_and_returns() {
    let (h, _) = harness(EconomyGateway::disabled());
    assert!(h.service.open_main_menu("steve"));
    h.respond(FormResponse::Selected(0)).await;

    let query = FormValues::new().with("query", FormValue::Text("diamond".to_string()));
    assert_eq!(h.respond(FormResponse::Submitted(query)).await, SubmitOutcome::Handled);

    assert_eq!(h.presenter.messages(), [h.messages().format("no_results_message", &[])]);
    let (_, form) = h.presenter.last_form();
    assert_eq!(form.title(), h.messages().format("main_menu_title", &[]));
}

#[tokio::test]
async fn test_search_result_opens_quantity_form() {
    let (h, _) = harness(EconomyGateway::disabled());
    assert!(h.service.open_main_menu("steve"));
    h.respond(FormResponse::Selected(0)).await;

    let query = FormValues::new().with("query", FormValue::Text("WOOL".to_string()));
    h.respond(FormResponse::Submitted(query)).await;
    let (_, results) = h.presenter.last_form();
    assert_eq!(results.as_menu().unwrap().options.len(), 1);

    h.respond(FormResponse::Selected(0)).await;
    let (_, form) = h.presenter.last_form();
    assert_eq!(form.title(), h.messages().format("purchase_form_title", &[&"Red Wool"]));
}

#[tokio::test]
async fn test_search_category_result_opens_category() {
    let (h, _) = harness(EconomyGateway::disabled());
    assert!(h.service.open_main_menu("steve"));
    h.respond(FormResponse::Selected(0)).await;

    let query = FormValues::new().with("query", FormValue::Text("tool".to_string()));
    h.respond(FormResponse::Submitted(query)).await;
    let (_, results) = h.presenter.last_form();
    assert_eq!(results.as_menu().unwrap().options[0].text, "Tools");

    assert_eq!(h.respond(FormResponse::Selected(0)).await, SubmitOutcome::Handled);
    let (_, form) = h.presenter.last_form();
    assert_eq!(form.title(), h.messages().format("category_menu_title", &[&"Tools"]));
}

#[test]
fn test_stale_category_result_is_ignored() {
    let (h, _) = harness(EconomyGateway::disabled());
    let state = MenuState::SearchResults(super::state::SearchResultsContext {
        query: "gone".to_string(),
        results: vec![SearchResult::Category {
            category_id: "gone".to_string(),
        }],
    });

    let Rendered::Form(form) = h.service.controller().render(&state) else {
        panic!("search results redirected");
    };
    assert_eq!(form.as_menu().unwrap().options[0].text, "gone");
    assert_eq!(
        h.service.controller().transition(state, FormResponse::Selected(0)),
        Transition::Ignore
    );
}

#[test]
fn test_dangling_selection_is_ignored() {
    let (h, _) = harness(EconomyGateway::disabled());
    let controller = h.service.controller();
    assert_eq!(
        controller.transition(MenuState::MainMenu, FormResponse::Selected(99)),
        Transition::Ignore
    );
    assert_eq!(
        controller.transition(MenuState::category("blocks"), FormResponse::Selected(3)),
        Transition::Ignore
    );
    assert_eq!(
        controller.transition(MenuState::SearchInput, FormResponse::Selected(0)),
        Transition::Ignore
    );
}

#[tokio::test]
async fn test_back_and_confirm_no_navigation() {
    let (h, inventories) = harness(EconomyGateway::disabled());
    h.open_stone_quantity().await;
    h.respond(amount(3.0, false)).await;

    assert_eq!(h.respond(FormResponse::Selected(1)).await, SubmitOutcome::Handled);
    let (_, form) = h.presenter.last_form();
    assert_eq!(form.title(), h.messages().format("category_menu_title", &[&"Blocks"]));
    assert!(h.presenter.messages().is_empty());
    assert_eq!(inventories.snapshot("steve").unwrap().contents.len(), 0);

    h.respond(FormResponse::Selected(0)).await;
    let (_, form) = h.presenter.last_form();
    assert_eq!(form.title(), h.messages().format("main_menu_title", &[]));
}

#[tokio::test]
async fn test_quantity_toggle_multiplies_by_stack() {
    let (h, _) = harness(EconomyGateway::disabled());
    let controller = h.service.controller();
    let Transition::Open(MenuState::PurchaseQuantity(ctx)) =
        controller.transition(MenuState::category("blocks"), FormResponse::Selected(1))
    else {
        panic!("stone did not open");
    };

    let quantity = MenuState::PurchaseQuantity(ctx);
    for (slider, stacks, expected) in [(1.0, false, 1), (12.9, false, 12), (2.0, true, 128), (64.0, true, 4096)] {
        match controller.transition(quantity.clone(), amount(slider, stacks)) {
            Transition::Open(MenuState::ConfirmPurchase(confirm)) => {
                assert_eq!(confirm.amount, expected);
                assert_eq!(confirm.total_price, 5 * u64::from(expected));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_closed_and_stale_responses() {
    let (h, _) = harness(EconomyGateway::disabled());
    assert!(h.service.open_main_menu("steve"));
    let (first, _) = h.presenter.last_form();

    h.respond(FormResponse::Selected(1)).await;
    assert_eq!(
        h.service.submit("steve", first, FormResponse::Selected(2)).await,
        SubmitOutcome::Ignored
    );
    assert_eq!(
        h.service.submit("steve", Uuid::new_v4(), FormResponse::Selected(0)).await,
        SubmitOutcome::Ignored
    );

    assert_eq!(h.respond(FormResponse::Closed).await, SubmitOutcome::Closed);
    // The closed form is gone too
    assert_eq!(h.respond(FormResponse::Selected(0)).await, SubmitOutcome::Ignored);
}

// ============================================================================
// Purchases
// ============================================================================

#[tokio::test]
async fn test_successful_purchase_grants_once() {
    let ledger = RecordingLedger::new(true);
    let (h, inventories) = harness(EconomyGateway::ledger(ledger.clone()));
    h.open_stone_quantity().await;
    h.respond(amount(2.0, true)).await;
    assert_eq!(h.respond(FormResponse::Selected(0)).await, SubmitOutcome::Handled);

    assert_eq!(ledger.debits.lock().unwrap().as_slice(), &[640]);
    let snapshot = inventories.snapshot("steve").unwrap();
    assert_eq!(snapshot.contents.len(), 2);
    assert!(snapshot.contents.values().all(|s| s.count == 64 && s.kind.id == "stone"));
    assert_eq!(
        h.presenter.messages(),
        [h.messages().format("purchase_success", &[&128, &"Stone"])]
    );

    let (_, form) = h.presenter.last_form();
    assert_eq!(form.title(), h.messages().format("category_menu_title", &[&"Blocks"]));
}

#[tokio::test]
async fn test_full_inventory_is_never_charged() {
    let ledger = RecordingLedger::new(true);
    let (h, inventories) = harness(EconomyGateway::ledger(ledger.clone()));
    let wool = registry().get("wool").unwrap().resolve(Some("blue")).unwrap();
    inventories.with_inventory("steve", |inv| inv.add_item(&wool, 36 * 64));

    h.open_stone_quantity().await;
    h.respond(amount(1.0, false)).await;
    h.respond(FormResponse::Selected(0)).await;

    assert!(ledger.debits.lock().unwrap().is_empty());
    assert_eq!(
        h.presenter.messages(),
        [h.messages().format("inventory_full_message", &[])]
    );
    let (_, form) = h.presenter.last_form();
    assert_eq!(form.title(), h.messages().format("category_menu_title", &[&"Blocks"]));
}

#[tokio::test]
async fn test_insufficient_funds_leaves_inventory_alone() {
    let ledger = RecordingLedger::new(false);
    let (h, inventories) = harness(EconomyGateway::ledger(ledger.clone()));
    h.open_stone_quantity().await;
    h.respond(amount(5.0, false)).await;
    h.respond(FormResponse::Selected(0)).await;

    assert_eq!(ledger.debits.lock().unwrap().as_slice(), &[25]);
    assert!(inventories.snapshot("steve").unwrap().contents.is_empty());
    assert_eq!(h.presenter.messages(), [h.messages().format("not_enough_money", &[])]);
}

#[tokio::test]
async fn test_disabled_economy_refuses_purchase() {
    let (h, inventories) = harness(EconomyGateway::disabled());
    h.open_stone_quantity().await;
    h.respond(amount(1.0, false)).await;
    h.respond(FormResponse::Selected(0)).await;

    assert!(inventories.snapshot("steve").unwrap().contents.is_empty());
    assert_eq!(h.presenter.messages(), [h.messages().format("not_enough_money", &[])]);
}

#[tokio::test]
async fn test_partial_grant_refunds_the_rest() {
    let ledger = RecordingLedger::new(true);
    let inventories = Arc::new(ShrinkingInventories {
        accepts: 50,
        added: Mutex::new(Vec::new()),
    });
    let h = harness_with(EconomyGateway::ledger(ledger.clone()), inventories.clone());
    let confirm = match h.service.controller().transition(
        MenuState::PurchaseQuantity(super::state::PurchaseContext {
            category_id: "blocks".to_string(),
            item_index: 0,
            item: h.service.controller().catalog().item("blocks", 0).unwrap().clone(),
        }),
        amount(1.0, true),
    ) {
        Transition::Open(MenuState::ConfirmPurchase(confirm)) => confirm,
        other => panic!("unexpected {:?}", other),
    };

    let outcome = h.service.controller().purchase("steve", &confirm).await;
    assert_eq!(outcome, PurchaseOutcome::PartiallyGranted { granted: 50, refunded: 70 });
    assert_eq!(ledger.debits.lock().unwrap().as_slice(), &[320]);
    assert_eq!(ledger.credits.lock().unwrap().as_slice(), &[70]);
    assert_eq!(inventories.added.lock().unwrap().len(), 1);
    assert_eq!(h.presenter.messages().len(), 2);
}

#[tokio::test]
async fn test_unknown_item_kind_is_not_charged() {
    let ledger = RecordingLedger::new(true);
    let (h, _) = harness(EconomyGateway::ledger(ledger.clone()));
    let mut item = h.service.controller().catalog().item("blocks", 0).unwrap().clone();
    item.item = "bedrock".to_string();
    let confirm = super::state::ConfirmContext {
        category_id: "blocks".to_string(),
        item_index: 0,
        item,
        amount: 1,
        total_price: 5,
    };

    let outcome = h.service.controller().purchase("steve", &confirm).await;
    assert_eq!(outcome, PurchaseOutcome::InventoryFull);
    assert!(ledger.debits.lock().unwrap().is_empty());
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_player_is_busy_during_purchase() {
    let ledger = Arc::new(GatedLedger {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let (h, inventories) = harness(EconomyGateway::ledger(ledger.clone()));
    h.open_stone_quantity().await;
    h.respond(amount(1.0, false)).await;
    let (confirm_id, _) = h.presenter.last_form();

    let service = Arc::new(h.service);
    let running = {
        let service = service.clone();
        tokio::spawn(async move { service.submit("steve", confirm_id, FormResponse::Selected(0)).await })
    };
    ledger.entered.notified().await;

    let forms_before = h.presenter.form_count();
    assert_eq!(
        service.submit("steve", confirm_id, FormResponse::Selected(0)).await,
        SubmitOutcome::Busy
    );
    assert!(!service.open_main_menu("steve"));
    assert_eq!(
        service.on_command(&CommandSender::Player("steve".to_string()), "shop"),
        CommandOutcome::Busy
    );
    // Other players are unaffected
    assert!(service.open_main_menu("alex"));
    assert_eq!(h.presenter.form_count(), forms_before + 1);

    ledger.release.notify_one();
    assert_eq!(running.await.unwrap(), SubmitOutcome::Handled);
    assert_eq!(inventories.snapshot("steve").unwrap().contents.len(), 1);
    assert!(service.open_main_menu("steve"));
}

#[tokio::test]
async fn test_leaving_mid_purchase_keeps_player_serialized() {
    let ledger = Arc::new(GatedLedger {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let (h, inventories) = harness(EconomyGateway::ledger(ledger.clone()));
    h.open_stone_quantity().await;
    h.respond(amount(1.0, false)).await;
    let (confirm_id, _) = h.presenter.last_form();

    let service = Arc::new(h.service);
    let running = {
        let service = service.clone();
        tokio::spawn(async move { service.submit("steve", confirm_id, FormResponse::Selected(0)).await })
    };
    ledger.entered.notified().await;

    service.player_left("steve");
    let forms_before = h.presenter.form_count();
    assert!(!service.open_main_menu("steve"));
    assert_eq!(h.presenter.form_count(), forms_before);

    ledger.release.notify_one();
    assert_eq!(running.await.unwrap(), SubmitOutcome::Handled);
    assert_eq!(inventories.snapshot("steve").unwrap().contents.len(), 1);

    // The player came back, so the category menu reaches them and answers
    let (form_id, form) = h.presenter.last_form();
    assert_eq!(form.title(), service.controller().messages().format("category_menu_title", &[&"Blocks"]));
    assert_eq!(
        service.submit("steve", form_id, FormResponse::Selected(0)).await,
        SubmitOutcome::Handled
    );
}

#[tokio::test]
async fn test_departed_player_gets_no_form_after_purchase() {
    let ledger = Arc::new(GatedLedger {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let (h, _) = harness(EconomyGateway::ledger(ledger.clone()));
    h.open_stone_quantity().await;
    h.respond(amount(1.0, false)).await;
    let (confirm_id, _) = h.presenter.last_form();

    let service = Arc::new(h.service);
    let running = {
        let service = service.clone();
        tokio::spawn(async move { service.submit("steve", confirm_id, FormResponse::Selected(0)).await })
    };
    ledger.entered.notified().await;
    service.player_left("steve");
    assert_eq!(service.session_count(), 1);

    let forms_before = h.presenter.form_count();
    ledger.release.notify_one();
    assert_eq!(running.await.unwrap(), SubmitOutcome::Handled);
    assert_eq!(h.presenter.form_count(), forms_before);
    assert_eq!(service.session_count(), 0);
}

#[tokio::test]
async fn test_unknown_player_submission_creates_no_session() {
    let (h, _) = harness(EconomyGateway::disabled());
    assert_eq!(
        h.service.submit("ghost", Uuid::new_v4(), FormResponse::Selected(0)).await,
        SubmitOutcome::Ignored
    );
    assert_eq!(h.service.session_count(), 0);

    assert!(h.service.open_main_menu("steve"));
    h.service.player_left("steve");
    assert_eq!(h.service.session_count(), 0);
}

// ============================================================================
// Command
// ============================================================================

#[test]
fn test_shop_command() {
    let (h, _) = harness(EconomyGateway::disabled());
    assert_eq!(
        h.service.on_command(&CommandSender::Console, "shop"),
        CommandOutcome::Rejected(h.messages().format("command_in_game_only", &[]))
    );
    assert_eq!(
        h.service.on_command(&CommandSender::Player("steve".to_string()), "warp"),
        CommandOutcome::NotHandled
    );
    assert_eq!(h.presenter.form_count(), 0);

    assert_eq!(
        h.service.on_command(&CommandSender::Player("steve".to_string()), "SHOP"),
        CommandOutcome::Opened
    );
    let (_, form) = h.presenter.last_form();
    assert_eq!(form.title(), h.messages().format("main_menu_title", &[]));
}
