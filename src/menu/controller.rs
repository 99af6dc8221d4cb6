//! Menu Navigation Controller
//!
//! Renders a form for each menu state, maps a form response to the next
//! state, and runs the purchase transaction. Session bookkeeping (which form
//! a player is looking at) lives in [`super::service`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::form::{CustomForm, Form, FormElement, FormIcon, FormPresenter, FormResponse, MenuForm, MenuOption};
use super::state::{
    purchase_amount, quote_total, CategoryContext, ConfirmContext, MenuState, PurchaseContext,
    PurchaseRequest, SearchResultsContext,
};
use super::{SLIDER_MAX, SLIDER_MIN};
use crate::catalog::{Catalog, ShopItem};
use crate::data::ItemKindResolver;
use crate::economy::{ChargeOutcome, EconomyGateway};
use crate::inventory::{has_space_for, ItemStack, PlayerInventories};
use crate::messages::MessageSet;
use crate::search::{search, SearchResult};

/// Field names of the custom forms
pub const SEARCH_QUERY_FIELD: &str = "query";
pub const STACK_TOGGLE_FIELD: &str = "stack";
pub const AMOUNT_SLIDER_FIELD: &str = "amount";

/// Result of rendering a state
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Form(Form),
    /// The state has nothing to show; tell the player and go elsewhere
    Redirect { notice: String, to: MenuState },
}

/// Where a form response leads
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Open(MenuState),
    Notice { message: String, next: MenuState },
    /// Confirmed; run the purchase, then return to the category
    Purchase(ConfirmContext),
    /// Form dismissed
    Close,
    /// Response does not fit the form (stale index, missing field)
    Ignore,
}

/// How a purchase attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    InventoryFull,
    Purchased { amount: u32 },
    /// Charged, but only `granted` units fit; the rest was refunded
    PartiallyGranted { granted: u32, refunded: u64 },
    NotEnoughMoney(ChargeOutcome),
}

pub struct ShopController {
    catalog: Arc<Catalog>,
    messages: Arc<MessageSet>,
    gateway: EconomyGateway,
    resolver: Arc<dyn ItemKindResolver>,
    inventories: Arc<dyn PlayerInventories>,
    presenter: Arc<dyn FormPresenter>,
}

impl ShopController {
    pub fn new(
        catalog: Arc<Catalog>,
        messages: Arc<MessageSet>,
        gateway: EconomyGateway,
        resolver: Arc<dyn ItemKindResolver>,
        inventories: Arc<dyn PlayerInventories>,
        presenter: Arc<dyn FormPresenter>,
    ) -> Self {
        Self {
            catalog,
            messages,
            gateway,
            resolver,
            inventories,
            presenter,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn messages(&self) -> &MessageSet {
        &self.messages
    }

    pub fn presenter(&self) -> &dyn FormPresenter {
        self.presenter.as_ref()
    }

    fn text(&self, key: &str) -> String {
        self.messages.format(key, &[])
    }

    fn icon(&self, key: &str) -> Option<FormIcon> {
        FormIcon::path(&self.text(key))
    }

    fn description_suffix(&self, item: &ShopItem) -> String {
        match &item.description {
            Some(description) => self.messages.format("item_button_description", &[description]),
            None => String::new(),
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    pub fn render(&self, state: &MenuState) -> Rendered {
        match state {
            MenuState::MainMenu => Rendered::Form(self.main_menu()),
            MenuState::SearchInput => Rendered::Form(self.search_input()),
            MenuState::SearchResults(ctx) => Rendered::Form(self.search_results(ctx)),
            MenuState::CategoryMenu(ctx) => match self.category_menu(ctx) {
                Some(form) => Rendered::Form(form),
                None => Rendered::Redirect {
                    notice: self.text("no_items_message"),
                    to: MenuState::MainMenu,
                },
            },
            MenuState::PurchaseQuantity(ctx) => Rendered::Form(self.purchase_form(ctx)),
            MenuState::ConfirmPurchase(ctx) => Rendered::Form(self.confirm_form(ctx)),
        }
    }

    fn main_menu(&self) -> Form {
        let mut options = Vec::with_capacity(self.catalog.categories().len() + 1);
        options.push(MenuOption::new(self.text("search_option"), self.icon("search_icon")));
        for category in self.catalog.categories() {
            options.push(MenuOption::new(category.name.clone(), FormIcon::path(&category.texture)));
        }

        Form::Menu(MenuForm {
            title: self.text("main_menu_title"),
            content: self.text("main_menu_subtitle"),
            options,
        })
    }

    fn search_input(&self) -> Form {
        Form::Custom(CustomForm {
            title: self.text("search_option"),
            elements: vec![
                FormElement::Label {
                    name: "info".to_string(),
                    text: self.text("search_option"),
                },
                FormElement::Input {
                    name: SEARCH_QUERY_FIELD.to_string(),
                    label: self.text("search_input_label"),
                    placeholder: self.text("search_input_placeholder"),
                    default: String::new(),
                },
            ],
        })
    }

    fn search_results(&self, ctx: &SearchResultsContext) -> Form {
        debug!("{} search results for '{}'", ctx.results.len(), ctx.query);

        // One option per result, even if it no longer resolves, so that
        // button indices stay aligned with `ctx.results`
        let options = ctx
            .results
            .iter()
            .map(|result| {
                let found = match result {
                    SearchResult::Category { category_id } => self
                        .catalog
                        .category(category_id)
                        .map(|category| MenuOption::new(category.name.clone(), FormIcon::path(&category.texture))),
                    SearchResult::Item { category_id, item_index } => {
                        self.catalog.item(category_id, *item_index).map(|item| {
                            MenuOption::new(item.name.clone(), item.texture.as_deref().and_then(FormIcon::path))
                        })
                    }
                };
                found.unwrap_or_else(|| MenuOption::new(result.category_id().to_string(), None))
            })
            .collect();

        Form::Menu(MenuForm {
            title: self.text("search_results_title"),
            content: self.text("search_results_subtitle"),
            options,
        })
    }

    /// None when the category is unknown or has no items
    fn category_menu(&self, ctx: &CategoryContext) -> Option<Form> {
        let category = self.catalog.category(&ctx.category_id)?;
        let items = self.catalog.items_in(&ctx.category_id);
        if items.is_empty() {
            return None;
        }

        let price_label = self.text("item_price");
        let currency = self.text("currency");

        let mut options = Vec::with_capacity(items.len() + 1);
        options.push(MenuOption::new(self.text("back_option"), self.icon("back_icon")));
        for item in items {
            let mut text = self.messages.format(
                "item_button",
                &[&item.name, &price_label, &item.price, &currency],
            );
            text.push_str(&self.description_suffix(item));
            options.push(MenuOption::new(
                text,
                item.texture.as_deref().and_then(FormIcon::path),
            ));
        }

        Some(Form::Menu(MenuForm {
            title: self.messages.format("category_menu_title", &[&category.name]),
            content: self.text("category_menu_subtitle"),
            options,
        }))
    }

    fn purchase_form(&self, ctx: &PurchaseContext) -> Form {
        let item = &ctx.item;
        let info = self.messages.format(
            "purchase_form_info",
            &[&item.name, &item.price, &self.text("currency"), &self.description_suffix(item)],
        );

        Form::Custom(CustomForm {
            title: self.messages.format("purchase_form_title", &[&item.name]),
            elements: vec![
                FormElement::Label {
                    name: "info".to_string(),
                    text: info,
                },
                FormElement::Toggle {
                    name: STACK_TOGGLE_FIELD.to_string(),
                    label: self.text("purchase_form_stack_toggle"),
                    default: false,
                },
                FormElement::Slider {
                    name: AMOUNT_SLIDER_FIELD.to_string(),
                    label: self.text("purchase_form_amount"),
                    min: SLIDER_MIN,
                    max: SLIDER_MAX,
                    step: 1,
                    default: item.count.clamp(SLIDER_MIN, SLIDER_MAX),
                },
            ],
        })
    }

    fn confirm_form(&self, ctx: &ConfirmContext) -> Form {
        Form::Menu(MenuForm {
            title: self.text("confirm_purchase_title"),
            content: self.messages.format(
                "confirm_purchase_info",
                &[&ctx.item.name, &ctx.amount, &ctx.total_price, &self.text("currency")],
            ),
            options: vec![
                MenuOption::new(self.text("confirm_purchase_yes"), None),
                MenuOption::new(self.text("confirm_purchase_no"), None),
            ],
        })
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    pub fn transition(&self, state: MenuState, response: FormResponse) -> Transition {
        let response = match response {
            FormResponse::Closed => return Transition::Close,
            other => other,
        };

        match (state, response) {
            (MenuState::MainMenu, FormResponse::Selected(0)) => Transition::Open(MenuState::SearchInput),
            (MenuState::MainMenu, FormResponse::Selected(index)) => {
                match self.catalog.categories().get(index - 1) {
                    Some(category) => Transition::Open(MenuState::category(&category.id)),
                    None => Transition::Ignore,
                }
            }

            (MenuState::SearchInput, FormResponse::Submitted(values)) => {
                let Some(query) = values.get_str(SEARCH_QUERY_FIELD) else {
                    return Transition::Ignore;
                };
                let results = search(&self.catalog, query);
                if results.is_empty() {
                    Transition::Notice {
                        message: self.text("no_results_message"),
                        next: MenuState::MainMenu,
                    }
                } else {
                    Transition::Open(MenuState::SearchResults(SearchResultsContext {
                        query: query.to_string(),
                        results,
                    }))
                }
            }

            (MenuState::SearchResults(ctx), FormResponse::Selected(index)) => match ctx.results.get(index) {
                Some(SearchResult::Category { category_id }) => {
                    if self.catalog.category(category_id).is_some() {
                        Transition::Open(MenuState::category(category_id))
                    } else {
                        Transition::Ignore
                    }
                }
                Some(SearchResult::Item { category_id, item_index }) => {
                    self.open_purchase(category_id, *item_index)
                }
                None => Transition::Ignore,
            },

            (MenuState::CategoryMenu(_), FormResponse::Selected(0)) => Transition::Open(MenuState::MainMenu),
            (MenuState::CategoryMenu(ctx), FormResponse::Selected(index)) => {
                self.open_purchase(&ctx.category_id, index - 1)
            }

            (MenuState::PurchaseQuantity(ctx), FormResponse::Submitted(values)) => {
                let Some(slider) = values.get_number(AMOUNT_SLIDER_FIELD) else {
                    return Transition::Ignore;
                };
                let full_stacks = values.get_bool(STACK_TOGGLE_FIELD).unwrap_or(false);
                // Float slider values truncate toward zero
                let slider = slider.clamp(f64::from(SLIDER_MIN), f64::from(SLIDER_MAX)) as u32;
                let amount = purchase_amount(slider, full_stacks);

                match quote_total(&ctx.item, amount) {
                    Ok(total_price) => Transition::Open(MenuState::ConfirmPurchase(ConfirmContext {
                        category_id: ctx.category_id,
                        item_index: ctx.item_index,
                        item: ctx.item,
                        amount,
                        total_price,
                    })),
                    Err(e) => {
                        warn!("Cannot quote '{}': {}", ctx.item.name, e);
                        Transition::Ignore
                    }
                }
            }

            (MenuState::ConfirmPurchase(ctx), FormResponse::Selected(0)) => Transition::Purchase(ctx),
            (MenuState::ConfirmPurchase(ctx), FormResponse::Selected(1)) => {
                Transition::Open(MenuState::category(&ctx.category_id))
            }

            (state, response) => {
                debug!("Response {:?} does not fit form {}", response, state.as_str());
                Transition::Ignore
            }
        }
    }

    fn open_purchase(&self, category_id: &str, item_index: usize) -> Transition {
        match self.catalog.item(category_id, item_index) {
            Some(item) => Transition::Open(MenuState::PurchaseQuantity(PurchaseContext {
                category_id: category_id.to_string(),
                item_index,
                item: item.clone(),
            })),
            None => Transition::Ignore,
        }
    }

    // ========================================================================
    // Purchase Transaction
    // ========================================================================

    /// Capacity check, then charge, then grant or refusal. The caller
    /// navigates back to the category once this returns.
    pub async fn purchase(&self, player_id: &str, ctx: &ConfirmContext) -> PurchaseOutcome {
        let request = PurchaseRequest::from_confirm(player_id, ctx);

        // Resolved once: the grant hands out exactly what was checked
        let kind = match self.resolver.resolve(&request.item_kind) {
            Some(kind) => kind,
            None => {
                warn!("Item kind '{}' for '{}' does not resolve", request.item_kind, ctx.item.name);
                self.presenter.send_message(&request.player_id, &self.text("inventory_full_message"));
                return PurchaseOutcome::InventoryFull;
            }
        };

        let fits = self
            .inventories
            .snapshot(player_id)
            .map(|snapshot| has_space_for(&snapshot, &kind, request.quantity))
            .unwrap_or(false);
        if !fits {
            debug!(
                "Player {} has no room for {}x{}",
                request.player_id, request.quantity, request.item_kind
            );
            self.presenter.send_message(player_id, &self.text("inventory_full_message"));
            return PurchaseOutcome::InventoryFull;
        }

        let charge = self.gateway.charge(player_id, request.total_price).await;
        if !charge.is_success() {
            info!(
                "Player {} could not pay {} for {}x{}: {}",
                request.player_id,
                request.total_price,
                request.quantity,
                request.item_kind,
                charge.as_str()
            );
            self.presenter.send_message(player_id, &self.text("not_enough_money"));
            return PurchaseOutcome::NotEnoughMoney(charge);
        }

        let leftover = self
            .inventories
            .add_stack(player_id, ItemStack::new(kind, request.quantity))
            .min(request.quantity);
        let granted = request.quantity - leftover;

        if granted > 0 {
            self.presenter.send_message(
                player_id,
                &self.messages.format("purchase_success", &[&granted, &ctx.item.name]),
            );
        }

        if leftover == 0 {
            info!(
                "Player {} bought {}x{} for {}",
                request.player_id, request.quantity, request.item_kind, request.total_price
            );
            return PurchaseOutcome::Purchased {
                amount: request.quantity,
            };
        }

        // Inventory changed between the check and the grant
        let refund = request.unit_price() * u64::from(leftover);
        let refunded = if self.gateway.refund(player_id, refund).await {
            refund
        } else {
            warn!("Refund of {} to {} failed", refund, player_id);
            0
        };
        warn!(
            "Player {} received {}/{}x{}; refunded {}",
            request.player_id, granted, request.quantity, request.item_kind, refunded
        );
        self.presenter.send_message(
            player_id,
            &self.messages.format(
                "purchase_refunded",
                &[&leftover, &ctx.item.name, &refunded, &self.text("currency")],
            ),
        );
        PurchaseOutcome::PartiallyGranted { granted, refunded }
    }
}
