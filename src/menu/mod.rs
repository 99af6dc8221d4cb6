pub mod controller;
pub mod form;
pub mod service;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;

pub use controller::{PurchaseOutcome, Rendered, ShopController, Transition};
pub use form::{CustomForm, Form, FormElement, FormIcon, FormPresenter, FormResponse, FormValue, FormValues, MenuForm, MenuOption};
pub use service::{ShopService, SubmitOutcome};
pub use state::{MenuState, PurchaseRequest};

/// Quantity slider bounds on the purchase form
pub const SLIDER_MIN: u32 = 1;
pub const SLIDER_MAX: u32 = 64;
/// Units per slider step when the full-stack toggle is on
pub const STACK_MULTIPLIER: u32 = 64;
pub const MAX_PURCHASE_AMOUNT: u32 = SLIDER_MAX * STACK_MULTIPLIER;
