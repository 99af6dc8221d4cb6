//! Shop Service
//!
//! Entry point the host talks to: opens the main menu for a player and feeds
//! form responses through the controller, one at a time per player.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::controller::{Rendered, ShopController, Transition};
use super::form::FormResponse;
use super::session::{PendingForm, Session, SessionTable};
use super::state::MenuState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Response applied; a new form may have been presented
    Handled,
    /// Player dismissed the form
    Closed,
    /// Stale form id or a response that does not fit the form
    Ignored,
    /// An earlier submission for this player is still running
    Busy,
}

pub struct ShopService {
    controller: Arc<ShopController>,
    sessions: SessionTable,
}

impl ShopService {
    pub fn new(controller: Arc<ShopController>) -> Self {
        Self {
            controller,
            sessions: SessionTable::new(),
        }
    }

    pub fn controller(&self) -> &ShopController {
        &self.controller
    }

    /// Show the main menu. Returns false while the player is mid-transaction.
    pub fn open_main_menu(&self, player_id: &str) -> bool {
        let handle = self.sessions.handle(player_id);
        let Ok(mut session) = handle.try_lock() else {
            debug!("Player {} is busy, not opening the shop", player_id);
            return false;
        };
        self.enter(&mut session, player_id, MenuState::MainMenu);
        true
    }

    /// Apply a player's response to the form they were shown
    pub async fn submit(&self, player_id: &str, form_id: Uuid, response: FormResponse) -> SubmitOutcome {
        // No session means no form was ever shown to this player
        let Some(handle) = self.sessions.get(player_id) else {
            debug!("Player {} submitted form {} without a session", player_id, form_id);
            return SubmitOutcome::Ignored;
        };
        let Ok(mut session) = handle.try_lock() else {
            debug!("Player {} submitted while busy, dropping", player_id);
            return SubmitOutcome::Busy;
        };

        let Some(pending) = session.take_matching(form_id) else {
            debug!("Player {} submitted stale form {}", player_id, form_id);
            return SubmitOutcome::Ignored;
        };

        match self.controller.transition(pending.state, response) {
            Transition::Open(next) => {
                self.enter(&mut session, player_id, next);
                SubmitOutcome::Handled
            }
            Transition::Notice { message, next } => {
                self.controller.presenter().send_message(player_id, &message);
                self.enter(&mut session, player_id, next);
                SubmitOutcome::Handled
            }
            Transition::Purchase(ctx) => {
                // The session stays locked until the charge has resolved
                let outcome = self.controller.purchase(player_id, &ctx).await;
                debug!("Purchase by {} ended: {:?}", player_id, outcome);
                if self.sessions.finish_departed(player_id, &handle) {
                    debug!("Player {} left during the purchase, not re-rendering", player_id);
                    return SubmitOutcome::Handled;
                }
                self.enter(&mut session, player_id, MenuState::category(&ctx.category_id));
                SubmitOutcome::Handled
            }
            Transition::Close => SubmitOutcome::Closed,
            Transition::Ignore => SubmitOutcome::Ignored,
        }
    }

    /// Forget a player's session (disconnect). A purchase still running
    /// for the player keeps the session until its charge resolves.
    pub fn player_left(&self, player_id: &str) {
        self.sessions.leave(player_id);
    }

    /// Number of players with a session
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Present the form for `state`, following redirects
    fn enter(&self, session: &mut Session, player_id: &str, state: MenuState) {
        let mut state = state;
        loop {
            match self.controller.render(&state) {
                Rendered::Form(form) => {
                    let form_id = Uuid::new_v4();
                    debug!("Presenting {} ({}) to {}", state.as_str(), form_id, player_id);
                    self.controller.presenter().send_form(player_id, form_id, &form);
                    session.pending = Some(PendingForm { form_id, state });
                    return;
                }
                Rendered::Redirect { notice, to } => {
                    self.controller.presenter().send_message(player_id, &notice);
                    state = to;
                }
            }
        }
    }
}
