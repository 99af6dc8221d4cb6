use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::state::MenuState;

/// The form a player currently has open
#[derive(Debug, Clone)]
pub struct PendingForm {
    pub form_id: Uuid,
    pub state: MenuState,
}

#[derive(Debug, Default)]
pub struct Session {
    pub pending: Option<PendingForm>,
}

impl Session {
    /// Take the pending form if `form_id` matches it; otherwise leave it
    pub fn take_matching(&mut self, form_id: Uuid) -> Option<PendingForm> {
        self.pending.take_if(|pending| pending.form_id == form_id)
    }
}

/// Per-player sessions. Holding a session's lock is what serializes one
/// player's submissions; different players never contend.
#[derive(Default)]
pub struct SessionTable {
    sessions: DashMap<String, Arc<Mutex<Session>>>,
    /// Players who left while a submission still held their session
    departed: DashMap<String, ()>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session handle for a player, created on first use. A player who left
    /// mid-submission and comes back keeps the session they had.
    pub fn handle(&self, player_id: &str) -> Arc<Mutex<Session>> {
        self.departed.remove(player_id);
        self.sessions
            .entry(player_id.to_string())
            .or_default()
            .clone()
    }

    /// Existing session handle; never creates one
    pub fn get(&self, player_id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.get(player_id).map(|entry| entry.value().clone())
    }

    /// Drop an idle session. A session still locked by a submission is
    /// kept until that submission calls [`Self::finish_departed`].
    pub fn leave(&self, player_id: &str) {
        let removed = self
            .sessions
            .remove_if(player_id, |_, session| session.try_lock().is_ok())
            .is_some();
        if !removed && self.sessions.contains_key(player_id) {
            self.departed.insert(player_id.to_string(), ());
        }
    }

    /// Called by the lock holder once its work is done. Returns true, and
    /// drops the session, if the player left in the meantime.
    pub fn finish_departed(&self, player_id: &str, handle: &Arc<Mutex<Session>>) -> bool {
        if self.departed.remove(player_id).is_none() {
            return false;
        }
        self.sessions
            .remove_if(player_id, |_, session| Arc::ptr_eq(session, handle));
        true
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
