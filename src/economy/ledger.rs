//! Asynchronous balance service.
//!
//! The ledger decides on its own whether a debit succeeds; the gateway only
//! reports its answer.

use async_trait::async_trait;

use super::gateway::EconomyError;

#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Debit `amount`. `Ok(false)` means the balance was too low.
    async fn subtract_from_balance(&self, player_id: &str, amount: u64) -> Result<bool, EconomyError>;

    /// Credit `amount`.
    async fn add_to_balance(&self, player_id: &str, amount: u64) -> Result<(), EconomyError>;
}
