//! Economy Gateway
//!
//! One charge operation over whichever balance backend the config selected.
//! The backend is chosen once at startup and never looked up per call.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::ledger::LedgerService;
use super::wallet::WalletStore;
use crate::config::EconomyConfig;

/// Failures reported by a balance backend itself
#[derive(Error, Debug)]
pub enum EconomyError {
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    #[error("amount {0} is out of range for the ledger")]
    AmountOutOfRange(u64),

    #[error("ledger database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result of a charge attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeOutcome {
    Success,
    InsufficientFunds,
    Unavailable,
}

impl ChargeOutcome {
    pub fn is_success(self) -> bool {
        self == ChargeOutcome::Success
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeOutcome::Success => "success",
            ChargeOutcome::InsufficientFunds => "insufficient_funds",
            ChargeOutcome::Unavailable => "unavailable",
        }
    }
}

#[derive(Clone)]
enum Backend {
    /// Asynchronous external balance service
    Ledger(Arc<dyn LedgerService>),
    /// Synchronous read-then-debit wallet
    Wallet(Arc<dyn WalletStore>),
    Disabled,
}

#[derive(Clone)]
pub struct EconomyGateway {
    backend: Backend,
}

impl EconomyGateway {
    pub fn ledger(service: Arc<dyn LedgerService>) -> Self {
        Self {
            backend: Backend::Ledger(service),
        }
    }

    pub fn wallet(store: Arc<dyn WalletStore>) -> Self {
        Self {
            backend: Backend::Wallet(store),
        }
    }

    /// Every charge resolves `Unavailable`
    pub fn disabled() -> Self {
        Self {
            backend: Backend::Disabled,
        }
    }

    /// Pick the backend from the config flags. The ledger wins if both are set.
    pub fn select(
        config: &EconomyConfig,
        ledger: Option<Arc<dyn LedgerService>>,
        wallet: Option<Arc<dyn WalletStore>>,
    ) -> Self {
        if config.use_ledger && config.use_wallet {
            warn!("Both economy backends are enabled; using the ledger");
        }

        let gateway = if config.use_ledger {
            match ledger {
                Some(service) => Self::ledger(service),
                None => {
                    warn!("economy.use_ledger is set but no ledger backend is available");
                    Self::disabled()
                }
            }
        } else if config.use_wallet {
            match wallet {
                Some(store) => Self::wallet(store),
                None => {
                    warn!("economy.use_wallet is set but no wallet backend is available");
                    Self::disabled()
                }
            }
        } else {
            Self::disabled()
        };

        info!("Economy backend: {}", gateway.backend_name());
        gateway
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Ledger(_) => "ledger",
            Backend::Wallet(_) => "wallet",
            Backend::Disabled => "disabled",
        }
    }

    /// Debit `amount` from the player's balance
    pub async fn charge(&self, player_id: &str, amount: u64) -> ChargeOutcome {
        let outcome = match &self.backend {
            Backend::Ledger(service) => match service.subtract_from_balance(player_id, amount).await {
                Ok(true) => ChargeOutcome::Success,
                Ok(false) => ChargeOutcome::InsufficientFunds,
                Err(e) => {
                    warn!("Ledger charge for {} failed: {}", player_id, e);
                    ChargeOutcome::Unavailable
                }
            },
            // Not serialized against other charges for the same player
            Backend::Wallet(store) => match store.balance(player_id) {
                Some(balance) if balance >= amount => {
                    store.reduce(player_id, amount);
                    ChargeOutcome::Success
                }
                Some(_) => ChargeOutcome::InsufficientFunds,
                None => ChargeOutcome::Unavailable,
            },
            Backend::Disabled => ChargeOutcome::Unavailable,
        };

        debug!(
            "Charge {} from {} via {}: {}",
            amount,
            player_id,
            self.backend_name(),
            outcome.as_str()
        );
        outcome
    }

    /// Credit `amount` back. Returns false if the backend could not do it.
    pub async fn refund(&self, player_id: &str, amount: u64) -> bool {
        match &self.backend {
            Backend::Ledger(service) => match service.add_to_balance(player_id, amount).await {
                Ok(()) => true,
                Err(e) => {
                    warn!("Ledger refund of {} to {} failed: {}", amount, player_id, e);
                    false
                }
            },
            Backend::Wallet(store) => {
                store.add(player_id, amount);
                true
            }
            Backend::Disabled => false,
        }
    }
}
