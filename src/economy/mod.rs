pub mod gateway;
pub mod ledger;
pub mod wallet;

pub use gateway::{ChargeOutcome, EconomyError, EconomyGateway};
pub use ledger::LedgerService;
pub use wallet::{MemoryWallet, WalletStore};
