use dashmap::DashMap;

/// Synchronous balance store. Reads and writes are separate calls, so a
/// check followed by a debit is not atomic.
pub trait WalletStore: Send + Sync {
    /// Current balance, None if the player has no account
    fn balance(&self, player_id: &str) -> Option<u64>;

    fn reduce(&self, player_id: &str, amount: u64);

    fn add(&self, player_id: &str, amount: u64);
}

/// Wallet kept in process memory
#[derive(Default)]
pub struct MemoryWallet {
    balances: DashMap<String, u64>,
    /// Balance given to players seen for the first time, if any
    starting_balance: Option<u64>,
}

impl MemoryWallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open accounts on first lookup with `amount`
    pub fn with_starting_balance(amount: u64) -> Self {
        Self {
            balances: DashMap::new(),
            starting_balance: Some(amount),
        }
    }

    pub fn open_account(&self, player_id: &str, balance: u64) {
        self.balances.insert(player_id.to_string(), balance);
    }
}

impl WalletStore for MemoryWallet {
    fn balance(&self, player_id: &str) -> Option<u64> {
        if let Some(balance) = self.balances.get(player_id) {
            return Some(*balance);
        }
        let starting = self.starting_balance?;
        Some(*self.balances.entry(player_id.to_string()).or_insert(starting))
    }

    fn reduce(&self, player_id: &str, amount: u64) {
        if let Some(mut balance) = self.balances.get_mut(player_id) {
            *balance = balance.saturating_sub(amount);
        }
    }

    fn add(&self, player_id: &str, amount: u64) {
        let mut balance = self.balances.entry(player_id.to_string()).or_insert(0);
        *balance = balance.saturating_add(amount);
    }
}
