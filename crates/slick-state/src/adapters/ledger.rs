use crate::domain::Identity;
use crate::ports::{LedgerError, TipLedger};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Balance map standing in for the chain's native transfer.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: Mutex<HashMap<Identity, u64>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `lamports` into `account`. Saturates rather than wrapping.
    pub fn credit(&self, account: Identity, lamports: u64) {
        let mut balances = self.balances.lock();
        let balance = balances.entry(account).or_insert(0);
        *balance = balance.saturating_add(lamports);
    }

    pub fn balance(&self, account: &Identity) -> u64 {
        self.balances.lock().get(account).copied().unwrap_or(0)
    }
}

impl TipLedger for InMemoryLedger {
    fn transfer(&self, from: &Identity, to: &Identity, lamports: u64) -> Result<(), LedgerError> {
        let mut balances = self.balances.lock();

        let available = balances.get(from).copied().unwrap_or(0);
        if available < lamports {
            return Err(LedgerError::InsufficientFunds {
                account: *from,
                required: lamports,
                available,
            });
        }
        let credited = balances
            .get(to)
            .copied()
            .unwrap_or(0)
            .checked_add(lamports)
            .ok_or(LedgerError::BalanceOverflow)?;

        balances.insert(*from, available - lamports);
        balances.insert(*to, credited);
        Ok(())
    }
}
