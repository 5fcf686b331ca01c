//! Token custody collaborator.
//!
//! The ledger never moves tokens itself; `take` and `settle` talk to a
//! [`Vault`] that holds the actual balances. The vault answers two
//! questions only: how much of a token the ledger currently holds, and
//! a transfer out of that holding. Everything else — deposits, approvals,
//! wrapped-native handling — is the embedder's concern.

use std::collections::HashMap;

use crate::domain::{Address, TokenAddress};
use crate::error::{AmmError, Result};

/// Custody seam backing `take` and `settle`.
pub trait Vault {
    /// Returns the amount of `token` currently held on behalf of the
    /// ledger.
    fn balance_of(&self, token: TokenAddress) -> u128;

    /// Transfers `amount` of `token` out of the ledger's holding to
    /// `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if the holding cannot
    /// cover the transfer.
    fn transfer(&mut self, token: TokenAddress, recipient: Address, amount: u128) -> Result<()>;
}

/// In-memory reference vault.
///
/// Tracks one balance per token in a map. Useful for tests and for
/// embeddings that manage custody elsewhere and only need the
/// accounting; production deployments wrap their real token layer
/// instead.
#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    balances: HashMap<TokenAddress, u128>,
}

impl MemoryVault {
    /// Creates an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `token` to the ledger's holding, as if a
    /// caller had transferred tokens in.
    pub fn deposit(&mut self, token: TokenAddress, amount: u128) {
        let entry = self.balances.entry(token).or_insert(0);
        *entry = entry.saturating_add(amount);
    }
}

impl Vault for MemoryVault {
    fn balance_of(&self, token: TokenAddress) -> u128 {
        self.balances.get(&token).copied().unwrap_or(0)
    }

    fn transfer(&mut self, token: TokenAddress, _recipient: Address, amount: u128) -> Result<()> {
        let Some(balance) = self.balances.get_mut(&token) else {
            return Err(AmmError::InsufficientBalance(
                "no holding for the requested token",
            ));
        };
        *balance = balance
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientBalance(
                "transfer exceeds the ledger's holding",
            ))?;
        Ok(())
    }
}
