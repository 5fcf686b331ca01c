//! The flash-accounting session ledger.
//!
//! A session is one atomic window: a caller acquires the lock, runs a
//! synchronous callback that may touch many pools and tokens, and the
//! session closes only when every touched token's net delta is exactly
//! zero. Deltas — not transfers — are the unit of settlement, which
//! nets many operations into at most one transfer per token and lets a
//! caller pay what it owes on one token with proceeds just received on
//! another.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::{PersistentStore, SlotStore};
use crate::domain::{Address, BalanceDelta, Delta, PoolKey, TokenAddress};
use crate::error::{AmmError, Result};
use crate::traits::Vault;

/// Bound on distinct tokens touched within one session.
pub const MAX_TOUCHED: usize = 255;

/// The flash-accounting engine: lock ownership, the touched-token set,
/// per-token deltas, and cached reserves.
///
/// Two states: *Idle* (no holder) and *Active* (holder = some caller).
/// All session state is exclusively owned by the current holder for the
/// session's duration; a second session cannot be entered while one is
/// active. Cached reserves are the only state that survives session
/// close — they track the vault balance last observed by `settle` and
/// `take`.
///
/// # Examples
///
/// ```
/// use manifold_amm::domain::{Address, Delta, TokenAddress};
/// use manifold_amm::session::SessionLedger;
///
/// let mut ledger = SessionLedger::new();
/// let caller = Address::from_bytes([1u8; 20]);
/// let token = TokenAddress::from_bytes([2u8; 20]);
///
/// let result = ledger.lock(caller, |session| {
///     session.account_delta(token, Delta::new(40))?;
///     session.account_delta(token, Delta::new(-40))?;
///     Ok(())
/// });
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Default)]
pub struct SessionLedger<S: SlotStore = PersistentStore> {
    holder: Option<Address>,
    touched: Vec<TokenAddress>,
    store: S,
    reserves: HashMap<TokenAddress, u128>,
}

impl SessionLedger<PersistentStore> {
    /// Creates an idle ledger over the persistent-mapping store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SlotStore> SessionLedger<S> {
    /// Creates an idle ledger over any slot store.
    #[must_use]
    pub fn with_store(store: S) -> Self {
        Self {
            holder: None,
            touched: Vec::new(),
            store,
            reserves: HashMap::new(),
        }
    }

    // -- State queries --------------------------------------------------------

    /// Returns `true` while a session is active.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.holder.is_some()
    }

    /// The current session holder, if any.
    #[must_use]
    pub fn holder(&self) -> Option<Address> {
        self.holder
    }

    /// The tokens touched so far, in first-touch order.
    #[must_use]
    pub fn touched(&self) -> &[TokenAddress] {
        &self.touched
    }

    /// The net delta recorded for `token` in the current session.
    #[must_use]
    pub fn delta_of(&self, token: TokenAddress) -> Delta {
        Delta::new(self.store.delta(token))
    }

    /// The cached last-observed vault balance for `token`.
    #[must_use]
    pub fn cached_reserve(&self, token: TokenAddress) -> u128 {
        self.reserves.get(&token).copied().unwrap_or(0)
    }

    // -- Session lifecycle ----------------------------------------------------

    /// Opens a session for `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::AlreadyLocked`] if a session is active.
    pub fn begin(&mut self, caller: Address) -> Result<()> {
        if self.holder.is_some() {
            return Err(AmmError::AlreadyLocked);
        }
        debug!(holder = %caller, "session opened");
        self.holder = Some(caller);
        self.touched.clear();
        self.store.clear();
        Ok(())
    }

    /// Closes the active session, enforcing the zero-delta invariant.
    ///
    /// Scans the touched set in first-touch order; the ledger returns to
    /// Idle whether the check passes or not, since a failed close fails
    /// the whole session.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotLockOwner`] if no session is active.
    /// - [`AmmError::TokenNotSettled`] on the first touched token whose
    ///   delta is nonzero.
    pub fn finish(&mut self) -> Result<()> {
        if self.holder.is_none() {
            return Err(AmmError::NotLockOwner);
        }
        let mut outstanding = None;
        for token in &self.touched {
            let delta = self.store.delta(*token);
            if delta != 0 {
                outstanding = Some((*token, Delta::new(delta)));
                break;
            }
        }
        self.reset_session();
        match outstanding {
            Some((token, delta)) => Err(AmmError::TokenNotSettled { token, delta }),
            None => {
                debug!("session closed");
                Ok(())
            }
        }
    }

    /// Discards the active session without the settlement check.
    ///
    /// Used when a failure inside the callback unwinds the session; all
    /// touched-token state is dropped.
    pub fn abort(&mut self) {
        debug!("session aborted");
        self.reset_session();
    }

    fn reset_session(&mut self) {
        self.holder = None;
        self.touched.clear();
        self.store.clear();
    }

    /// Acquires the session lock, runs `callback` synchronously, and
    /// closes the session.
    ///
    /// The callback's return value becomes this operation's result. Any
    /// failure — inside the callback or at the settlement check —
    /// unwinds the session with no partial ledger state retained.
    ///
    /// # Errors
    ///
    /// - [`AmmError::AlreadyLocked`] if a session is active (there is no
    ///   reentrant lock acquisition).
    /// - The callback's own error, verbatim.
    /// - [`AmmError::TokenNotSettled`] from the close check.
    pub fn lock<R>(
        &mut self,
        caller: Address,
        callback: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.begin(caller)?;
        match callback(self) {
            Ok(value) => {
                self.finish()?;
                Ok(value)
            }
            Err(err) => {
                self.abort();
                Err(err)
            }
        }
    }

    // -- Delta accounting -----------------------------------------------------

    /// Adds `amount` to the net delta of `token`, registering the token
    /// in the touched set on first contact.
    ///
    /// Zero amounts are a no-op and do not touch the token. First-touch
    /// detection preserves the slot-0 sentinel tie-break: a recorded
    /// slot of 0 counts as already-touched only when the token stored at
    /// position 0 is this token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotLockOwner`] if no session is active.
    /// - [`AmmError::TooManyTokensTouched`] on the 256th distinct token.
    /// - [`AmmError::DeltaOverflow`] if the running delta overflows.
    pub fn account_delta(&mut self, token: TokenAddress, amount: Delta) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        if self.holder.is_none() {
            return Err(AmmError::NotLockOwner);
        }

        let slot = self.store.slot_of(token);
        let already_touched = if slot == 0 {
            self.touched.first() == Some(&token)
        } else {
            true
        };
        if !already_touched {
            if self.touched.len() >= MAX_TOUCHED {
                return Err(AmmError::TooManyTokensTouched);
            }
            // Cast is in range: len < MAX_TOUCHED = 255.
            self.store.set_slot_of(token, self.touched.len() as u8);
            self.touched.push(token);
        }

        let current = Delta::new(self.store.delta(token));
        let updated = current.checked_add(amount)?;
        trace!(%token, %amount, net = %updated, "delta accounted");
        self.store.set_delta(token, updated.get());
        Ok(())
    }

    /// Accounts a pool operation's movement on both of its tokens.
    ///
    /// # Errors
    ///
    /// Same as [`account_delta`](Self::account_delta).
    pub fn account_pool_delta(&mut self, key: &PoolKey, delta: BalanceDelta) -> Result<()> {
        self.account_delta(key.currency0(), delta.amount0())?;
        self.account_delta(key.currency1(), delta.amount1())
    }

    // -- Settlement primitives ------------------------------------------------

    /// Withdraws `amount` of `token` to `recipient`, debiting the
    /// session.
    ///
    /// The holder takes on a negative delta — a debt that must be repaid
    /// before the session closes — which is what makes speculative,
    /// flash-loan-style withdrawals safe.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotLockOwner`] unless `caller` holds the session.
    /// - [`AmmError::InsufficientBalance`] if the cached reserve cannot
    ///   cover the withdrawal.
    /// - [`AmmError::DeltaOverflow`] on delta conversion overflow.
    pub fn take<V: Vault>(
        &mut self,
        vault: &mut V,
        caller: Address,
        token: TokenAddress,
        recipient: Address,
        amount: u128,
    ) -> Result<()> {
        self.require_holder(caller)?;
        let debit = Delta::from_amount(amount)?.checked_neg()?;
        self.account_delta(token, debit)?;
        let reserve = self.reserves.entry(token).or_insert(0);
        *reserve = reserve
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientBalance(
                "take exceeds the cached reserve",
            ))?;
        vault.transfer(token, recipient, amount)?;
        debug!(%token, amount, to = %recipient, "take");
        Ok(())
    }

    /// Credits the session with whatever was deposited to the vault
    /// since the last observation of `token`, and returns that amount.
    ///
    /// The positive difference between the vault's actual balance and
    /// the cached reserve is `paid`; the cache is refreshed to the new
    /// balance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotLockOwner`] unless `caller` holds the session.
    /// - [`AmmError::DeltaOverflow`] on delta conversion overflow.
    pub fn settle<V: Vault>(
        &mut self,
        vault: &V,
        caller: Address,
        token: TokenAddress,
    ) -> Result<u128> {
        self.require_holder(caller)?;
        let balance = vault.balance_of(token);
        let reserve = self.cached_reserve(token);
        let paid = balance.saturating_sub(reserve);
        self.account_delta(token, Delta::from_amount(paid)?)?;
        self.reserves.insert(token, balance);
        debug!(%token, paid, "settle");
        Ok(paid)
    }

    /// Checks that `caller` holds the active session.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::NotLockOwner`] otherwise.
    pub fn require_holder(&self, caller: Address) -> Result<()> {
        if self.holder != Some(caller) {
            return Err(AmmError::NotLockOwner);
        }
        Ok(())
    }

    // -- Crate-internal rollback support --------------------------------------

    pub(crate) fn reserves_snapshot(&self) -> HashMap<TokenAddress, u128> {
        self.reserves.clone()
    }

    pub(crate) fn restore_reserves(&mut self, reserves: HashMap<TokenAddress, u128>) {
        self.reserves = reserves;
    }
}
