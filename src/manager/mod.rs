//! Pool orchestration over the session ledger and hook dispatcher.
//!
//! [`PoolManager`] is the settlement core's public surface: it maps
//! structural pool keys to curve-math state, brackets every pool
//! operation with the matching hook extension points, and reports each
//! operation's realized balance movement into the active session. The
//! manager computes no curve math of its own — pools come from the
//! configured [`PoolFactory`] and custody stays behind the [`Vault`].
//!
//! Sessions are all-or-nothing: `lock` snapshots pool state and cached
//! reserves at open, and any failure inside the callback or at the
//! settlement check restores the snapshot, so no partial effects are
//! retained.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Address, BalanceDelta, PoolKey, Tick, TokenAddress};
use crate::error::{AmmError, Result};
use crate::hooks::{Hook, HookAddress, HookDispatcher};
use crate::session::{PersistentStore, SessionLedger, SlotStore};
use crate::traits::{
    CurvePool, ModifyParams, PoolFactory, PoolSnapshot, SqrtPrice, SwapParams, Vault,
};

/// The settlement core: many pools, one ledger, one lock.
///
/// # Examples
///
/// ```
/// use manifold_amm::domain::{Address, Fee, TokenAddress};
/// use manifold_amm::hooks::HookAddress;
/// use manifold_amm::manager::PoolManager;
/// use manifold_amm::traits::MemoryVault;
/// # use manifold_amm::domain::{BalanceDelta, PoolKey, Tick};
/// # use manifold_amm::error::Result;
/// # use manifold_amm::traits::{CurvePool, ModifyParams, PoolFactory, PoolSnapshot, SqrtPrice, SwapParams};
/// # #[derive(Clone, Default)]
/// # struct NoopPool(Option<SqrtPrice>);
/// # impl CurvePool for NoopPool {
/// #     fn initialize(&mut self, _time: u64, price: SqrtPrice) -> Result<Tick> {
/// #         self.0 = Some(price);
/// #         Ok(Tick::ZERO)
/// #     }
/// #     fn modify_position(&mut self, _params: &ModifyParams) -> Result<BalanceDelta> {
/// #         Ok(BalanceDelta::ZERO)
/// #     }
/// #     fn swap(&mut self, _params: &SwapParams) -> Result<BalanceDelta> {
/// #         Ok(BalanceDelta::ZERO)
/// #     }
/// #     fn donate(&mut self, _amount0: u128, _amount1: u128) -> Result<BalanceDelta> {
/// #         Ok(BalanceDelta::ZERO)
/// #     }
/// #     fn snapshot(&self) -> PoolSnapshot {
/// #         PoolSnapshot { price: self.0, tick: None, liquidity: 0 }
/// #     }
/// # }
/// # struct NoopFactory;
/// # impl PoolFactory for NoopFactory {
/// #     type Pool = NoopPool;
/// #     fn create(&self, _key: &PoolKey) -> Result<Self::Pool> {
/// #         Ok(NoopPool::default())
/// #     }
/// # }
///
/// let mut manager = PoolManager::new(NoopFactory, MemoryVault::new());
/// let sender = Address::from_bytes([1u8; 20]);
/// let a = TokenAddress::from_bytes([1u8; 20]);
/// let b = TokenAddress::from_bytes([2u8; 20]);
/// let key = PoolKey::new(a, b, Fee::PIPS_3000, 60, HookAddress::NONE)?;
///
/// manager.initialize(sender, key, SqrtPrice::new(1 << 96))?;
/// assert!(manager.pool(&key).is_some());
/// # Ok::<(), manifold_amm::error::AmmError>(())
/// ```
pub struct PoolManager<F: PoolFactory, V: Vault, S: SlotStore = PersistentStore> {
    factory: F,
    vault: V,
    pools: HashMap<PoolKey, F::Pool>,
    dispatcher: HookDispatcher,
    ledger: SessionLedger<S>,
    time: u64,
}

impl<F: PoolFactory, V: Vault> PoolManager<F, V> {
    /// Creates a manager with no pools and an idle ledger over the
    /// persistent-mapping store.
    #[must_use]
    pub fn new(factory: F, vault: V) -> Self {
        Self::with_store(factory, vault, PersistentStore::default())
    }
}

impl<F: PoolFactory, V: Vault, S: SlotStore> PoolManager<F, V, S> {
    /// Creates a manager over any slot store.
    #[must_use]
    pub fn with_store(factory: F, vault: V, store: S) -> Self {
        Self {
            factory,
            vault,
            pools: HashMap::new(),
            dispatcher: HookDispatcher::new(),
            ledger: SessionLedger::with_store(store),
            time: 0,
        }
    }

    /// Sets the block time passed to pool initialization.
    pub fn set_time(&mut self, time: u64) {
        self.time = time;
    }

    /// Registers a hook collaborator under its address.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidHookAddress`] if the address carries a
    /// returns-delta flag without its base flag.
    pub fn install_hook(&mut self, address: HookAddress, hook: Box<dyn Hook>) -> Result<()> {
        self.dispatcher.register(address, hook)
    }

    /// Mutable access to the vault, for depositing ahead of `settle`.
    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    // -- Session entry point --------------------------------------------------

    /// Acquires the session lock, runs `callback` reentrantly against
    /// this manager, and closes the session under the zero-delta check.
    ///
    /// The callback may invoke every pool operation and the `take` and
    /// `settle` primitives. Any failure restores pool state and cached
    /// reserves to their values at session open: the session is
    /// all-or-nothing.
    ///
    /// # Errors
    ///
    /// - [`AmmError::AlreadyLocked`] while a session is active.
    /// - The callback's error, verbatim.
    /// - [`AmmError::TokenNotSettled`] from the close check.
    pub fn lock<R>(
        &mut self,
        caller: Address,
        callback: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.ledger.begin(caller)?;
        let pools_snapshot = self.pools.clone();
        let reserves_snapshot = self.ledger.reserves_snapshot();
        let result = callback(self).and_then(|value| self.ledger.finish().map(|()| value));
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                debug!(%err, "session failed, restoring snapshot");
                self.pools = pools_snapshot;
                self.ledger.abort();
                self.ledger.restore_reserves(reserves_snapshot);
                Err(err)
            }
        }
    }

    // -- Pool operations ------------------------------------------------------

    /// Creates and initializes the pool identified by `key`.
    ///
    /// Requires no session: initialization never moves balances. A hook
    /// failure in either bracket leaves the pool uncreated, its price
    /// unset.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolAlreadyInitialized`] on a repeat key.
    /// - Hook contract violations from dispatch.
    /// - The factory's or curve's own rejection.
    pub fn initialize(&mut self, sender: Address, key: PoolKey, price: SqrtPrice) -> Result<Tick> {
        if self.pools.contains_key(&key) {
            return Err(AmmError::PoolAlreadyInitialized);
        }
        self.dispatcher.before_initialize(sender, &key, price)?;
        let mut pool = self.factory.create(&key)?;
        let tick = pool.initialize(self.time, price)?;
        self.dispatcher.after_initialize(sender, &key, price, tick)?;
        debug!(%key, %tick, "pool initialized");
        self.pools.insert(key, pool);
        Ok(tick)
    }

    /// Modifies a liquidity position and accounts the movement into the
    /// active session.
    ///
    /// The before/after extension points are selected by the sign of
    /// `params.liquidity_delta`; an after-hook delta is folded into the
    /// realized movement before accounting.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotLockOwner`] unless `sender` holds the session.
    /// - [`AmmError::PoolNotInitialized`] for an unknown key.
    /// - Hook contract violations and curve rejections.
    pub fn modify_liquidity(
        &mut self,
        sender: Address,
        key: &PoolKey,
        params: &ModifyParams,
    ) -> Result<BalanceDelta> {
        self.ledger.require_holder(sender)?;
        if !self.pools.contains_key(key) {
            return Err(AmmError::PoolNotInitialized);
        }
        self.dispatcher.before_modify_position(sender, key, params)?;
        let pool = self
            .pools
            .get_mut(key)
            .ok_or(AmmError::PoolNotInitialized)?;
        let delta = pool.modify_position(params)?;
        let delta = self
            .dispatcher
            .after_modify_position(sender, key, params, delta)?;
        self.ledger.account_pool_delta(key, delta)?;
        Ok(delta)
    }

    /// Executes a swap and accounts the movement into the active
    /// session.
    ///
    /// A before-swap hook delta adjusts the specified amount before the
    /// curve runs; an after-swap delta is folded into the unspecified
    /// side of the realized movement.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotLockOwner`] unless `sender` holds the session.
    /// - [`AmmError::PoolNotInitialized`] for an unknown key.
    /// - Hook contract violations and curve rejections.
    pub fn swap(
        &mut self,
        sender: Address,
        key: &PoolKey,
        params: &SwapParams,
    ) -> Result<BalanceDelta> {
        self.ledger.require_holder(sender)?;
        if !self.pools.contains_key(key) {
            return Err(AmmError::PoolNotInitialized);
        }
        let adjustment = self.dispatcher.before_swap(sender, key, params)?;
        let effective = SwapParams {
            amount_specified: params.amount_specified.checked_add(adjustment)?,
            ..*params
        };
        let pool = self
            .pools
            .get_mut(key)
            .ok_or(AmmError::PoolNotInitialized)?;
        let delta = pool.swap(&effective)?;
        let delta = self.dispatcher.after_swap(sender, key, &effective, delta)?;
        self.ledger.account_pool_delta(key, delta)?;
        Ok(delta)
    }

    /// Donates to in-range liquidity and accounts the movement into the
    /// active session.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotLockOwner`] unless `sender` holds the session.
    /// - [`AmmError::PoolNotInitialized`] for an unknown key.
    /// - Hook contract violations and curve rejections.
    pub fn donate(
        &mut self,
        sender: Address,
        key: &PoolKey,
        amount0: u128,
        amount1: u128,
    ) -> Result<BalanceDelta> {
        self.ledger.require_holder(sender)?;
        if !self.pools.contains_key(key) {
            return Err(AmmError::PoolNotInitialized);
        }
        self.dispatcher
            .before_donate(sender, key, amount0, amount1)?;
        let pool = self
            .pools
            .get_mut(key)
            .ok_or(AmmError::PoolNotInitialized)?;
        let delta = pool.donate(amount0, amount1)?;
        self.dispatcher
            .after_donate(sender, key, amount0, amount1, delta)?;
        self.ledger.account_pool_delta(key, delta)?;
        Ok(delta)
    }

    // -- Settlement primitives ------------------------------------------------

    /// Withdraws `amount` of `token` to `recipient` against the session.
    ///
    /// # Errors
    ///
    /// See [`SessionLedger::take`].
    pub fn take(
        &mut self,
        sender: Address,
        token: TokenAddress,
        recipient: Address,
        amount: u128,
    ) -> Result<()> {
        self.ledger
            .take(&mut self.vault, sender, token, recipient, amount)
    }

    /// Credits the session with what was deposited since the last
    /// observation of `token`; returns the amount credited.
    ///
    /// # Errors
    ///
    /// See [`SessionLedger::settle`].
    pub fn settle(&mut self, sender: Address, token: TokenAddress) -> Result<u128> {
        self.ledger.settle(&self.vault, sender, token)
    }

    // -- Read-only queries ----------------------------------------------------

    /// A read-only view of the pool's curve state, if initialized.
    #[must_use]
    pub fn pool(&self, key: &PoolKey) -> Option<PoolSnapshot> {
        self.pools.get(key).map(CurvePool::snapshot)
    }

    /// The net delta recorded for `token` in the current session.
    #[must_use]
    pub fn delta_of(&self, token: TokenAddress) -> crate::domain::Delta {
        self.ledger.delta_of(token)
    }

    /// Returns `true` while a session is active.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.ledger.is_locked()
    }

    /// The cached last-observed vault balance for `token`.
    #[must_use]
    pub fn cached_reserve(&self, token: TokenAddress) -> u128 {
        self.ledger.cached_reserve(token)
    }
}
