//! Curve-math collaborator seam.
//!
//! The settlement core treats curve math as opaque: a [`CurvePool`]
//! receives operation parameters and answers with the signed
//! [`BalanceDelta`] the operation produced. Tick bookkeeping, fee growth,
//! and the swap formula all live behind this trait; the core only folds
//! the returned deltas into the session ledger.

use core::fmt;

use crate::domain::{BalanceDelta, Delta, Tick};
use crate::error::{AmmError, Result};

/// An opaque square-root price, in the fixed-point encoding the curve
/// implementation chooses. The core never interprets it; it only passes
/// it from the caller to the pool and back out of snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SqrtPrice(u128);

impl SqrtPrice {
    /// Wraps a raw encoded price.
    #[must_use]
    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Returns the raw encoded price.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for SqrtPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters for a position modification.
///
/// The sign of `liquidity_delta` selects the operation: positive adds
/// liquidity, non-positive removes it. Hook dispatch uses the same sign
/// to choose between the add-liquidity and remove-liquidity extension
/// points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModifyParams {
    /// Lower tick boundary of the position.
    pub tick_lower: Tick,
    /// Upper tick boundary of the position.
    pub tick_upper: Tick,
    /// Signed liquidity change; positive adds, non-positive removes.
    pub liquidity_delta: i128,
}

impl ModifyParams {
    /// Creates validated modification parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidTick`] if `tick_lower >= tick_upper`.
    pub const fn new(tick_lower: Tick, tick_upper: Tick, liquidity_delta: i128) -> Result<Self> {
        if tick_lower.get() >= tick_upper.get() {
            return Err(AmmError::InvalidTick("lower tick must be below upper tick"));
        }
        Ok(Self {
            tick_lower,
            tick_upper,
            liquidity_delta,
        })
    }

    /// Returns `true` if this modification adds liquidity.
    #[must_use]
    pub const fn is_add(&self) -> bool {
        self.liquidity_delta > 0
    }
}

/// Parameters for a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapParams {
    /// Swap direction: `true` sells `currency0` for `currency1`.
    pub zero_for_one: bool,
    /// Signed specified amount: positive for exact-output, negative for
    /// exact-input, following the delta sign convention.
    pub amount_specified: Delta,
    /// Price limit the curve must not cross.
    pub price_limit: SqrtPrice,
}

/// Read-only view of a pool's curve state.
///
/// `price` and `tick` are `None` until the pool has been initialized,
/// which is how a failed initialization is observable from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolSnapshot {
    /// Current price, if initialized.
    pub price: Option<SqrtPrice>,
    /// Current tick, if initialized.
    pub tick: Option<Tick>,
    /// Currently active liquidity.
    pub liquidity: u128,
}

/// The curve-math collaborator.
///
/// Implementations own all price and tick state for one pool. Every
/// balance-affecting method returns the signed movement on the pool's
/// two tokens in canonical order; the settlement core accounts it into
/// the active session.
///
/// `Clone` is required so the orchestrator can snapshot pool state at
/// session open and restore it when a session fails, keeping sessions
/// all-or-nothing.
pub trait CurvePool: Clone {
    /// Sets the pool's starting price under the given block time and
    /// returns the corresponding tick.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolAlreadyInitialized`] on repeat initialization.
    /// - [`AmmError::PoolOperation`] if the price is unusable.
    fn initialize(&mut self, time: u64, price: SqrtPrice) -> Result<Tick>;

    /// Applies a position modification and returns the balance movement.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotInitialized`] before initialization.
    /// - [`AmmError::PoolOperation`] on curve-specific rejection.
    fn modify_position(&mut self, params: &ModifyParams) -> Result<BalanceDelta>;

    /// Executes a swap and returns the balance movement.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotInitialized`] before initialization.
    /// - [`AmmError::PoolOperation`] on curve-specific rejection.
    fn swap(&mut self, params: &SwapParams) -> Result<BalanceDelta>;

    /// Credits donated amounts to in-range liquidity and returns the
    /// balance movement.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotInitialized`] before initialization.
    /// - [`AmmError::PoolOperation`] on curve-specific rejection.
    fn donate(&mut self, amount0: u128, amount1: u128) -> Result<BalanceDelta>;

    /// Returns a read-only view of the curve state.
    fn snapshot(&self) -> PoolSnapshot;
}
