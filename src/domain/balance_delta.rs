//! Per-pool pair of signed deltas.

use core::fmt;

use super::Delta;
use crate::error::Result;

/// The signed balance movement a pool operation produced on the pool's
/// two tokens, in canonical `(currency0, currency1)` order.
///
/// Every balance-affecting pool operation returns one of these; the
/// orchestrator folds it into the session ledger via
/// `account_pool_delta`.
///
/// # Examples
///
/// ```
/// use manifold_amm::domain::{BalanceDelta, Delta};
///
/// let d = BalanceDelta::new(Delta::new(100), Delta::new(-50));
/// assert_eq!(d.amount0().get(), 100);
/// assert_eq!(d.amount1().get(), -50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[must_use]
pub struct BalanceDelta {
    amount0: Delta,
    amount1: Delta,
}

impl BalanceDelta {
    /// The zero movement.
    pub const ZERO: Self = Self {
        amount0: Delta::ZERO,
        amount1: Delta::ZERO,
    };

    /// Creates a new `BalanceDelta` from its two components.
    pub const fn new(amount0: Delta, amount1: Delta) -> Self {
        Self { amount0, amount1 }
    }

    /// The signed movement on the pool's lower-ordered token.
    #[must_use]
    pub const fn amount0(&self) -> Delta {
        self.amount0
    }

    /// The signed movement on the pool's higher-ordered token.
    #[must_use]
    pub const fn amount1(&self) -> Delta {
        self.amount1
    }

    /// Returns `true` if both components are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount0.is_zero() && self.amount1.is_zero()
    }

    /// Component-wise checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DeltaOverflow`](crate::error::AmmError::DeltaOverflow)
    /// if either component overflows.
    pub fn checked_add(self, other: Self) -> Result<Self> {
        Ok(Self {
            amount0: self.amount0.checked_add(other.amount0)?,
            amount1: self.amount1.checked_add(other.amount1)?,
        })
    }

    /// Returns this delta with `adjustment` folded into `amount0`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DeltaOverflow`](crate::error::AmmError::DeltaOverflow)
    /// on overflow.
    pub fn fold_amount0(self, adjustment: Delta) -> Result<Self> {
        Ok(Self {
            amount0: self.amount0.checked_add(adjustment)?,
            amount1: self.amount1,
        })
    }

    /// Returns this delta with `adjustment` folded into `amount1`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DeltaOverflow`](crate::error::AmmError::DeltaOverflow)
    /// on overflow.
    pub fn fold_amount1(self, adjustment: Delta) -> Result<Self> {
        Ok(Self {
            amount0: self.amount0,
            amount1: self.amount1.checked_add(adjustment)?,
        })
    }
}

impl fmt::Display for BalanceDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.amount0, self.amount1)
    }
}
