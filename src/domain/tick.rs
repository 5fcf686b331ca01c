//! Discrete price point reported by the curve-math collaborator.

use core::fmt;

use crate::error::{AmmError, Result};

/// Minimum valid tick index (Uniswap v3 standard).
const MIN_TICK: i32 = -887_272;

/// Maximum valid tick index (Uniswap v3 standard).
const MAX_TICK: i32 = 887_272;

/// A discrete price point in the concentrated-liquidity model.
///
/// The settlement core never computes ticks itself; it receives them
/// from pool initialization and passes tick ranges through to position
/// modifications. Valid indices range from [`MIN`](Self::MIN)
/// (`-887272`) to [`MAX`](Self::MAX) (`887272`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick(i32);

impl Tick {
    /// Minimum valid tick (`-887272`).
    pub const MIN: Self = Self(MIN_TICK);

    /// Maximum valid tick (`887272`).
    pub const MAX: Self = Self(MAX_TICK);

    /// Neutral tick where `price = 1.0001^0 = 1.0`.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Tick` with range validation.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidTick`] if `value` is outside the range
    /// `[-887272, 887272]`.
    pub const fn new(value: i32) -> Result<Self> {
        if value < MIN_TICK || value > MAX_TICK {
            return Err(AmmError::InvalidTick("tick out of range [-887272, 887272]"));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `i32` tick index.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
