//! Signed net token amount with checked arithmetic.

use core::fmt;

use crate::error::{AmmError, Result};

/// A signed net amount of one token owed between the ledger and the
/// current session holder.
///
/// Positive means the ledger owes the holder (the holder may `take` it);
/// negative means the holder owes the ledger (and must `settle` before
/// the session closes).
///
/// Arithmetic methods are checked: they return
/// [`AmmError::DeltaOverflow`] instead of panicking or wrapping.
///
/// # Examples
///
/// ```
/// use manifold_amm::domain::Delta;
///
/// let owed = Delta::new(100);
/// let paid = Delta::new(-100);
/// assert_eq!(owed.checked_add(paid), Ok(Delta::ZERO));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Delta(i128);

impl Delta {
    /// The zero delta — the settled state.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Delta` from a raw `i128` value.
    pub const fn new(value: i128) -> Self {
        Self(value)
    }

    /// Converts an unsigned amount into a positive delta.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DeltaOverflow`] if `amount` exceeds
    /// `i128::MAX`.
    pub const fn from_amount(amount: u128) -> Result<Self> {
        if amount > i128::MAX as u128 {
            return Err(AmmError::DeltaOverflow);
        }
        Ok(Self(amount as i128))
    }

    /// Returns the underlying `i128` value.
    #[must_use]
    pub const fn get(&self) -> i128 {
        self.0
    }

    /// Returns `true` if the delta is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the ledger owes the holder.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the holder owes the ledger.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DeltaOverflow`] on `i128` overflow.
    pub const fn checked_add(self, other: Self) -> Result<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Ok(Self(v)),
            None => Err(AmmError::DeltaOverflow),
        }
    }

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DeltaOverflow`] on `i128` overflow.
    pub const fn checked_sub(self, other: Self) -> Result<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Ok(Self(v)),
            None => Err(AmmError::DeltaOverflow),
        }
    }

    /// Checked negation.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DeltaOverflow`] when negating `i128::MIN`.
    pub const fn checked_neg(self) -> Result<Self> {
        match self.0.checked_neg() {
            Some(v) => Ok(Self(v)),
            None => Err(AmmError::DeltaOverflow),
        }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
