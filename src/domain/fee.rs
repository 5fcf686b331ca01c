//! Pool fee expressed in pips, with a dynamic-fee marker.

use core::fmt;

use crate::error::{AmmError, Result};

/// A pool fee in pips (hundredths of a basis point).
///
/// A fee is either *static* — a fixed value no greater than
/// [`Fee::MAX_PIPS`] (100%) — or *dynamic*, marked by the
/// [`Fee::DYNAMIC_FLAG`] bit, in which case the concrete rate is supplied
/// at runtime by the pool's hook. The dynamic marker participates in hook
/// address validation: a pool with no hook can never update a dynamic
/// fee, so that combination is rejected at key construction.
///
/// # Examples
///
/// ```
/// use manifold_amm::domain::Fee;
///
/// assert!(!Fee::PIPS_3000.is_dynamic());
/// assert!(Fee::dynamic().is_dynamic());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fee(u32);

impl Fee {
    /// Marker bit identifying a dynamic fee.
    pub const DYNAMIC_FLAG: u32 = 0x80_0000;

    /// Maximum static fee: 1 000 000 pips = 100%.
    pub const MAX_PIPS: u32 = 1_000_000;

    /// 0.05% — stablecoin pairs (500 pips).
    pub const PIPS_500: Self = Self(500);

    /// 0.30% — standard volatile pairs (3000 pips).
    pub const PIPS_3000: Self = Self(3000);

    /// 1.00% — exotic pairs (10000 pips).
    pub const PIPS_10000: Self = Self(10_000);

    /// Creates a static fee from a raw pips value.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if `pips` exceeds
    /// [`Fee::MAX_PIPS`] or carries the dynamic marker bit.
    pub const fn from_pips(pips: u32) -> Result<Self> {
        if pips & Self::DYNAMIC_FLAG != 0 {
            return Err(AmmError::InvalidFee(
                "static fee must not carry the dynamic marker",
            ));
        }
        if pips > Self::MAX_PIPS {
            return Err(AmmError::InvalidFee("fee exceeds 100%"));
        }
        Ok(Self(pips))
    }

    /// Creates the dynamic-fee marker value.
    #[must_use]
    pub const fn dynamic() -> Self {
        Self(Self::DYNAMIC_FLAG)
    }

    /// Returns the raw pips value, including the marker bit if present.
    #[must_use]
    pub const fn pips(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the fee carries the dynamic marker.
    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        self.0 & Self::DYNAMIC_FLAG != 0
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dynamic() {
            write!(f, "dynamic")
        } else {
            write!(f, "{} pips", self.0)
        }
    }
}
