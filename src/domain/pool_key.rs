//! Structural pool identity.

use core::fmt;

use super::{Fee, TokenAddress};
use crate::error::{AmmError, Result};
use crate::hooks::HookAddress;

/// Minimum supported tick spacing.
const MIN_TICK_SPACING: i32 = 1;

/// Maximum supported tick spacing.
const MAX_TICK_SPACING: i32 = 32_767;

/// The structural key identifying one pool: two canonically-ordered
/// tokens, a fee tier, a tick spacing, and the hook bound to the pool
/// for its lifetime.
///
/// The constructor enforces every key invariant, so a `PoolKey` in hand
/// is always well-formed: distinct tokens in ascending address order,
/// tick spacing within `[1, 32767]`, and a hook address that is valid
/// for the fee (see [`HookAddress::is_valid`]).
///
/// # Examples
///
/// ```
/// use manifold_amm::domain::{Fee, PoolKey, TokenAddress};
/// use manifold_amm::hooks::HookAddress;
///
/// let a = TokenAddress::from_bytes([1u8; 20]);
/// let b = TokenAddress::from_bytes([2u8; 20]);
/// let key = PoolKey::new(b, a, Fee::PIPS_3000, 60, HookAddress::NONE);
/// assert!(key.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolKey {
    currency0: TokenAddress,
    currency1: TokenAddress,
    fee: Fee,
    tick_spacing: i32,
    hooks: HookAddress,
}

impl PoolKey {
    /// Creates a new canonically-ordered `PoolKey`.
    ///
    /// The two tokens are automatically sorted so that
    /// `currency0 < currency1`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if both tokens have the same address.
    /// - [`AmmError::InvalidTickSpacing`] if `tick_spacing` is outside
    ///   `[1, 32767]`.
    /// - [`AmmError::InvalidHookAddress`] if `hooks` is not valid for
    ///   `fee`.
    pub fn new(
        token1: TokenAddress,
        token2: TokenAddress,
        fee: Fee,
        tick_spacing: i32,
        hooks: HookAddress,
    ) -> Result<Self> {
        if token1 == token2 {
            return Err(AmmError::InvalidToken(
                "pool key requires two distinct token addresses",
            ));
        }
        if !(MIN_TICK_SPACING..=MAX_TICK_SPACING).contains(&tick_spacing) {
            return Err(AmmError::InvalidTickSpacing(
                "tick spacing out of range [1, 32767]",
            ));
        }
        hooks.is_valid(fee)?;

        let (currency0, currency1) = if token1 < token2 {
            (token1, token2)
        } else {
            (token2, token1)
        };

        Ok(Self {
            currency0,
            currency1,
            fee,
            tick_spacing,
            hooks,
        })
    }

    /// Returns the lower-ordered token.
    #[must_use]
    pub const fn currency0(&self) -> TokenAddress {
        self.currency0
    }

    /// Returns the higher-ordered token.
    #[must_use]
    pub const fn currency1(&self) -> TokenAddress {
        self.currency1
    }

    /// Returns the pool's fee tier.
    #[must_use]
    pub const fn fee(&self) -> Fee {
        self.fee
    }

    /// Returns the pool's tick spacing.
    #[must_use]
    pub const fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }

    /// Returns the hook bound to this pool.
    #[must_use]
    pub const fn hooks(&self) -> HookAddress {
        self.hooks
    }

    /// Returns `true` if the given token is one of the pool's pair.
    #[must_use]
    pub fn contains(&self, token: TokenAddress) -> bool {
        self.currency0 == token || self.currency1 == token
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} fee={} spacing={}",
            self.currency0, self.currency1, self.fee, self.tick_spacing
        )
    }
}
