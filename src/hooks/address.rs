//! Address-encoded hook permissions.
//!
//! A hook's capabilities are not stored anywhere — they are read out of
//! its own 160-bit identifier. Each of the 14 permission flags owns one
//! fixed high-order bit, from most- to least-significant, so a pool key
//! fully determines which extension points will ever fire for that pool.
//!
//! The encoding lives in this module alone, as pure bit tests, so the
//! 14-flag layout is testable in isolation from dispatch.

use core::fmt;

use crate::error::{AmmError, Result};

/// One named hook permission and its bit position.
///
/// Positions run from bit 159 (`BeforeInitialize`) down to bit 146
/// (`AfterRemoveLiquidityReturnsDelta`), counting from the least
/// significant bit of the 160-bit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookFlag {
    /// Consulted before pool initialization.
    BeforeInitialize,
    /// Consulted after pool initialization.
    AfterInitialize,
    /// Consulted before liquidity is added.
    BeforeAddLiquidity,
    /// Consulted after liquidity is added.
    AfterAddLiquidity,
    /// Consulted before liquidity is removed.
    BeforeRemoveLiquidity,
    /// Consulted after liquidity is removed.
    AfterRemoveLiquidity,
    /// Consulted before a swap.
    BeforeSwap,
    /// Consulted after a swap.
    AfterSwap,
    /// Consulted before a donation.
    BeforeDonate,
    /// Consulted after a donation.
    AfterDonate,
    /// The before-swap hook may return a balance adjustment.
    BeforeSwapReturnsDelta,
    /// The after-swap hook may return a balance adjustment.
    AfterSwapReturnsDelta,
    /// The after-add-liquidity hook may return a balance adjustment.
    AfterAddLiquidityReturnsDelta,
    /// The after-remove-liquidity hook may return a balance adjustment.
    AfterRemoveLiquidityReturnsDelta,
}

impl HookFlag {
    /// All 14 flags, in descending bit order.
    pub const ALL: [Self; 14] = [
        Self::BeforeInitialize,
        Self::AfterInitialize,
        Self::BeforeAddLiquidity,
        Self::AfterAddLiquidity,
        Self::BeforeRemoveLiquidity,
        Self::AfterRemoveLiquidity,
        Self::BeforeSwap,
        Self::AfterSwap,
        Self::BeforeDonate,
        Self::AfterDonate,
        Self::BeforeSwapReturnsDelta,
        Self::AfterSwapReturnsDelta,
        Self::AfterAddLiquidityReturnsDelta,
        Self::AfterRemoveLiquidityReturnsDelta,
    ];

    /// The four (returns-delta, base) flag pairings. A hook cannot claim
    /// to return a delta for an extension point it does not subscribe to.
    pub const DELTA_PAIRS: [(Self, Self); 4] = [
        (Self::BeforeSwapReturnsDelta, Self::BeforeSwap),
        (Self::AfterSwapReturnsDelta, Self::AfterSwap),
        (Self::AfterAddLiquidityReturnsDelta, Self::AfterAddLiquidity),
        (
            Self::AfterRemoveLiquidityReturnsDelta,
            Self::AfterRemoveLiquidity,
        ),
    ];

    /// The bit position of this flag within the 160-bit identifier,
    /// counting from the least significant bit.
    #[must_use]
    pub const fn bit(&self) -> u8 {
        match self {
            Self::BeforeInitialize => 159,
            Self::AfterInitialize => 158,
            Self::BeforeAddLiquidity => 157,
            Self::AfterAddLiquidity => 156,
            Self::BeforeRemoveLiquidity => 155,
            Self::AfterRemoveLiquidity => 154,
            Self::BeforeSwap => 153,
            Self::AfterSwap => 152,
            Self::BeforeDonate => 151,
            Self::AfterDonate => 150,
            Self::BeforeSwapReturnsDelta => 149,
            Self::AfterSwapReturnsDelta => 148,
            Self::AfterAddLiquidityReturnsDelta => 147,
            Self::AfterRemoveLiquidityReturnsDelta => 146,
        }
    }
}

/// The full 14-boolean permission record a hook implementation declares
/// about itself, compared field-by-field against the flags encoded in
/// its deployed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub struct Permissions {
    pub before_initialize: bool,
    pub after_initialize: bool,
    pub before_add_liquidity: bool,
    pub after_add_liquidity: bool,
    pub before_remove_liquidity: bool,
    pub after_remove_liquidity: bool,
    pub before_swap: bool,
    pub after_swap: bool,
    pub before_donate: bool,
    pub after_donate: bool,
    pub before_swap_returns_delta: bool,
    pub after_swap_returns_delta: bool,
    pub after_add_liquidity_returns_delta: bool,
    pub after_remove_liquidity_returns_delta: bool,
}

impl Permissions {
    /// Reads one field by flag.
    #[must_use]
    pub const fn get(&self, flag: HookFlag) -> bool {
        match flag {
            HookFlag::BeforeInitialize => self.before_initialize,
            HookFlag::AfterInitialize => self.after_initialize,
            HookFlag::BeforeAddLiquidity => self.before_add_liquidity,
            HookFlag::AfterAddLiquidity => self.after_add_liquidity,
            HookFlag::BeforeRemoveLiquidity => self.before_remove_liquidity,
            HookFlag::AfterRemoveLiquidity => self.after_remove_liquidity,
            HookFlag::BeforeSwap => self.before_swap,
            HookFlag::AfterSwap => self.after_swap,
            HookFlag::BeforeDonate => self.before_donate,
            HookFlag::AfterDonate => self.after_donate,
            HookFlag::BeforeSwapReturnsDelta => self.before_swap_returns_delta,
            HookFlag::AfterSwapReturnsDelta => self.after_swap_returns_delta,
            HookFlag::AfterAddLiquidityReturnsDelta => self.after_add_liquidity_returns_delta,
            HookFlag::AfterRemoveLiquidityReturnsDelta => self.after_remove_liquidity_returns_delta,
        }
    }

    /// Returns the flags whose field is set, in descending bit order.
    #[must_use]
    pub fn flags(&self) -> Vec<HookFlag> {
        HookFlag::ALL
            .into_iter()
            .filter(|flag| self.get(*flag))
            .collect()
    }
}

/// An opaque 160-bit hook identifier with permission bits in its top 14
/// bits.
///
/// # Examples
///
/// ```
/// use manifold_amm::hooks::{HookAddress, HookFlag};
///
/// let hook = HookAddress::with_flags(&[HookFlag::BeforeSwap], 0x01);
/// assert!(hook.has_permission(HookFlag::BeforeSwap));
/// assert!(!hook.has_permission(HookFlag::AfterSwap));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HookAddress([u8; 20]);

impl HookAddress {
    /// The all-zero "no hook" sentinel.
    pub const NONE: Self = Self([0u8; 20]);

    /// Creates a `HookAddress` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 20-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 20] {
        self.0
    }

    /// Builds an address carrying exactly the given flags, with `salt`
    /// in the low byte to distinguish addresses sharing a flag set.
    #[must_use]
    pub fn with_flags(flags: &[HookFlag], salt: u8) -> Self {
        let mut bytes = [0u8; 20];
        bytes[19] = salt;
        for flag in flags {
            let bit = flag.bit();
            bytes[19 - (bit / 8) as usize] |= 1 << (bit % 8);
        }
        Self(bytes)
    }

    /// Builds an address whose flag bits match a permission record.
    #[must_use]
    pub fn from_permissions(permissions: &Permissions, salt: u8) -> Self {
        Self::with_flags(&permissions.flags(), salt)
    }

    /// Returns `true` if this is the "no hook" sentinel.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        let mut i = 0;
        while i < 20 {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Pure bit test for one permission flag.
    #[must_use]
    pub const fn has_permission(&self, flag: HookFlag) -> bool {
        let bit = flag.bit();
        self.0[19 - (bit / 8) as usize] >> (bit % 8) & 1 == 1
    }

    /// Returns `true` if any of the 14 flag bits is set.
    #[must_use]
    pub fn has_any_flag(&self) -> bool {
        HookFlag::ALL.iter().any(|flag| self.has_permission(*flag))
    }

    /// Decodes the full permission record encoded in this address.
    #[must_use]
    pub const fn permissions(&self) -> Permissions {
        Permissions {
            before_initialize: self.has_permission(HookFlag::BeforeInitialize),
            after_initialize: self.has_permission(HookFlag::AfterInitialize),
            before_add_liquidity: self.has_permission(HookFlag::BeforeAddLiquidity),
            after_add_liquidity: self.has_permission(HookFlag::AfterAddLiquidity),
            before_remove_liquidity: self.has_permission(HookFlag::BeforeRemoveLiquidity),
            after_remove_liquidity: self.has_permission(HookFlag::AfterRemoveLiquidity),
            before_swap: self.has_permission(HookFlag::BeforeSwap),
            after_swap: self.has_permission(HookFlag::AfterSwap),
            before_donate: self.has_permission(HookFlag::BeforeDonate),
            after_donate: self.has_permission(HookFlag::AfterDonate),
            before_swap_returns_delta: self.has_permission(HookFlag::BeforeSwapReturnsDelta),
            after_swap_returns_delta: self.has_permission(HookFlag::AfterSwapReturnsDelta),
            after_add_liquidity_returns_delta: self
                .has_permission(HookFlag::AfterAddLiquidityReturnsDelta),
            after_remove_liquidity_returns_delta: self
                .has_permission(HookFlag::AfterRemoveLiquidityReturnsDelta),
        }
    }

    /// Compares the flags encoded in this address against a declared
    /// permission record, field by field.
    ///
    /// Intended for a hook implementation to self-check its deployment
    /// identifier at construction time.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::HookAddressMismatch`] if any of the 14
    /// booleans differ.
    pub fn validate_permissions(&self, declared: &Permissions) -> Result<()> {
        let encoded = self.permissions();
        for flag in HookFlag::ALL {
            if encoded.get(flag) != declared.get(flag) {
                return Err(AmmError::HookAddressMismatch);
            }
        }
        Ok(())
    }

    /// Checks that every returns-delta flag is backed by its base flag.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidHookAddress`] on a returns-delta flag
    /// whose base extension point is not subscribed.
    pub fn validate_flags(&self) -> Result<()> {
        for (returns_delta, base) in HookFlag::DELTA_PAIRS {
            if self.has_permission(returns_delta) && !self.has_permission(base) {
                return Err(AmmError::InvalidHookAddress(
                    "returns-delta flag without its base flag",
                ));
            }
        }
        Ok(())
    }

    /// Validates this address for use in a pool with the given fee.
    ///
    /// A hook address is valid iff its flag layout is internally
    /// consistent ([`validate_flags`](Self::validate_flags)) and:
    /// the sentinel is paired with a non-dynamic fee, or a non-sentinel
    /// address carries at least one flag or a dynamic fee. A pool whose
    /// hook can never be invoked and whose fee can never be updated is
    /// rejected at key construction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidHookAddress`] on any violation.
    pub fn is_valid(&self, fee: crate::domain::Fee) -> Result<()> {
        self.validate_flags()?;
        if self.is_none() {
            if fee.is_dynamic() {
                return Err(AmmError::InvalidHookAddress(
                    "dynamic fee requires a hook to update it",
                ));
            }
            return Ok(());
        }
        if !self.has_any_flag() && !fee.is_dynamic() {
            return Err(AmmError::InvalidHookAddress(
                "hook with no flags can never be invoked",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for HookAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Fee;

    // -- Bit layout -----------------------------------------------------------

    #[test]
    fn flags_occupy_top_fourteen_bits() {
        let bits: Vec<u8> = HookFlag::ALL.iter().map(HookFlag::bit).collect();
        let expected: Vec<u8> = (146..=159).rev().collect();
        assert_eq!(bits, expected);
    }

    #[test]
    fn before_initialize_is_most_significant_bit() {
        let addr = HookAddress::with_flags(&[HookFlag::BeforeInitialize], 0);
        assert_eq!(addr.as_bytes()[0], 0b1000_0000);
    }

    #[test]
    fn after_remove_liquidity_returns_delta_is_lowest_flag_bit() {
        let addr = HookAddress::with_flags(&[HookFlag::AfterRemoveLiquidityReturnsDelta], 0);
        // Bit 146 lands in byte 1, bit 2.
        assert_eq!(addr.as_bytes()[1], 0b0000_0100);
        assert_eq!(addr.as_bytes()[0], 0);
    }

    #[test]
    fn has_permission_matches_encoding() {
        let addr = HookAddress::with_flags(&[HookFlag::BeforeSwap, HookFlag::AfterDonate], 0x7);
        for flag in HookFlag::ALL {
            let expected = matches!(flag, HookFlag::BeforeSwap | HookFlag::AfterDonate);
            assert_eq!(addr.has_permission(flag), expected, "{flag:?}");
        }
    }

    #[test]
    fn salt_does_not_disturb_flags() {
        let a = HookAddress::with_flags(&[HookFlag::BeforeSwap], 0x00);
        let b = HookAddress::with_flags(&[HookFlag::BeforeSwap], 0xff);
        assert_ne!(a, b);
        assert_eq!(a.permissions(), b.permissions());
    }

    // -- Permissions record ---------------------------------------------------

    #[test]
    fn permissions_round_trip() {
        let perms = Permissions {
            before_swap: true,
            after_swap: true,
            after_swap_returns_delta: true,
            ..Permissions::default()
        };
        let addr = HookAddress::from_permissions(&perms, 0x9);
        assert_eq!(addr.permissions(), perms);
    }

    #[test]
    fn validate_permissions_accepts_exact_match() {
        let perms = Permissions {
            before_donate: true,
            ..Permissions::default()
        };
        let addr = HookAddress::from_permissions(&perms, 1);
        assert_eq!(addr.validate_permissions(&perms), Ok(()));
    }

    #[test]
    fn validate_permissions_rejects_any_difference() {
        let perms = Permissions {
            before_donate: true,
            ..Permissions::default()
        };
        let addr = HookAddress::from_permissions(&perms, 1);
        let mut wrong = perms;
        wrong.after_donate = true;
        assert_eq!(
            addr.validate_permissions(&wrong),
            Err(AmmError::HookAddressMismatch)
        );
    }

    // -- Address validity -----------------------------------------------------

    #[test]
    fn returns_delta_without_base_is_invalid_for_every_fee() {
        let addr = HookAddress::with_flags(&[HookFlag::AfterSwapReturnsDelta], 0);
        for fee in [Fee::PIPS_500, Fee::PIPS_3000, Fee::PIPS_10000, Fee::dynamic()] {
            assert!(addr.is_valid(fee).is_err(), "{fee}");
        }
    }

    #[test]
    fn returns_delta_with_base_is_valid() {
        let addr =
            HookAddress::with_flags(&[HookFlag::AfterSwap, HookFlag::AfterSwapReturnsDelta], 0);
        assert_eq!(addr.is_valid(Fee::PIPS_3000), Ok(()));
    }

    #[test]
    fn sentinel_valid_only_with_static_fee() {
        assert_eq!(HookAddress::NONE.is_valid(Fee::PIPS_3000), Ok(()));
        assert!(HookAddress::NONE.is_valid(Fee::dynamic()).is_err());
    }

    #[test]
    fn flagless_nonzero_address_requires_dynamic_fee() {
        let addr = HookAddress::with_flags(&[], 0x42);
        assert!(addr.is_valid(Fee::PIPS_3000).is_err());
        assert_eq!(addr.is_valid(Fee::dynamic()), Ok(()));
    }

    #[test]
    fn flagged_address_valid_with_static_fee() {
        let addr = HookAddress::with_flags(&[HookFlag::BeforeInitialize], 0);
        assert_eq!(addr.is_valid(Fee::PIPS_500), Ok(()));
    }
}
