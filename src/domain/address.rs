//! Caller identity.

use core::fmt;

/// A 160-bit identity for the entity invoking an operation: the session
/// holder, a hook's sender argument, or a `take` recipient.
///
/// Kept distinct from [`TokenAddress`](super::TokenAddress) so a caller
/// identity can never be accidentally used where a token is expected.
///
/// # Examples
///
/// ```
/// use manifold_amm::domain::Address;
///
/// let caller = Address::from_bytes([9u8; 20]);
/// assert_eq!(caller.as_bytes(), [9u8; 20]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 20-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 20] {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
